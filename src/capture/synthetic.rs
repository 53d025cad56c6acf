use bytes::Bytes;
use log::debug;

use crate::error::CaptureError;
use crate::types::{Frame, Resolution};

use super::FrameCapturer;

/// Hardware-free capture source producing deterministic gradient frames.
///
/// Used in tests and headless runs. It can simulate a device that grants a
/// resolution other than the requested one, and a denied camera permission.
pub struct SyntheticFrameCapturer {
    requested: Resolution,
    granted: Resolution,
    deny_permission: bool,
    started: bool,
    frame_count: u64,
}

impl SyntheticFrameCapturer {
    pub fn new(requested: Resolution) -> Self {
        Self {
            requested,
            granted: requested,
            deny_permission: false,
            started: false,
            frame_count: 0,
        }
    }

    /// Simulate a device that negotiates different dimensions than the
    /// requested ideal.
    pub fn with_granted_resolution(mut self, granted: Resolution) -> Self {
        self.granted = granted;
        self
    }

    /// Simulate the user declining camera access.
    pub fn deny_permission(mut self) -> Self {
        self.deny_permission = true;
        self
    }
}

impl FrameCapturer for SyntheticFrameCapturer {
    fn start(&mut self) -> Result<(), CaptureError> {
        if self.deny_permission {
            return Err(CaptureError::PermissionDenied);
        }

        debug!(
            "synthetic capture started: requested {}, granted {}",
            self.requested, self.granted
        );

        self.started = true;
        Ok(())
    }

    fn current_frame(&mut self) -> Result<Frame, CaptureError> {
        assert!(self.started, "current_frame() called before start()");

        let Resolution { width, height } = self.granted;
        let shift = self.frame_count as u32;
        self.frame_count += 1;

        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x + shift) % 256) as u8);
                pixels.push(((y + shift) % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }

        Ok(Frame {
            width,
            height,
            pixels: Bytes::from(pixels),
        })
    }

    fn resolution(&self) -> Resolution {
        self.granted
    }
}
