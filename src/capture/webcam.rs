use bytes::Bytes;
use log::{debug, info};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
};
use nokhwa::{Camera, NokhwaError};

use crate::error::CaptureError;
use crate::types::{Frame, Resolution};

use super::FrameCapturer;

/// Real webcam source backed by nokhwa. Requests the preferred resolution
/// with closest-format negotiation and reads back whatever the device
/// actually granted.
pub struct WebcamFrameCapturer {
    index: CameraIndex,
    requested: Resolution,
    camera: Option<Camera>,
}

impl WebcamFrameCapturer {
    pub fn new(device_index: u32, requested: Resolution) -> Self {
        Self {
            index: CameraIndex::Index(device_index),
            requested,
            camera: None,
        }
    }
}

fn map_nokhwa_error(error: NokhwaError) -> CaptureError {
    // nokhwa has no dedicated permission variant, the OS denial surfaces as
    // an open error mentioning permission/access.
    let message = error.to_string();
    let lowered = message.to_lowercase();
    if lowered.contains("permission") || lowered.contains("access denied") {
        CaptureError::PermissionDenied
    } else {
        CaptureError::DeviceUnavailable(message)
    }
}

impl FrameCapturer for WebcamFrameCapturer {
    fn start(&mut self) -> Result<(), CaptureError> {
        let preferred = CameraFormat::new(
            nokhwa::utils::Resolution::new(self.requested.width, self.requested.height),
            FrameFormat::MJPEG,
            30,
        );
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(preferred));

        let mut camera =
            Camera::new(self.index.clone(), requested).map_err(map_nokhwa_error)?;
        camera.open_stream().map_err(map_nokhwa_error)?;

        let granted = camera.resolution();
        info!(
            "webcam stream open: requested {}, granted {}x{}",
            self.requested,
            granted.width(),
            granted.height()
        );

        self.camera = Some(camera);
        Ok(())
    }

    fn current_frame(&mut self) -> Result<Frame, CaptureError> {
        let camera = self
            .camera
            .as_mut()
            .expect("current_frame() called before start()");

        let buffer = camera.frame().map_err(map_nokhwa_error)?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(map_nokhwa_error)?;

        let (width, height) = (decoded.width(), decoded.height());
        debug!("grabbed {}x{} webcam frame", width, height);

        Ok(Frame {
            width,
            height,
            pixels: Bytes::from(decoded.into_raw()),
        })
    }

    fn resolution(&self) -> Resolution {
        match &self.camera {
            Some(camera) => {
                let granted = camera.resolution();
                Resolution::new(granted.width(), granted.height())
            }
            None => self.requested,
        }
    }
}
