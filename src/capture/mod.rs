use crate::error::CaptureError;
use crate::types::{Frame, Resolution};

pub mod synthetic;

#[cfg(feature = "webcam")]
pub mod webcam;

/// A live camera source. Acquiring the device happens in `start()`; after
/// that the most recent frame can be sampled on demand.
pub trait FrameCapturer: Send {
    /// Acquire the device at the preferred resolution. The device is free to
    /// negotiate different dimensions; `resolution()` and the frames returned
    /// by `current_frame()` reflect what was actually granted.
    ///
    /// A `PermissionDenied` or `DeviceUnavailable` result is terminal for the
    /// whole flow, no stream client should be run after it.
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Sample the live stream at call time.
    ///
    /// Panics if called before `start()` succeeded; that is a programming
    /// error, not a recoverable failure. Transient grab failures on a started
    /// device are reported as errors and the tick is dropped by the caller.
    fn current_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Actual granted dimensions once started.
    fn resolution(&self) -> Resolution;
}
