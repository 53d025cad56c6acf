use thiserror::Error;

/// Capture-stage failures. These are fatal to the whole flow: the stream
/// client is never run after one of these, the user has to re-grant access
/// and restart.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

/// Reason a frame or message was dropped without interrupting the loop.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    #[error("malformed inbound message")]
    MalformedMessage,

    #[error("frame grab failed")]
    FrameGrab,

    #[error("frame encoding failed")]
    FrameEncode,
}
