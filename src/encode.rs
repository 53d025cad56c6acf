use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

use crate::error::EncodeError;
use crate::types::Frame;

pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Encodes RGB8 frames as lossy JPEG wrapped in a standard data URL, one
/// text payload per frame.
pub struct JpegDataUrlEncoder {
    quality: u8,
}

impl JpegDataUrlEncoder {
    /// `quality` is in the 0.0..=1.0 range and maps onto JPEG quality
    /// 1..=100.
    pub fn new(quality: f32) -> Self {
        let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
        Self { quality }
    }

    pub fn encode(&self, frame: &Frame) -> Result<String, EncodeError> {
        let expected = (frame.width * frame.height * 3) as usize;
        if frame.pixels.len() != expected {
            return Err(EncodeError::BufferSize {
                expected,
                actual: frame.pixels.len(),
            });
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality).encode(
            &frame.pixels,
            frame.width,
            frame.height,
            ColorType::Rgb8,
        )?;

        let mut url = String::with_capacity(DATA_URL_PREFIX.len() + jpeg.len() * 4 / 3 + 4);
        url.push_str(DATA_URL_PREFIX);
        STANDARD.encode_string(&jpeg, &mut url);

        Ok(url)
    }
}
