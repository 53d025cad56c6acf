use std::fmt::{self, Display};
use std::str::FromStr;

use bytes::Bytes;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Error, Debug)]
#[error("invalid resolution '{0}', expected <width>x<height>")]
pub struct ParseResolutionError(String);

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (width_str, height_str) = value
            .split_once('x')
            .ok_or_else(|| ParseResolutionError(value.to_string()))?;

        let width = u32::from_str(width_str).map_err(|_| ParseResolutionError(value.to_string()))?;
        let height =
            u32::from_str(height_str).map_err(|_| ParseResolutionError(value.to_string()))?;

        Ok(Self { width, height })
    }
}

/// One raster sample of the live camera feed, RGB8, row-major.
///
/// Created on each send tick, consumed by encoding, then discarded.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Bytes,
}

impl Frame {
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

/// Decoded server reply: a gaze/attention judgment plus orientation angles.
///
/// The status vocabulary is an open external contract; it is carried
/// verbatim, like the angle tokens inside each [`AngleReading`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassificationMessage {
    pub status: String,
    pub yaw: AngleReading,
    pub pitch: AngleReading,
    pub roll: AngleReading,
}

/// One orientation angle as the service reported it.
///
/// Angles arrive as JSON numbers or as pre-formatted numeric strings
/// depending on the service build, and as `"N/A"` (or null) when no face was
/// detected in the frame. The wire token is kept untouched so presenters can
/// show exactly what the service formatted (`"-4.20"` stays `"-4.20"`, not
/// `-4.2`); the parsed value serves anything that needs the number.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleReading {
    raw: String,
    value: Option<f64>,
}

impl AngleReading {
    /// The angle token exactly as it appeared on the wire (`"N/A"` for a
    /// null reading).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed numeric value, `None` when no face was detected.
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl Display for AngleReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for AngleReading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAngle {
            Number(serde_json::Number),
            Text(String),
        }

        match Option::<RawAngle>::deserialize(deserializer)? {
            None => Ok(Self {
                raw: "N/A".to_string(),
                value: None,
            }),
            Some(RawAngle::Number(number)) => Ok(Self {
                value: number.as_f64(),
                raw: number.to_string(),
            }),
            Some(RawAngle::Text(text)) => {
                if text.eq_ignore_ascii_case("n/a") {
                    return Ok(Self {
                        raw: text,
                        value: None,
                    });
                }
                match text.trim().parse::<f64>() {
                    Ok(value) => Ok(Self {
                        raw: text,
                        value: Some(value),
                    }),
                    Err(_) => Err(de::Error::custom(format!(
                        "invalid angle value '{}'",
                        text
                    ))),
                }
            }
        }
    }
}

/// Connection-level events surfaced to the presenter alongside
/// classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportStatus {
    Connected,
    Disconnected,
    ConnectionError,
}

impl TransportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransportStatus::Connected => "Connected",
            TransportStatus::Disconnected => "Disconnected",
            TransportStatus::ConnectionError => "Connection Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_parses_well_formed_string() {
        let resolution: Resolution = "640x480".parse().unwrap();
        assert_eq!(resolution, Resolution::new(640, 480));
    }

    #[test]
    fn resolution_rejects_garbage() {
        assert!("640".parse::<Resolution>().is_err());
        assert!("x480".parse::<Resolution>().is_err());
        assert!("640xhigh".parse::<Resolution>().is_err());
    }

    #[test]
    fn classification_decodes_numeric_angles() {
        let message: ClassificationMessage =
            serde_json::from_str(r#"{"status":"Focused","yaw":1.0,"pitch":-2.0,"roll":0.5}"#)
                .unwrap();

        assert_eq!(message.status, "Focused");
        assert_eq!(message.yaw.value(), Some(1.0));
        assert_eq!(message.pitch.value(), Some(-2.0));
        assert_eq!(message.roll.value(), Some(0.5));
    }

    #[test]
    fn classification_decodes_string_angles() {
        let message: ClassificationMessage = serde_json::from_str(
            r#"{"status":"Distracted (Looking Away)","yaw":"23.51","pitch":"-4.20","roll":"0.00"}"#,
        )
        .unwrap();

        assert_eq!(message.yaw.value(), Some(23.51));
        assert_eq!(message.pitch.value(), Some(-4.2));
        assert_eq!(message.roll.value(), Some(0.0));
    }

    #[test]
    fn string_angles_keep_the_wire_formatting() {
        // The service pre-formats angles; trailing zeros and the exact
        // number of decimals must survive the round trip to the presenter.
        let message: ClassificationMessage = serde_json::from_str(
            r#"{"status":"Focused","yaw":"23.51","pitch":"-4.20","roll":"0.00"}"#,
        )
        .unwrap();

        assert_eq!(message.yaw.as_str(), "23.51");
        assert_eq!(message.pitch.as_str(), "-4.20");
        assert_eq!(message.roll.as_str(), "0.00");
        assert_eq!(message.roll.to_string(), "0.00");
    }

    #[test]
    fn numeric_angles_keep_a_faithful_token() {
        let message: ClassificationMessage =
            serde_json::from_str(r#"{"status":"Focused","yaw":1.0,"pitch":-2.0,"roll":0.5}"#)
                .unwrap();

        assert_eq!(message.yaw.as_str(), "1.0");
        assert_eq!(message.pitch.as_str(), "-2.0");
        assert_eq!(message.roll.as_str(), "0.5");
    }

    #[test]
    fn classification_decodes_missing_face_angles() {
        let message: ClassificationMessage = serde_json::from_str(
            r#"{"status":"No Face Detected","yaw":"N/A","pitch":"n/a","roll":null}"#,
        )
        .unwrap();

        assert_eq!(message.yaw.value(), None);
        assert_eq!(message.pitch.value(), None);
        assert_eq!(message.roll.value(), None);

        assert_eq!(message.yaw.as_str(), "N/A");
        // Case is part of the wire token too.
        assert_eq!(message.pitch.as_str(), "n/a");
        assert_eq!(message.roll.as_str(), "N/A");
    }

    #[test]
    fn classification_rejects_non_numeric_angle() {
        let result = serde_json::from_str::<ClassificationMessage>(
            r#"{"status":"Focused","yaw":"sideways","pitch":0.0,"roll":0.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn classification_rejects_missing_fields() {
        assert!(serde_json::from_str::<ClassificationMessage>(r#"{"status":"Focused"}"#).is_err());
        assert!(serde_json::from_str::<ClassificationMessage>("[1, 2, 3]").is_err());
    }
}
