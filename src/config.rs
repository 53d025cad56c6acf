use std::time::Duration;

use crate::types::Resolution;

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8000/api/v1/ws";

/// Recognized options of the stream client.
#[derive(Debug, Clone)]
pub struct ClientConfiguration {
    /// WebSocket endpoint of the inference service (`ws://` or `wss://`).
    pub endpoint: String,

    /// Send ticks per second while the connection is open.
    pub frame_rate: u32,

    /// Delay before the single reconnect attempt scheduled after a
    /// disconnect, when the default fixed-delay policy is in use.
    pub reconnect_delay: Duration,

    /// JPEG quality in the 0.0..=1.0 range.
    pub jpeg_quality: f32,

    /// Preferred capture resolution. The device may grant a different one;
    /// the capturer reports the actual dimensions.
    pub capture_resolution: Resolution,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            frame_rate: 10,
            reconnect_delay: Duration::from_millis(5000),
            jpeg_quality: 0.8,
            capture_resolution: Resolution::new(640, 480),
        }
    }
}

impl ClientConfiguration {
    pub fn tick_interval(&self) -> Duration {
        // Fractional period: integer milliseconds would truncate to zero
        // above 1000 Hz, which tokio's interval rejects.
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recognized_options() {
        let config = ClientConfiguration::default();

        assert_eq!(config.endpoint, "ws://localhost:8000/api/v1/ws");
        assert_eq!(config.frame_rate, 10);
        assert_eq!(config.reconnect_delay, Duration::from_millis(5000));
        assert_eq!(config.jpeg_quality, 0.8);
        assert_eq!(config.capture_resolution, Resolution::new(640, 480));
    }

    #[test]
    fn tick_interval_follows_frame_rate() {
        let config = ClientConfiguration {
            frame_rate: 10,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(100));

        let config = ClientConfiguration {
            frame_rate: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn tick_interval_keeps_sub_millisecond_precision() {
        // Rates between 501 and 1000 Hz need fractional milliseconds.
        let config = ClientConfiguration {
            frame_rate: 800,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_micros(1250));
    }

    #[test]
    fn tick_interval_never_collapses_to_zero() {
        // A zero period would make tokio's interval constructor panic the
        // moment a connection opens.
        let config = ClientConfiguration {
            frame_rate: 1500,
            ..Default::default()
        };

        let interval = config.tick_interval();
        assert!(interval > Duration::ZERO);
        assert!(interval < Duration::from_millis(1));
    }
}
