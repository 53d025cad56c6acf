use async_trait::async_trait;
use log::info;

use crate::types::{ClassificationMessage, TransportStatus};

use super::{FocusCategory, Presenter};

/// Renders classifications on the console through the logging facade.
pub struct ConsolePresenter {}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Presenter for ConsolePresenter {
    async fn classification(&mut self, message: &ClassificationMessage) {
        let category = FocusCategory::classify(&message.status);
        // Angle readings display their wire token untouched.
        info!(
            "[{:?}] {} (yaw: {}, pitch: {}, roll: {})",
            category, message.status, message.yaw, message.pitch, message.roll,
        );
    }

    async fn transport(&mut self, status: TransportStatus) {
        info!("{}", status.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_angles_match_the_service_formatting() {
        let message: ClassificationMessage = serde_json::from_str(
            r#"{"status":"Focused","yaw":"0.00","pitch":"-4.20","roll":"N/A"}"#,
        )
        .unwrap();

        let line = format!(
            "(yaw: {}, pitch: {}, roll: {})",
            message.yaw, message.pitch, message.roll
        );
        assert_eq!(line, "(yaw: 0.00, pitch: -4.20, roll: N/A)");
    }
}
