use async_trait::async_trait;

use crate::types::{ClassificationMessage, TransportStatus};

pub mod console;

/// Visual category a status maps to.
///
/// The status vocabulary is an open external contract; anything not matched
/// by the rules below (including transport statuses) falls through to the
/// default category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusCategory {
    Focused,
    Distracted,
    Default,
}

impl FocusCategory {
    pub fn classify(status: &str) -> Self {
        if status.contains("Distracted") || status.contains("Looking") {
            FocusCategory::Distracted
        } else if status == "Focused" {
            FocusCategory::Focused
        } else {
            FocusCategory::Default
        }
    }
}

/// Renders the latest classification or transport event as page/console
/// state. Driven passively by the stream client; no history is retained.
#[async_trait]
pub trait Presenter: Send {
    async fn classification(&mut self, message: &ClassificationMessage);

    async fn transport(&mut self, status: TransportStatus);
}
