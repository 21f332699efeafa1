pub mod error;
pub mod http;
pub mod outbox;

pub use error::SubmissionError;
pub use http::HttpSubmissionService;
pub use outbox::{list_outbox_reports, OutboxSubmissionService};

use crate::intake::payload::BugReportPayload;
use serde::{Deserialize, Serialize};

/// Identifier the reporting backend assigned to an accepted report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Destination for confirmed bug reports.
///
/// Implementations own their timeouts; the intake flow calls `create` once
/// per confirmation and never retries on its own.
pub trait SubmissionService: Send + Sync {
    fn create(&self, payload: &BugReportPayload) -> Result<SubmissionId, SubmissionError>;
}
