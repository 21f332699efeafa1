use crate::intake::error::IntakeError;
use crate::intake::priority::Priority;
use crate::intake::state::CollectedFields;
use crate::intake::step::{FieldKey, INTAKE_STEPS};
use crate::shared::ids::ReporterId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    pub page_url: String,
    pub submitted_at: String,
    pub submitted_by: ReporterId,
}

impl SubmissionMetadata {
    pub fn new(page_url: &str, submitted_by: ReporterId, submitted_at: DateTime<Utc>) -> Self {
        Self {
            page_url: page_url.to_string(),
            submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            submitted_by,
        }
    }
}

/// Body handed to `SubmissionService::create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugReportPayload {
    pub title: String,
    pub description: String,
    pub steps_to_reproduce: String,
    pub expected_behavior: String,
    pub actual_behavior: String,
    pub device: String,
    pub browser: String,
    pub os: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_ref: Option<String>,
    #[serde(flatten)]
    pub metadata: SubmissionMetadata,
}

impl BugReportPayload {
    pub fn assemble(
        fields: &CollectedFields,
        metadata: SubmissionMetadata,
    ) -> Result<Self, IntakeError> {
        let required = |field: FieldKey| -> Result<String, IntakeError> {
            fields
                .get(field)
                .map(str::to_string)
                .ok_or(IntakeError::MissingField { field })
        };
        let raw_priority = required(FieldKey::Priority)?;
        let priority =
            Priority::parse(&raw_priority).map_err(|_| IntakeError::InvalidPriority(raw_priority))?;

        Ok(Self {
            title: required(FieldKey::Title)?,
            description: required(FieldKey::Description)?,
            steps_to_reproduce: required(FieldKey::StepsToReproduce)?,
            expected_behavior: required(FieldKey::ExpectedBehavior)?,
            actual_behavior: required(FieldKey::ActualBehavior)?,
            device: required(FieldKey::Device)?,
            browser: required(FieldKey::Browser)?,
            os: required(FieldKey::Os)?,
            priority,
            screenshot_ref: fields.get(FieldKey::ScreenshotRef).map(str::to_string),
            metadata,
        })
    }
}

pub fn render_summary(fields: &CollectedFields) -> String {
    let mut lines = vec!["Here's your bug report:".to_string()];
    for field in INTAKE_STEPS.iter().filter_map(|step| step.field()) {
        let value = match fields.get(field) {
            Some(value) => value,
            None if field == FieldKey::ScreenshotRef => "(none)",
            None => "(missing)",
        };
        lines.push(format!("{}: {value}", field.label()));
    }
    lines.join("\n")
}
