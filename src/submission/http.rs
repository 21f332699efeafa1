use super::{SubmissionError, SubmissionId, SubmissionService};
use crate::intake::payload::BugReportPayload;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts reports as JSON to a REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmissionService {
    endpoint: String,
    bearer_token: Option<String>,
    agent: ureq::Agent,
}

#[derive(Debug, Clone, Deserialize)]
struct CreatedReport {
    #[serde(alias = "_id")]
    id: Value,
}

impl HttpSubmissionService {
    pub fn new(endpoint: &str, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.trim().to_string(),
            bearer_token: None,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

// Validation failures usually carry `{"error": "..."}` or `{"message": "..."}`.
fn rejection_reason(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl SubmissionService for HttpSubmissionService {
    fn create(&self, payload: &BugReportPayload) -> Result<SubmissionId, SubmissionError> {
        let body =
            serde_json::to_value(payload).map_err(|e| SubmissionError::Request(e.to_string()))?;
        let mut request = self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let response = match request.send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                if matches!(status, 400 | 422) {
                    return Err(SubmissionError::Rejected(rejection_reason(&body)));
                }
                return Err(SubmissionError::Status { status, body });
            }
            Err(err) => return Err(SubmissionError::Request(err.to_string())),
        };

        let created: CreatedReport = response
            .into_json()
            .map_err(|e| SubmissionError::Decode(e.to_string()))?;
        match created.id {
            Value::String(id) if !id.trim().is_empty() => Ok(SubmissionId::new(id)),
            Value::Number(id) => Ok(SubmissionId::new(id.to_string())),
            other => Err(SubmissionError::Decode(format!(
                "expected a non-empty `id`, got {other}"
            ))),
        }
    }
}
