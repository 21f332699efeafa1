use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub fn validate_reporter_value(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("reporter id must be non-empty".to_string());
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '@' | '+'))
    {
        return Ok(());
    }
    Err("reporter id must use only ASCII letters, digits, '-', '_', '.', '@' or '+'".to_string())
}

/// Identifies who is submitting a report. Usually a username or email.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReporterId(String);

impl ReporterId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        validate_reporter_value(trimmed)?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReporterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for ReporterId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|err| D::Error::custom(format!("invalid reporter id `{raw}`: {err}")))
    }
}
