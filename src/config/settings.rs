use super::{default_state_root, ConfigError};
use crate::shared::ids::ReporterId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_PAGE_URL: &str = "cli://bugdesk/report";
const OUTBOX_DIR_NAME: &str = "outbox";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionBackend {
    #[default]
    Outbox,
    Http,
}

impl SubmissionBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outbox => "outbox",
            Self::Http => "http",
        }
    }
}

impl std::fmt::Display for SubmissionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionConfig {
    #[serde(default)]
    pub backend: SubmissionBackend,
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Name of the environment variable holding a bearer token.
    #[serde(default)]
    pub token_env: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub outbox_path: Option<PathBuf>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            backend: SubmissionBackend::default(),
            endpoint: None,
            token_env: None,
            timeout_seconds: default_timeout_seconds(),
            outbox_path: None,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_page_url() -> String {
    DEFAULT_PAGE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub state_root: Option<PathBuf>,
    #[serde(default)]
    pub reporter_id: Option<ReporterId>,
    #[serde(default = "default_page_url")]
    pub page_url: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            state_root: None,
            reporter_id: None,
            page_url: default_page_url(),
            user_agent: None,
            submission: SubmissionConfig::default(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_url.trim().is_empty() {
            return Err(ConfigError::Settings(
                "`page_url` must be non-empty".to_string(),
            ));
        }
        if let Some(root) = &self.state_root {
            if !root.is_absolute() {
                return Err(ConfigError::Settings(
                    "`state_root` must be an absolute path".to_string(),
                ));
            }
        }

        let submission = &self.submission;
        if submission.timeout_seconds == 0 {
            return Err(ConfigError::Settings(
                "`submission.timeout_seconds` must be greater than zero".to_string(),
            ));
        }
        if let Some(name) = &submission.token_env {
            if name.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "`submission.token_env` must be non-empty when set".to_string(),
                ));
            }
        }
        if submission.backend == SubmissionBackend::Http {
            let endpoint = submission
                .endpoint
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if endpoint.is_empty() {
                return Err(ConfigError::Settings(
                    "`submission.endpoint` is required for the http backend".to_string(),
                ));
            }
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::Settings(format!(
                    "`submission.endpoint` must be an http(s) url, got `{endpoint}`"
                )));
            }
        }
        Ok(())
    }

    pub fn resolve_state_root(&self) -> Result<PathBuf, ConfigError> {
        match &self.state_root {
            Some(root) => Ok(root.clone()),
            None => default_state_root(),
        }
    }

    /// Outbox directory; relative paths are taken from the state root.
    pub fn resolve_outbox_path(&self) -> Result<PathBuf, ConfigError> {
        let root = self.resolve_state_root()?;
        Ok(match &self.submission.outbox_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root.join(path),
            None => root.join(OUTBOX_DIR_NAME),
        })
    }

    /// Configured reporter, else the login name, else `anonymous`.
    pub fn resolve_reporter(&self) -> ReporterId {
        if let Some(reporter) = &self.reporter_id {
            return reporter.clone();
        }
        ["USER", "USERNAME"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find_map(|value| ReporterId::parse(&value).ok())
            .unwrap_or_else(ReporterId::anonymous)
    }

    pub fn resolve_bearer_token(&self) -> Result<Option<String>, ConfigError> {
        let Some(name) = self.submission.token_env.as_deref() else {
            return Ok(None);
        };
        std::env::var(name)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(Some)
            .ok_or_else(|| ConfigError::MissingTokenEnv {
                name: name.to_string(),
            })
    }

    pub fn submission_timeout(&self) -> Duration {
        Duration::from_secs(self.submission.timeout_seconds)
    }
}
