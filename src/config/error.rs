#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("settings validation failed: {0}")]
    Settings(String),
    #[error("environment variable `{name}` named by `submission.token_env` is not set")]
    MissingTokenEnv { name: String },
    #[error("failed to resolve home directory for bugdesk state root")]
    HomeDirectoryUnavailable,
}
