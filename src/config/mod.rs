pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_settings, resolve_config_path};
pub use paths::{
    default_config_path, default_state_root, CONFIG_ENV_VAR, GLOBAL_SETTINGS_FILE_NAME,
    GLOBAL_STATE_DIR,
};
pub use settings::{Settings, SubmissionBackend, SubmissionConfig};
