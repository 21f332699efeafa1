use super::{default_config_path, ConfigError, Settings, CONFIG_ENV_VAR};
use std::path::{Path, PathBuf};

/// Config file to read: an explicit path, then `BUGDESK_CONFIG`, then the
/// default under the home directory. The flag says whether it must exist.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = explicit {
        return Ok((path.to_path_buf(), true));
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok((PathBuf::from(path), true));
    }
    Ok((default_config_path()?, false))
}

/// Loads and validates settings. A missing default config file yields the
/// built-in defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, required) = resolve_config_path(explicit)?;
    let settings = if required || path.exists() {
        Settings::from_path(&path)?
    } else {
        Settings::default()
    };
    settings.validate()?;
    Ok(settings)
}
