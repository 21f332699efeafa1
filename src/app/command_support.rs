use crate::config::{load_settings as config_load_settings, ConfigError, Settings, SubmissionBackend};
use crate::intake::environment::default_user_agent;
use crate::intake::{IntakeContext, IntakeFlow};
use crate::shared::logging::IntakeLog;
use crate::submission::{HttpSubmissionService, OutboxSubmissionService, SubmissionService};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    pub config_path: Option<PathBuf>,
    pub user_agent: Option<String>,
    pub plain: bool,
    pub positional: Vec<String>,
}

pub fn parse_command_options(args: &[String]) -> Result<CommandOptions, String> {
    let mut options = CommandOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--plain" => options.plain = true,
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "`--config` requires a path".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--user-agent" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "`--user-agent` requires a value".to_string())?;
                options.user_agent = Some(value.clone());
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            value => options.positional.push(value.to_string()),
        }
    }
    Ok(options)
}

pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, String> {
    config_load_settings(config_path).map_err(map_config_err)
}

pub fn build_submission_service(settings: &Settings) -> Result<Arc<dyn SubmissionService>, String> {
    match settings.submission.backend {
        SubmissionBackend::Outbox => {
            let dir = settings.resolve_outbox_path().map_err(map_config_err)?;
            Ok(Arc::new(OutboxSubmissionService::new(dir)))
        }
        SubmissionBackend::Http => {
            let endpoint = settings.submission.endpoint.as_deref().unwrap_or_default();
            let mut service = HttpSubmissionService::new(endpoint, settings.submission_timeout());
            if let Some(token) = settings.resolve_bearer_token().map_err(map_config_err)? {
                service = service.with_bearer_token(token);
            }
            Ok(Arc::new(service))
        }
    }
}

/// User agent precedence: command line, then config, then the terminal default.
pub fn build_intake_context(settings: &Settings, user_agent: Option<&str>) -> IntakeContext {
    let user_agent = user_agent
        .map(str::to_string)
        .or_else(|| settings.user_agent.clone())
        .unwrap_or_else(default_user_agent);
    IntakeContext {
        page_url: settings.page_url.clone(),
        reporter: settings.resolve_reporter(),
        user_agent,
    }
}

pub fn build_intake_flow(settings: &Settings, user_agent: Option<&str>) -> Result<IntakeFlow, String> {
    let service = build_submission_service(settings)?;
    let state_root = settings.resolve_state_root().map_err(map_config_err)?;
    Ok(
        IntakeFlow::new(build_intake_context(settings, user_agent), service)
            .with_log(IntakeLog::from_state_root(&state_root)),
    )
}

#[cfg(test)]
mod tests {
    use super::{build_intake_context, parse_command_options};
    use crate::config::Settings;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn options_parse_flags_and_positionals() {
        let options = parse_command_options(&args(&[
            "--plain",
            "--user-agent",
            "Mozilla/5.0 (iPhone)",
            "--config",
            "/tmp/bugdesk.yaml",
            "extra",
        ]))
        .expect("parse");
        assert!(options.plain);
        assert_eq!(options.user_agent.as_deref(), Some("Mozilla/5.0 (iPhone)"));
        assert_eq!(
            options.config_path.as_deref(),
            Some(std::path::Path::new("/tmp/bugdesk.yaml"))
        );
        assert_eq!(options.positional, vec!["extra".to_string()]);
    }

    #[test]
    fn options_reject_unknown_flags_and_missing_values() {
        assert_eq!(
            parse_command_options(&args(&["--verbose"])),
            Err("unknown option `--verbose`".to_string())
        );
        assert!(parse_command_options(&args(&["--config"])).is_err());
    }

    #[test]
    fn command_line_user_agent_overrides_config() {
        let settings: Settings =
            serde_yaml::from_str("user_agent: \"from-config\"\nreporter_id: qa").expect("parse");
        let context = build_intake_context(&settings, Some("from-flag"));
        assert_eq!(context.user_agent, "from-flag");
        assert_eq!(context.reporter.as_str(), "qa");
        assert_eq!(build_intake_context(&settings, None).user_agent, "from-config");
    }
}
