use crate::app::command_support::{load_settings, map_config_err, parse_command_options};
use crate::config::{resolve_config_path, SubmissionBackend};

pub fn cmd_config(args: &[String]) -> Result<String, String> {
    let options = parse_command_options(args)?;
    if !options.positional.is_empty() {
        return Err("usage: config [--config <path>]".to_string());
    }
    let (path, _) = resolve_config_path(options.config_path.as_deref()).map_err(map_config_err)?;
    let settings = load_settings(options.config_path.as_deref())?;
    let state_root = settings.resolve_state_root().map_err(map_config_err)?;

    let mut lines = vec![
        format!(
            "config_path={}{}",
            path.display(),
            if path.exists() { "" } else { " (not found, using defaults)" }
        ),
        format!("state_root={}", state_root.display()),
        format!("reporter_id={}", settings.resolve_reporter()),
        format!("page_url={}", settings.page_url),
        format!("submission.backend={}", settings.submission.backend),
    ];
    match settings.submission.backend {
        SubmissionBackend::Outbox => {
            let outbox = settings.resolve_outbox_path().map_err(map_config_err)?;
            lines.push(format!("submission.outbox_path={}", outbox.display()));
        }
        SubmissionBackend::Http => {
            lines.push(format!(
                "submission.endpoint={}",
                settings.submission.endpoint.as_deref().unwrap_or_default()
            ));
            lines.push(format!(
                "submission.timeout_seconds={}",
                settings.submission.timeout_seconds
            ));
            if let Some(name) = &settings.submission.token_env {
                lines.push(format!("submission.token_env={name}"));
            }
        }
    }
    Ok(lines.join("\n"))
}
