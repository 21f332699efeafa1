use crate::app::command_support::{load_settings, map_config_err, parse_command_options};
use crate::submission::list_outbox_reports;

pub fn cmd_outbox(args: &[String]) -> Result<String, String> {
    let options = parse_command_options(args)?;
    if !options.positional.is_empty() {
        return Err("usage: outbox [--config <path>]".to_string());
    }
    let settings = load_settings(options.config_path.as_deref())?;
    let dir = settings.resolve_outbox_path().map_err(map_config_err)?;
    let reports = list_outbox_reports(&dir).map_err(|e| e.to_string())?;
    if reports.is_empty() {
        return Ok(format!("no reports in {}", dir.display()));
    }

    let mut lines = vec![format!("{} report(s) in {}", reports.len(), dir.display())];
    for (id, payload) in reports {
        lines.push(format!(
            "{id} priority={} submitted_at={} by={} title={}",
            payload.priority,
            payload.metadata.submitted_at,
            payload.metadata.submitted_by,
            payload.title
        ));
    }
    Ok(lines.join("\n"))
}
