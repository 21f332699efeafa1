#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Report,
    Detect,
    Outbox,
    Config,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "report" => CliVerb::Report,
        "detect" => CliVerb::Detect,
        "outbox" => CliVerb::Outbox,
        "config" => CliVerb::Config,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  report [--plain] [--user-agent <ua>] [--config <path>]".to_string(),
        "                                       File a bug report through the guided conversation"
            .to_string(),
        "  detect <user-agent>                  Show device/browser/OS suggestions for an agent"
            .to_string(),
        "  outbox [--config <path>]             List reports captured by the outbox backend"
            .to_string(),
        "  config [--config <path>]             Show the resolved configuration".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn conversation_help_lines() -> Vec<String> {
    vec![
        "During a report:".to_string(),
        "  /restart                             Discard answers and start over".to_string(),
        "  /retry                               Review and resubmit after a failed submission"
            .to_string(),
        "  /exit                                Leave without submitting".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.extend(conversation_help_lines());
    lines.join("\n")
}
