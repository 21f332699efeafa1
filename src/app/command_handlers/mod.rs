use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod config;
pub mod detect;
pub mod outbox;
pub mod report;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Report => report::cmd_report(&args[1..]),
        CliVerb::Detect => detect::cmd_detect(&args[1..]),
        CliVerb::Outbox => outbox::cmd_outbox(&args[1..]),
        CliVerb::Config => config::cmd_config(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
