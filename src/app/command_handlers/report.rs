use crate::app::command_support::{build_intake_flow, load_settings, parse_command_options};
use crate::intake::{
    parse_intake_command, FlowStatus, IntakeCommand, IntakeError, IntakeFlow, IntakeMessage,
};
use std::io::{self, BufRead, Write};

pub fn cmd_report(args: &[String]) -> Result<String, String> {
    let options = parse_command_options(args)?;
    if !options.positional.is_empty() {
        return Err(
            "usage: report [--plain] [--user-agent <ua>] [--config <path>]".to_string(),
        );
    }
    let settings = load_settings(options.config_path.as_deref())?;
    let flow = build_intake_flow(&settings, options.user_agent.as_deref())?;

    if options.plain {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let status = run_plain_session(flow, stdin.lock(), stdout.lock())?;
        return Ok(format!("report ended\nstatus={status}"));
    }

    let exit = crate::tui::intake::run_intake_tui(flow)?;
    let mut lines = exit
        .closing_messages
        .iter()
        .map(|message| format!("bugdesk> {}", message.text))
        .collect::<Vec<_>>();
    lines.push("report ended".to_string());
    lines.push(format!("status={}", exit.status));
    Ok(lines.join("\n"))
}

/// Line-oriented conversation: one reply per input line. Ends when the
/// report is submitted, on `/exit`, or at end of input.
pub fn run_plain_session<R: BufRead, W: Write>(
    mut flow: IntakeFlow,
    input: R,
    mut output: W,
) -> Result<FlowStatus, String> {
    write_messages(&mut output, &flow.start())?;

    for line in input.lines() {
        let line = line.map_err(|e| format!("failed to read reply: {e}"))?;
        let result = match parse_intake_command(&line) {
            Some(IntakeCommand::Exit) => break,
            Some(IntakeCommand::Restart) => flow.restart(),
            Some(IntakeCommand::Retry) => flow.retry(),
            None => flow.reply(&line),
        };
        match result {
            Ok(messages) => write_messages(&mut output, &messages)?,
            Err(err) => write_refusal(&mut output, &err)?,
        }
        if flow.state().status() == FlowStatus::Submitted {
            break;
        }
    }

    output
        .flush()
        .map_err(|e| format!("failed to flush output: {e}"))?;
    Ok(flow.state().status())
}

fn write_messages<W: Write>(output: &mut W, messages: &[IntakeMessage]) -> Result<(), String> {
    for message in messages {
        writeln!(output, "bugdesk> {}", message.text)
            .map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}

fn write_refusal<W: Write>(output: &mut W, err: &IntakeError) -> Result<(), String> {
    writeln!(output, "system> {err}").map_err(|e| format!("failed to write output: {e}"))
}
