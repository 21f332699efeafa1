use crate::intake::{
    parse_intake_command, FlowStatus, IntakeCommand, IntakeFlow, IntakeMessage, IntakeStep,
    MessageKind,
};
use crate::submission::{SubmissionError, SubmissionId};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const PROCESSING_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);
const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct TranscriptLine {
    speaker: &'static str,
    kind: Option<MessageKind>,
    text: String,
}

struct SubmissionWorker {
    result_rx: Receiver<Result<SubmissionId, SubmissionError>>,
}

struct TuiState {
    input: String,
    transcript: Vec<TranscriptLine>,
    submitting: Option<SubmissionWorker>,
    spinner_index: usize,
    last_spinner_tick: Instant,
    cursor_visible: bool,
    last_cursor_tick: Instant,
}

impl TuiState {
    fn new() -> Self {
        Self {
            input: String::new(),
            transcript: Vec::new(),
            submitting: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
            cursor_visible: true,
            last_cursor_tick: Instant::now(),
        }
    }

    fn push_messages(&mut self, messages: Vec<IntakeMessage>) {
        for message in messages {
            self.transcript.push(TranscriptLine {
                speaker: "bugdesk",
                kind: Some(message.kind),
                text: message.text,
            });
        }
    }

    fn push_system(&mut self, text: impl Into<String>) {
        self.transcript.push(TranscriptLine {
            speaker: "system",
            kind: None,
            text: text.into(),
        });
    }

    fn spinner_frame(&self) -> &'static str {
        PROCESSING_FRAMES[self.spinner_index % PROCESSING_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.submitting.is_some() && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % PROCESSING_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    fn status_line(&self, status: FlowStatus) -> String {
        if self.submitting.is_some() {
            return format!("submitting report {}", self.spinner_frame());
        }
        match status {
            FlowStatus::Active => "type your answer and press Enter; /restart or /exit".to_string(),
            FlowStatus::Submitted => "report submitted; /restart for another or Esc to exit"
                .to_string(),
            FlowStatus::SubmissionFailed => {
                "submission failed; /retry to resubmit or /restart".to_string()
            }
            FlowStatus::Cancelled => "report cancelled; /restart or Esc to exit".to_string(),
            FlowStatus::Completed => "waiting for submission result".to_string(),
        }
    }

    fn advance_cursor_blink_if_needed(&mut self) {
        if self.last_cursor_tick.elapsed() >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_tick = Instant::now();
        }
    }

    fn cursor_suffix(&self) -> &'static str {
        if self.cursor_visible {
            "█"
        } else {
            " "
        }
    }
}

/// How an interactive intake session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeTuiExit {
    pub status: FlowStatus,
    /// Outcome of a submission that was still running when the user left.
    pub closing_messages: Vec<IntakeMessage>,
}

pub fn run_intake_tui(mut flow: IntakeFlow) -> Result<IntakeTuiExit, String> {
    let mut terminal = setup_terminal()?;
    let mut state = TuiState::new();
    state.push_messages(flow.start());

    let result = run_event_loop(&mut terminal, &mut flow, &mut state);
    teardown_terminal(&mut terminal)?;
    let closing_messages = wait_for_submission(&mut flow, &mut state)?;
    result?;

    Ok(IntakeTuiExit {
        status: flow.state().status(),
        closing_messages,
    })
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    flow: &mut IntakeFlow,
    state: &mut TuiState,
) -> Result<(), String> {
    loop {
        state.advance_spinner_if_needed();
        state.advance_cursor_blink_if_needed();
        check_submission_result(flow, state)?;
        draw_intake_ui(terminal, flow, state)?;

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }

        let Event::Key(key) = event::read().map_err(|e| format!("failed to read event: {e}"))?
        else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            break;
        }

        match key.code {
            KeyCode::Esc => break,
            KeyCode::Enter => {
                if submit_input(flow, state) == InputAction::Exit {
                    break;
                }
            }
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Char(c) => {
                state.input.push(c);
            }
            _ => {}
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputAction {
    Continue,
    Exit,
}

fn submit_input(flow: &mut IntakeFlow, state: &mut TuiState) -> InputAction {
    let reply = state.input.trim().to_string();
    state.input.clear();
    // Enter on an empty line is only an answer where blank skips the question.
    if reply.is_empty() && flow.state().pending_question() != Some(IntakeStep::Screenshot) {
        return InputAction::Continue;
    }
    if parse_intake_command(&reply) == Some(IntakeCommand::Exit) {
        return InputAction::Exit;
    }
    if state.submitting.is_some() {
        state.push_system("still submitting the report; please wait");
        return InputAction::Continue;
    }
    handle_reply(flow, state, &reply);
    InputAction::Continue
}

fn handle_reply(flow: &mut IntakeFlow, state: &mut TuiState, reply: &str) {
    match parse_intake_command(reply) {
        Some(IntakeCommand::Restart) => match flow.restart() {
            Ok(messages) => {
                state.transcript.clear();
                state.push_messages(messages);
            }
            Err(err) => state.push_system(err.to_string()),
        },
        Some(IntakeCommand::Retry) => match flow.retry() {
            Ok(messages) => state.push_messages(messages),
            Err(err) => state.push_system(err.to_string()),
        },
        Some(IntakeCommand::Exit) => {}
        None => {
            state.transcript.push(TranscriptLine {
                speaker: "you",
                kind: None,
                text: reply.to_string(),
            });
            match flow.accept_reply(reply) {
                Ok(outcome) => {
                    state.push_messages(outcome.messages);
                    if let Some(payload) = outcome.submission {
                        let service = flow.service();
                        let (tx, rx) = mpsc::channel();
                        thread::spawn(move || {
                            let _ = tx.send(service.create(&payload));
                        });
                        state.submitting = Some(SubmissionWorker { result_rx: rx });
                        state.spinner_index = 0;
                        state.last_spinner_tick = Instant::now();
                    }
                }
                Err(err) => state.push_system(err.to_string()),
            }
        }
    }
}

fn check_submission_result(flow: &mut IntakeFlow, state: &mut TuiState) -> Result<(), String> {
    let Some(worker) = state.submitting.take() else {
        return Ok(());
    };

    match worker.result_rx.try_recv() {
        Ok(result) => match flow.finish_submission(result) {
            Ok(messages) => state.push_messages(messages),
            Err(err) => state.push_system(err.to_string()),
        },
        Err(mpsc::TryRecvError::Empty) => {
            state.submitting = Some(worker);
        }
        Err(mpsc::TryRecvError::Disconnected) => {
            return Err("submission worker disconnected unexpectedly".to_string());
        }
    }

    Ok(())
}

/// Blocks until a submission started before exit reports back, so leaving
/// the UI never abandons a confirmed report.
fn wait_for_submission(
    flow: &mut IntakeFlow,
    state: &mut TuiState,
) -> Result<Vec<IntakeMessage>, String> {
    let Some(worker) = state.submitting.take() else {
        return Ok(Vec::new());
    };
    let result = worker
        .result_rx
        .recv()
        .map_err(|_| "submission worker disconnected unexpectedly".to_string())?;
    flow.finish_submission(result).map_err(|e| e.to_string())
}

fn line_style(line: &TranscriptLine) -> Style {
    match (line.speaker, line.kind) {
        ("you", _) => Style::default().fg(Color::Yellow),
        (_, Some(MessageKind::Correction)) | (_, Some(MessageKind::Error)) => {
            Style::default().fg(Color::Red)
        }
        (_, Some(MessageKind::Success)) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        (_, Some(MessageKind::Suggestion)) => Style::default().fg(Color::Cyan),
        (_, Some(MessageKind::Prompt)) | (_, Some(MessageKind::Summary)) => {
            Style::default().fg(Color::White)
        }
        _ => Style::default().fg(Color::Gray),
    }
}

fn draw_intake_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    flow: &IntakeFlow,
    state: &TuiState,
) -> Result<(), String> {
    let status = flow.state().status();
    let suggestions = flow.suggestions();
    terminal
        .draw(|frame| {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(8),
                    Constraint::Length(3),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            let header = Paragraph::new(vec![
                Line::raw(format!(
                    "reporter={} page={}",
                    flow.context().reporter,
                    flow.context().page_url
                )),
                Line::raw(format!(
                    "detected device={} browser={} os={}",
                    suggestions.device.label(),
                    suggestions.browser.label(),
                    suggestions.os.label()
                )),
            ])
            .block(
                Block::default()
                    .title("Bug report")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
            frame.render_widget(header, sections[0]);

            let transcript = state
                .transcript
                .iter()
                .flat_map(|line| {
                    let style = line_style(line);
                    line.text
                        .lines()
                        .enumerate()
                        .map(|(index, text)| {
                            if index == 0 {
                                Line::styled(format!("{}> {}", line.speaker, text), style)
                            } else {
                                Line::styled(format!("  {text}"), style)
                            }
                        })
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            let transcript_widget = Paragraph::new(transcript)
                .block(Block::default().title("Conversation").borders(Borders::ALL))
                .wrap(Wrap { trim: false });
            frame.render_widget(transcript_widget, sections[1]);

            let status_widget = Paragraph::new(state.status_line(status)).block(
                Block::default()
                    .title(format!("Status: {status}"))
                    .borders(Borders::ALL)
                    .border_style(if state.submitting.is_some() {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    }),
            );
            frame.render_widget(status_widget, sections[2]);

            let input_widget =
                Paragraph::new(format!("you> {}{}", state.input, state.cursor_suffix()))
                    .block(Block::default().title("Reply").borders(Borders::ALL));
            frame.render_widget(input_widget, sections[3]);
        })
        .map_err(|e| format!("failed to render bug report UI: {e}"))?;

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to initialize terminal: {e}"))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}
