use crate::intake::environment::EnvironmentSuggestion;
use crate::intake::error::IntakeError;
use crate::intake::payload::render_summary;
use crate::intake::state::{ConversationState, FlowStatus};
use crate::intake::step::{IntakeStep, ReplyVerdict, INTAKE_STEPS};
use crate::submission::{SubmissionError, SubmissionId};

const GREETING_TEXT: &str =
    "Let's file a bug report. Answer each question; type /restart at any time to start over.";
const SUBMITTING_TEXT: &str = "Submitting your bug report...";
const CANCELLED_TEXT: &str = "Bug report cancelled. Type /restart to file a new one.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Prompt,
    Suggestion,
    Correction,
    Summary,
    Success,
    Error,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl IntakeMessage {
    fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEffect {
    None,
    /// The report was confirmed; the caller must submit it exactly once and
    /// feed the outcome to `complete_submission`.
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeTransition {
    pub state: ConversationState,
    pub messages: Vec<IntakeMessage>,
    pub effect: IntakeEffect,
}

impl IntakeTransition {
    fn emit(state: ConversationState, messages: Vec<IntakeMessage>) -> Self {
        Self {
            state,
            messages,
            effect: IntakeEffect::None,
        }
    }
}

pub fn start(suggestions: EnvironmentSuggestion) -> IntakeTransition {
    let state = ConversationState::new(suggestions);
    let mut messages = vec![IntakeMessage::new(MessageKind::Notice, GREETING_TEXT)];
    messages.extend(step_entry_messages(&state, IntakeStep::Title));
    IntakeTransition::emit(state, messages)
}

fn step_entry_messages(state: &ConversationState, step: IntakeStep) -> Vec<IntakeMessage> {
    if step == IntakeStep::Confirmation {
        return vec![
            IntakeMessage::new(
                MessageKind::Summary,
                render_summary(state.collected_fields()),
            ),
            IntakeMessage::new(MessageKind::Prompt, step.prompt()),
        ];
    }

    let mut messages = vec![IntakeMessage::new(
        MessageKind::Prompt,
        format!(
            "Step {} of {}: {}",
            step.index() + 1,
            INTAKE_STEPS.len(),
            step.prompt()
        ),
    )];
    if let Some(suggested) = step
        .field()
        .and_then(|field| state.suggestions().suggestion_for(field))
    {
        messages.push(IntakeMessage::new(
            MessageKind::Suggestion,
            format!("Detected: {suggested}. Reply with it or with your own value."),
        ));
    }
    messages
}

/// Applies one user reply to `state`.
///
/// Invalid replies produce a correction and an unchanged state. Replies to a
/// state that is no longer active are refused.
pub fn transition(
    state: &ConversationState,
    reply: &str,
) -> Result<IntakeTransition, IntakeError> {
    let step = match (state.status(), state.current_step()) {
        (FlowStatus::Active, Some(step)) => step,
        (status, _) => return Err(IntakeError::FlowClosed { status }),
    };

    match step.check(reply) {
        ReplyVerdict::Rejected { correction } => Ok(IntakeTransition::emit(
            state.clone(),
            vec![IntakeMessage::new(MessageKind::Correction, correction)],
        )),
        ReplyVerdict::Store(value) => {
            let next = state.advanced(step.field().map(|field| (field, value)));
            Ok(enter_next_step(next))
        }
        ReplyVerdict::Skip => Ok(enter_next_step(state.advanced(None))),
        ReplyVerdict::Confirmed => Ok(IntakeTransition {
            state: state.with_status(FlowStatus::Completed)?,
            messages: vec![IntakeMessage::new(MessageKind::Notice, SUBMITTING_TEXT)],
            effect: IntakeEffect::Submit,
        }),
        ReplyVerdict::Declined => Ok(IntakeTransition::emit(
            state.with_status(FlowStatus::Cancelled)?,
            vec![IntakeMessage::new(MessageKind::Notice, CANCELLED_TEXT)],
        )),
    }
}

fn enter_next_step(state: ConversationState) -> IntakeTransition {
    let messages = state
        .current_step()
        .map(|step| step_entry_messages(&state, step))
        .unwrap_or_default();
    IntakeTransition::emit(state, messages)
}

/// Records the outcome of the submission started by a `Submit` effect.
/// Collected fields are kept either way.
pub fn complete_submission(
    state: &ConversationState,
    outcome: &Result<SubmissionId, SubmissionError>,
) -> Result<IntakeTransition, IntakeError> {
    match outcome {
        Ok(id) => Ok(IntakeTransition::emit(
            state.with_status(FlowStatus::Submitted)?,
            vec![IntakeMessage::new(
                MessageKind::Success,
                format!("Thanks! Your bug report was submitted as {id}."),
            )],
        )),
        Err(err) => Ok(IntakeTransition::emit(
            state.with_status(FlowStatus::SubmissionFailed)?,
            vec![IntakeMessage::new(
                MessageKind::Error,
                format!(
                    "We couldn't submit your bug report: {err}. Your answers are kept; type /retry to submit again or /restart to start over."
                ),
            )],
        )),
    }
}

/// Re-opens a failed submission at the confirmation step with every
/// collected field intact.
pub fn resume_after_failure(state: &ConversationState) -> Result<IntakeTransition, IntakeError> {
    if state.status() != FlowStatus::SubmissionFailed {
        return Err(IntakeError::NothingToRetry {
            status: state.status(),
        });
    }
    let resumed = ConversationState::awaiting_confirmation(
        state.collected_fields().clone(),
        *state.suggestions(),
    );
    let messages = step_entry_messages(&resumed, IntakeStep::Confirmation);
    Ok(IntakeTransition::emit(resumed, messages))
}
