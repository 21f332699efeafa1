use crate::intake::environment::{detect_environment, EnvironmentSuggestion};
use crate::intake::error::IntakeError;
use crate::intake::payload::{BugReportPayload, SubmissionMetadata};
use crate::intake::state::{ConversationState, FlowStatus};
use crate::intake::transitions::{self, IntakeEffect, IntakeMessage, IntakeTransition};
use crate::shared::ids::ReporterId;
use crate::shared::logging::IntakeLog;
use crate::submission::{SubmissionError, SubmissionId, SubmissionService};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeCommand {
    Restart,
    Retry,
    Exit,
}

pub fn parse_intake_command(input: &str) -> Option<IntakeCommand> {
    let command = input.trim();
    if command.eq_ignore_ascii_case("/restart") {
        Some(IntakeCommand::Restart)
    } else if command.eq_ignore_ascii_case("/retry") {
        Some(IntakeCommand::Retry)
    } else if ["/exit", "/quit"]
        .iter()
        .any(|exit| command.eq_ignore_ascii_case(exit))
    {
        Some(IntakeCommand::Exit)
    } else {
        None
    }
}

/// Who is reporting, from where, and with which client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeContext {
    pub page_url: String,
    pub reporter: ReporterId,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyOutcome {
    pub messages: Vec<IntakeMessage>,
    /// Set when the reply confirmed the report. The caller submits it and
    /// passes the result to `IntakeFlow::finish_submission`.
    pub submission: Option<BugReportPayload>,
}

pub struct IntakeFlow {
    context: IntakeContext,
    suggestions: EnvironmentSuggestion,
    service: Arc<dyn SubmissionService>,
    log: Option<IntakeLog>,
    state: ConversationState,
}

impl IntakeFlow {
    pub fn new(context: IntakeContext, service: Arc<dyn SubmissionService>) -> Self {
        let suggestions = detect_environment(&context.user_agent);
        Self {
            context,
            suggestions,
            service,
            log: None,
            state: ConversationState::new(suggestions),
        }
    }

    pub fn with_log(mut self, log: IntakeLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn context(&self) -> &IntakeContext {
        &self.context
    }

    pub fn suggestions(&self) -> &EnvironmentSuggestion {
        &self.suggestions
    }

    pub fn service(&self) -> Arc<dyn SubmissionService> {
        Arc::clone(&self.service)
    }

    pub fn start(&mut self) -> Vec<IntakeMessage> {
        self.log_info(
            "flow_started",
            &format!(
                "reporter={} page_url={}",
                self.context.reporter, self.context.page_url
            ),
        );
        self.commit(transitions::start(self.suggestions))
    }

    /// Discards the current conversation and begins anew. Refused while a
    /// confirmed report is still being submitted.
    pub fn restart(&mut self) -> Result<Vec<IntakeMessage>, IntakeError> {
        self.ensure_not_in_flight()?;
        self.log_info(
            "flow_restarted",
            &format!(
                "previous_status={} previous_step={}",
                self.state.status(),
                self.state.current_step_index()
            ),
        );
        Ok(self.start())
    }

    pub fn accept_reply(&mut self, reply: &str) -> Result<ReplyOutcome, IntakeError> {
        self.ensure_not_in_flight()?;
        let question = self.state.pending_question_id().unwrap_or("none");
        let next = transitions::transition(&self.state, reply)?;

        let submission = match next.effect {
            IntakeEffect::Submit => Some(self.assemble_payload(&next.state)?),
            IntakeEffect::None => None,
        };

        if next.state == self.state {
            self.log_warn("reply_rejected", &format!("question={question}"));
        } else if next.state.status() == FlowStatus::Cancelled {
            self.log_info("flow_cancelled", &format!("question={question}"));
        } else if submission.is_some() {
            self.log_info("submission_started", &format!("question={question}"));
        } else {
            self.log_info("reply_accepted", &format!("question={question}"));
        }

        Ok(ReplyOutcome {
            messages: self.commit(next),
            submission,
        })
    }

    pub fn finish_submission(
        &mut self,
        result: Result<SubmissionId, SubmissionError>,
    ) -> Result<Vec<IntakeMessage>, IntakeError> {
        let next = transitions::complete_submission(&self.state, &result)?;
        match &result {
            Ok(id) => self.log_info("submission_succeeded", &format!("id={id}")),
            Err(err) => self.log_error("submission_failed", &err.to_string()),
        }
        Ok(self.commit(next))
    }

    /// Applies a reply and, when it confirms the report, submits it inline.
    pub fn reply(&mut self, reply: &str) -> Result<Vec<IntakeMessage>, IntakeError> {
        let outcome = self.accept_reply(reply)?;
        let mut messages = outcome.messages;
        if let Some(payload) = outcome.submission {
            let result = self.service.create(&payload);
            messages.extend(self.finish_submission(result)?);
        }
        Ok(messages)
    }

    /// Returns a failed submission to the confirmation step.
    pub fn retry(&mut self) -> Result<Vec<IntakeMessage>, IntakeError> {
        let next = transitions::resume_after_failure(&self.state)?;
        self.log_info("submission_retry", "returned to confirmation");
        Ok(self.commit(next))
    }

    fn ensure_not_in_flight(&self) -> Result<(), IntakeError> {
        if self.state.status() == FlowStatus::Completed {
            return Err(IntakeError::SubmissionInFlight);
        }
        Ok(())
    }

    fn assemble_payload(&self, state: &ConversationState) -> Result<BugReportPayload, IntakeError> {
        BugReportPayload::assemble(
            state.collected_fields(),
            SubmissionMetadata::new(
                &self.context.page_url,
                self.context.reporter.clone(),
                chrono::Utc::now(),
            ),
        )
    }

    fn commit(&mut self, transition: IntakeTransition) -> Vec<IntakeMessage> {
        self.state = transition.state;
        transition.messages
    }

    fn log_info(&self, event: &str, message: &str) {
        if let Some(log) = &self.log {
            log.info(event, message);
        }
    }

    fn log_warn(&self, event: &str, message: &str) {
        if let Some(log) = &self.log {
            log.warn(event, message);
        }
    }

    fn log_error(&self, event: &str, message: &str) {
        if let Some(log) = &self.log {
            log.error(event, message);
        }
    }
}
