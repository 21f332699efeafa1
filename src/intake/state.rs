use crate::intake::environment::EnvironmentSuggestion;
use crate::intake::error::IntakeError;
use crate::intake::step::{FieldKey, IntakeStep};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStatus {
    Active,
    Cancelled,
    Completed,
    Submitted,
    SubmissionFailed,
}

impl FlowStatus {
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (FlowStatus::Active, FlowStatus::Cancelled)
                | (FlowStatus::Active, FlowStatus::Completed)
                | (FlowStatus::Completed, FlowStatus::Submitted)
                | (FlowStatus::Completed, FlowStatus::SubmissionFailed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FlowStatus::Cancelled | FlowStatus::Submitted | FlowStatus::SubmissionFailed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowStatus::Active => "active",
            FlowStatus::Cancelled => "cancelled",
            FlowStatus::Completed => "completed",
            FlowStatus::Submitted => "submitted",
            FlowStatus::SubmissionFailed => "submission_failed",
        }
    }
}

impl std::fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectedFields(BTreeMap<FieldKey, String>);

impl CollectedFields {
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    fn insert(&mut self, key: FieldKey, value: String) {
        self.0.insert(key, value);
    }
}

/// Snapshot of one intake conversation.
///
/// Values are never mutated in place; every reply produces a new state via
/// the functions in `intake::transitions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    current_step_index: usize,
    collected_fields: CollectedFields,
    pending_question: Option<IntakeStep>,
    status: FlowStatus,
    suggestions: EnvironmentSuggestion,
}

impl ConversationState {
    pub fn new(suggestions: EnvironmentSuggestion) -> Self {
        Self {
            current_step_index: 0,
            collected_fields: CollectedFields::default(),
            pending_question: Some(IntakeStep::Title),
            status: FlowStatus::Active,
            suggestions,
        }
    }

    /// Active state parked on the confirmation step with `fields` already
    /// collected. Used to re-trigger a submission that failed.
    pub(crate) fn awaiting_confirmation(
        fields: CollectedFields,
        suggestions: EnvironmentSuggestion,
    ) -> Self {
        Self {
            current_step_index: IntakeStep::Confirmation.index(),
            collected_fields: fields,
            pending_question: Some(IntakeStep::Confirmation),
            status: FlowStatus::Active,
            suggestions,
        }
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> Option<IntakeStep> {
        IntakeStep::from_index(self.current_step_index)
    }

    pub fn collected_fields(&self) -> &CollectedFields {
        &self.collected_fields
    }

    pub fn pending_question(&self) -> Option<IntakeStep> {
        self.pending_question
    }

    pub fn pending_question_id(&self) -> Option<&'static str> {
        self.pending_question.map(IntakeStep::question_id)
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    pub fn suggestions(&self) -> &EnvironmentSuggestion {
        &self.suggestions
    }

    /// Moves past the current step, recording `value` when one is given.
    pub(crate) fn advanced(&self, value: Option<(FieldKey, String)>) -> Self {
        let mut next = self.clone();
        if let Some((key, value)) = value {
            next.collected_fields.insert(key, value);
        }
        next.current_step_index += 1;
        next.pending_question = next.current_step();
        next
    }

    pub(crate) fn with_status(&self, status: FlowStatus) -> Result<Self, IntakeError> {
        if !self.status.can_transition_to(status) {
            return Err(IntakeError::InvalidStatusTransition {
                from: self.status,
                to: status,
            });
        }
        let mut next = self.clone();
        next.status = status;
        next.pending_question = None;
        Ok(next)
    }
}
