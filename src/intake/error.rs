use crate::intake::state::FlowStatus;
use crate::intake::step::FieldKey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("bug report conversation is {status}; type /restart to file another report")]
    FlowClosed { status: FlowStatus },
    #[error("a submission is already in flight; wait for it to finish")]
    SubmissionInFlight,
    #[error("intake status transition `{from}` -> `{to}` is invalid")]
    InvalidStatusTransition { from: FlowStatus, to: FlowStatus },
    #[error("cannot assemble bug report: field `{field}` was not collected")]
    MissingField { field: FieldKey },
    #[error("stored priority `{0}` is not one of Low, Medium, High, Critical")]
    InvalidPriority(String),
    #[error("there is no failed submission to retry (conversation is {status})")]
    NothingToRetry { status: FlowStatus },
}
