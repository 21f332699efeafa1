pub mod environment;
pub mod error;
pub mod flow;
pub mod payload;
pub mod priority;
pub mod state;
pub mod step;
pub mod transitions;

pub use environment::{detect_environment, EnvironmentSuggestion};
pub use error::IntakeError;
pub use flow::{parse_intake_command, IntakeCommand, IntakeContext, IntakeFlow, ReplyOutcome};
pub use payload::{BugReportPayload, SubmissionMetadata};
pub use priority::Priority;
pub use state::{CollectedFields, ConversationState, FlowStatus};
pub use step::{FieldKey, IntakeStep, ReplyRule, ReplyVerdict, INTAKE_STEPS};
pub use transitions::{IntakeEffect, IntakeMessage, IntakeTransition, MessageKind};
