use crate::intake::priority::Priority;
use serde::{Deserialize, Serialize};

const SKIP_REPLY: &str = "skip";
const CONFIRM_REPLY: &str = "yes";

/// Keys of the collected bug-report fields, serialized with the names the
/// reporting backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Title,
    Description,
    StepsToReproduce,
    ExpectedBehavior,
    ActualBehavior,
    Device,
    Browser,
    Os,
    Priority,
    ScreenshotRef,
}

impl FieldKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::StepsToReproduce => "stepsToReproduce",
            Self::ExpectedBehavior => "expectedBehavior",
            Self::ActualBehavior => "actualBehavior",
            Self::Device => "device",
            Self::Browser => "browser",
            Self::Os => "os",
            Self::Priority => "priority",
            Self::ScreenshotRef => "screenshotRef",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::StepsToReproduce => "Steps to reproduce",
            Self::ExpectedBehavior => "Expected behavior",
            Self::ActualBehavior => "Actual behavior",
            Self::Device => "Device",
            Self::Browser => "Browser",
            Self::Os => "OS",
            Self::Priority => "Priority",
            Self::ScreenshotRef => "Screenshot",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntakeStep {
    Title,
    Description,
    StepsToReproduce,
    ExpectedBehavior,
    ActualBehavior,
    Device,
    Browser,
    Os,
    Priority,
    Screenshot,
    Confirmation,
}

pub const INTAKE_STEPS: [IntakeStep; 11] = [
    IntakeStep::Title,
    IntakeStep::Description,
    IntakeStep::StepsToReproduce,
    IntakeStep::ExpectedBehavior,
    IntakeStep::ActualBehavior,
    IntakeStep::Device,
    IntakeStep::Browser,
    IntakeStep::Os,
    IntakeStep::Priority,
    IntakeStep::Screenshot,
    IntakeStep::Confirmation,
];

impl IntakeStep {
    pub fn from_index(index: usize) -> Option<Self> {
        INTAKE_STEPS.get(index).copied()
    }

    pub fn index(self) -> usize {
        INTAKE_STEPS
            .iter()
            .position(|step| *step == self)
            .unwrap_or(INTAKE_STEPS.len())
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Identifier of the question this step asks.
    pub fn question_id(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::StepsToReproduce => "steps_to_reproduce",
            Self::ExpectedBehavior => "expected_behavior",
            Self::ActualBehavior => "actual_behavior",
            Self::Device => "device",
            Self::Browser => "browser",
            Self::Os => "os",
            Self::Priority => "priority",
            Self::Screenshot => "screenshot",
            Self::Confirmation => "confirmation",
        }
    }

    pub fn field(self) -> Option<FieldKey> {
        match self {
            Self::Title => Some(FieldKey::Title),
            Self::Description => Some(FieldKey::Description),
            Self::StepsToReproduce => Some(FieldKey::StepsToReproduce),
            Self::ExpectedBehavior => Some(FieldKey::ExpectedBehavior),
            Self::ActualBehavior => Some(FieldKey::ActualBehavior),
            Self::Device => Some(FieldKey::Device),
            Self::Browser => Some(FieldKey::Browser),
            Self::Os => Some(FieldKey::Os),
            Self::Priority => Some(FieldKey::Priority),
            Self::Screenshot => Some(FieldKey::ScreenshotRef),
            Self::Confirmation => None,
        }
    }

    pub fn rule(self) -> ReplyRule {
        match self {
            Self::Title => ReplyRule::MinLength(5),
            Self::Description
            | Self::StepsToReproduce
            | Self::ExpectedBehavior
            | Self::ActualBehavior => ReplyRule::MinLength(10),
            Self::Device | Self::Browser | Self::Os => ReplyRule::NonEmpty,
            Self::Priority => ReplyRule::Priority,
            Self::Screenshot => ReplyRule::Optional,
            Self::Confirmation => ReplyRule::Confirmation,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Title => "What's a short title for the bug?",
            Self::Description => "Describe the problem in a sentence or two.",
            Self::StepsToReproduce => "What steps reproduce it? List them in order.",
            Self::ExpectedBehavior => "What did you expect to happen?",
            Self::ActualBehavior => "What actually happened?",
            Self::Device => "Which device were you using?",
            Self::Browser => "Which browser were you using?",
            Self::Os => "Which operating system were you on?",
            Self::Priority => "How urgent is it? Reply Low, Medium, High or Critical.",
            Self::Screenshot => {
                "Paste a screenshot link or file reference, or reply skip if you have none."
            }
            Self::Confirmation => "Submit this report? Reply yes to submit or no to cancel.",
        }
    }

    pub fn check(self, reply: &str) -> ReplyVerdict {
        self.rule().check(self.field(), reply)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyRule {
    MinLength(usize),
    NonEmpty,
    Priority,
    Optional,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyVerdict {
    Store(String),
    Skip,
    Confirmed,
    Declined,
    Rejected { correction: String },
}

impl ReplyRule {
    /// Applies the rule to a raw reply. Surrounding whitespace is trimmed
    /// before measuring and storing; lengths count characters.
    pub fn check(self, field: Option<FieldKey>, reply: &str) -> ReplyVerdict {
        let value = reply.trim();
        let label = field.map(FieldKey::label).unwrap_or("Reply");
        match self {
            ReplyRule::MinLength(min) => {
                let len = value.chars().count();
                if len >= min {
                    ReplyVerdict::Store(value.to_string())
                } else {
                    ReplyVerdict::Rejected {
                        correction: format!(
                            "{label} must be at least {min} characters long (got {len}). Please try again."
                        ),
                    }
                }
            }
            ReplyRule::NonEmpty => {
                if value.is_empty() {
                    ReplyVerdict::Rejected {
                        correction: format!("{label} can't be empty. Please try again."),
                    }
                } else {
                    ReplyVerdict::Store(value.to_string())
                }
            }
            ReplyRule::Priority => match Priority::parse(value) {
                Ok(priority) => ReplyVerdict::Store(priority.as_str().to_string()),
                Err(_) => ReplyVerdict::Rejected {
                    correction: format!(
                        "Priority must be exactly one of: {}.",
                        Priority::choices()
                    ),
                },
            },
            ReplyRule::Optional => {
                if value.is_empty() || value.eq_ignore_ascii_case(SKIP_REPLY) {
                    ReplyVerdict::Skip
                } else {
                    ReplyVerdict::Store(value.to_string())
                }
            }
            ReplyRule::Confirmation => {
                if value.eq_ignore_ascii_case(CONFIRM_REPLY) {
                    ReplyVerdict::Confirmed
                } else {
                    ReplyVerdict::Declined
                }
            }
        }
    }
}
