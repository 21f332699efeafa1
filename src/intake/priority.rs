use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

pub const ALL_PRIORITIES: [Priority; 4] = [
    Priority::Low,
    Priority::Medium,
    Priority::High,
    Priority::Critical,
];

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Exact, case-sensitive match against the four priority names.
    pub fn parse(raw: &str) -> Result<Self, String> {
        ALL_PRIORITIES
            .iter()
            .copied()
            .find(|priority| priority.as_str() == raw)
            .ok_or_else(|| format!("priority must be one of: {}", Self::choices()))
    }

    pub fn choices() -> String {
        ALL_PRIORITIES
            .iter()
            .map(|priority| priority.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
