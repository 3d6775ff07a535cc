//! Caller-supplied urgency levels.

use super::ParseTaskUrgencyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How pressing a task is. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskUrgency {
    /// Can wait.
    Low,
    /// Normal priority.
    Medium,
    /// Surfaces in the upcoming list earlier than other urgencies.
    High,
}

impl TaskUrgency {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TaskUrgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskUrgency {
    type Error = ParseTaskUrgencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskUrgencyError(value.to_owned())),
        }
    }
}

impl FromStr for TaskUrgency {
    type Err = ParseTaskUrgencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}
