//! Tunable defaults for the task query service.

use serde::Deserialize;

/// Configuration for task listing and date classification.
///
/// # Examples
///
/// ```
/// use tasklane::task::services::TaskQueryConfig;
///
/// let config = TaskQueryConfig::default();
/// assert_eq!(config.default_page_size, 10);
/// assert_eq!(config.due_soon_days, 1);
/// assert_eq!(config.high_urgency_days, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskQueryConfig {
    /// Page size used when a list request does not name one.
    pub default_page_size: u32,
    /// Days ahead of today that count as upcoming for every urgency.
    pub due_soon_days: u32,
    /// Days ahead of today that count as upcoming for high-urgency tasks.
    pub high_urgency_days: u32,
}

impl Default for TaskQueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            due_soon_days: 1,
            high_urgency_days: 3,
        }
    }
}

impl TaskQueryConfig {
    /// Parses a configuration from JSON, filling omitted fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the input is not a valid
    /// configuration object.
    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
