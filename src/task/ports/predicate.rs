//! Storage-agnostic predicates, ordering, and windows for task queries.
//!
//! Adapters either evaluate a [`TaskPredicate`] directly through
//! [`TaskPredicate::matches`] or translate the tree into their native query
//! language. Both paths must agree on the semantics documented here.

use crate::task::domain::{Task, TaskStatus, TaskUrgency};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Boolean condition over task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskPredicate {
    /// Matches every task.
    All,
    /// Status equals the value.
    StatusIs(TaskStatus),
    /// Status differs from the value.
    StatusIsNot(TaskStatus),
    /// Status is none of the values.
    StatusNotIn(Vec<TaskStatus>),
    /// Urgency equals the value.
    UrgencyIs(TaskUrgency),
    /// Deadline date is strictly before the value.
    DeadlineBefore(NaiveDate),
    /// Deadline date is on or before the value.
    DeadlineOnOrBefore(NaiveDate),
    /// Title contains the text, ignoring case. The text is matched literally.
    TitleContains(String),
    /// Every inner predicate holds; empty means true.
    And(Vec<TaskPredicate>),
    /// At least one inner predicate holds; empty means false.
    Or(Vec<TaskPredicate>),
}

impl TaskPredicate {
    /// Combines predicates with logical AND, flattening `All` terms away.
    #[must_use]
    pub fn all_of(predicates: impl IntoIterator<Item = Self>) -> Self {
        let mut terms: Vec<Self> = predicates
            .into_iter()
            .filter(|predicate| *predicate != Self::All)
            .collect();
        if terms.len() > 1 {
            return Self::And(terms);
        }
        terms.pop().unwrap_or(Self::All)
    }

    /// Combines predicates with logical OR.
    #[must_use]
    pub fn any_of(predicates: impl IntoIterator<Item = Self>) -> Self {
        Self::Or(predicates.into_iter().collect())
    }

    /// Evaluates the predicate against a task.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::StatusIs(status) => task.status() == *status,
            Self::StatusIsNot(status) => task.status() != *status,
            Self::StatusNotIn(statuses) => !statuses.contains(&task.status()),
            Self::UrgencyIs(urgency) => task.urgency() == *urgency,
            Self::DeadlineBefore(date) => task.deadline().date() < *date,
            Self::DeadlineOnOrBefore(date) => task.deadline().date() <= *date,
            Self::TitleContains(text) => task
                .title()
                .as_str()
                .to_lowercase()
                .contains(&text.to_lowercase()),
            Self::And(terms) => terms.iter().all(|term| term.matches(task)),
            Self::Or(terms) => terms.iter().any(|term| term.matches(task)),
        }
    }
}

/// Result ordering for task queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskOrder {
    /// Newest-created first.
    #[default]
    CreatedAtDesc,
    /// Earliest deadline date first.
    DeadlineAsc,
}

impl TaskOrder {
    /// Compares two tasks under this ordering.
    ///
    /// Ties fall back to the task identifier so results are deterministic.
    #[must_use]
    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        let primary = match self {
            Self::CreatedAtDesc => right.created_at().cmp(&left.created_at()),
            Self::DeadlineAsc => left.deadline().date().cmp(&right.deadline().date()),
        };
        primary.then_with(|| left.id().cmp(&right.id()))
    }
}

/// Slice of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Records to skip.
    pub skip: u64,
    /// Maximum records to return.
    pub limit: u64,
}

impl Window {
    /// Builds the window for a 1-based page. Zero inputs are treated as 1.
    #[must_use]
    pub fn page(page: u32, page_size: u32) -> Self {
        let page = u64::from(page.max(1));
        let limit = u64::from(page_size.max(1));
        Self {
            skip: (page - 1).saturating_mul(limit),
            limit,
        }
    }
}

/// Complete find request handed to a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Records to match.
    pub predicate: TaskPredicate,
    /// Result ordering.
    pub order: TaskOrder,
    /// Optional slice; `None` returns every match.
    pub window: Option<Window>,
}

impl TaskQuery {
    /// Creates an unpaginated query with the default ordering.
    #[must_use]
    pub fn new(predicate: TaskPredicate) -> Self {
        Self {
            predicate,
            order: TaskOrder::default(),
            window: None,
        }
    }

    /// Sets the result ordering.
    #[must_use]
    pub const fn ordered_by(mut self, order: TaskOrder) -> Self {
        self.order = order;
        self
    }

    /// Restricts results to a window.
    #[must_use]
    pub const fn windowed(mut self, window: Window) -> Self {
        self.window = Some(window);
        self
    }
}
