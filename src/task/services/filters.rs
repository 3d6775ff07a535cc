//! Predicate builders for task listings and date classifications.
//!
//! These are pure functions of their inputs; "today" is always supplied by the
//! caller so the rules can be exercised without a clock.

use super::TaskQueryConfig;
use crate::task::{
    domain::{TaskStatus, TaskUrgency},
    ports::TaskPredicate,
};
use chrono::{Days, NaiveDate};

/// Filter parameters of a task listing, without pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListFilter {
    /// Case-insensitive title search; blank text is ignored.
    pub search: Option<String>,
    /// Exact status to match.
    pub status: Option<TaskStatus>,
    /// Exact urgency to match.
    pub urgency: Option<TaskUrgency>,
    /// Whether deleted tasks are listed when no status is requested.
    pub include_deleted: bool,
}

/// Builds the predicate for a task listing.
///
/// Deleted tasks are excluded unless `include_deleted` is set or the status
/// filter explicitly asks for [`TaskStatus::Deleted`].
#[must_use]
pub fn list_predicate(filter: &TaskListFilter) -> TaskPredicate {
    let mut terms = Vec::new();

    if !filter.include_deleted && filter.status != Some(TaskStatus::Deleted) {
        terms.push(TaskPredicate::StatusIsNot(TaskStatus::Deleted));
    }
    if let Some(status) = filter.status {
        terms.push(TaskPredicate::StatusIs(status));
    }
    if let Some(urgency) = filter.urgency {
        terms.push(TaskPredicate::UrgencyIs(urgency));
    }
    if let Some(search) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        terms.push(TaskPredicate::TitleContains(search.to_owned()));
    }

    TaskPredicate::all_of(terms)
}

fn open_work() -> TaskPredicate {
    TaskPredicate::StatusNotIn(vec![TaskStatus::Completed, TaskStatus::Deleted])
}

/// Open tasks whose deadline date is before `today`.
#[must_use]
pub fn overdue_predicate(today: NaiveDate) -> TaskPredicate {
    TaskPredicate::all_of([open_work(), TaskPredicate::DeadlineBefore(today)])
}

/// Open tasks due within the universal window, or within the longer window
/// when urgency is high.
#[must_use]
pub fn upcoming_predicate(today: NaiveDate, config: &TaskQueryConfig) -> TaskPredicate {
    let due_soon = days_after(today, config.due_soon_days);
    let high_urgency_horizon = days_after(today, config.high_urgency_days);

    TaskPredicate::all_of([
        open_work(),
        TaskPredicate::any_of([
            TaskPredicate::DeadlineOnOrBefore(due_soon),
            TaskPredicate::all_of([
                TaskPredicate::UrgencyIs(TaskUrgency::High),
                TaskPredicate::DeadlineOnOrBefore(high_urgency_horizon),
            ]),
        ]),
    ])
}

/// Adds whole days, saturating at the last representable date.
fn days_after(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}
