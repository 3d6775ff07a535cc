//! Domain model for task lifecycle management.
//!
//! The task domain owns the lifecycle state machine and the timestamp
//! invariants attached to each transition while keeping all infrastructure
//! concerns outside of the domain boundary.

mod error;
mod ids;
mod status;
mod task;
mod urgency;

pub use error::{ParseTaskStatusError, ParseTaskUrgencyError, TaskDomainError};
pub use ids::{TaskDeadline, TaskId, TaskTitle};
pub use status::{TaskStatus, TaskTransition};
pub use task::{PersistedTaskData, Task, TaskDetails};
pub use urgency::TaskUrgency;
