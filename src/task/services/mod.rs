//! Application services for task lifecycle orchestration and queries.

mod config;
mod error;
pub mod filters;
mod lifecycle;
mod query;

pub use config::TaskQueryConfig;
pub use error::{TaskErrorKind, TaskServiceError, TaskServiceResult};
pub use filters::TaskListFilter;
pub use lifecycle::{
    CreateTaskRequest, TaskDetailsRequest, TaskLifecycleService, UpdateTaskDetailsRequest,
};
pub use query::{ListTasksRequest, TaskPage, TaskQueryService, TaskStats};
