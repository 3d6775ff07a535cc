//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod predicate;
pub mod repository;

pub use predicate::{TaskOrder, TaskPredicate, TaskQuery, Window};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
