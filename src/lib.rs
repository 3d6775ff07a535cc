//! Tasklane: task lifecycle tracking with a filterable query surface.
//!
//! This crate provides the task state machine, the storage boundary with
//! in-memory and `PostgreSQL` adapters, and the services an HTTP or CLI
//! layer calls to create, transition, and query tasks.
//!
//! # Architecture
//!
//! Tasklane follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, storage, and queries
//! - [`logging`]: Tracing subscriber setup

pub mod logging;
pub mod task;
