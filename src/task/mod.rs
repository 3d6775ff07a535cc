//! Task tracking: lifecycle transitions and the query surface.
//!
//! A task moves between created, in-progress, completed, and deleted states
//! under the rules in [`domain::TaskStatus::permits`]. Listings, overdue and
//! upcoming views, and per-status statistics are built from storage-agnostic
//! predicates. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
