//! Task tracking scoped to owning users.
//!
//! Every task belongs to exactly one user. Owner-scoped operations treat a
//! task owned by someone else exactly like a missing task, so callers cannot
//! learn about other users' tasks. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
