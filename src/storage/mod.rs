//! Persistence plumbing shared by the user, task and binding adapters.
//!
//! - [`memory`] holds the table set behind every in-memory adapter.
//! - [`postgres`] holds the Diesel schema, pool construction and the
//!   blocking-call bridge used by every `PostgreSQL` adapter.

pub mod memory;
pub mod postgres;
