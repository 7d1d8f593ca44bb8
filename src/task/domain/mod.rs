//! Domain model for tasks.
//!
//! Besides the [`Task`] aggregate this module owns the write models used by
//! the service: [`NewTask`] for inserts and [`TaskChangeset`] for the
//! field-level updates behind both full replacement and partial patches.

mod changeset;
mod ids;
mod status;
mod task;

pub use changeset::{DueAtChange, TaskChangeset};
pub use ids::TaskId;
pub use status::{Priority, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
