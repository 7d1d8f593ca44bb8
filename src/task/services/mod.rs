//! Application services for owner-scoped task management.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, PatchTaskRequest, ReplaceTaskRequest, TaskService, TaskServiceError,
    TaskServiceResult,
};
