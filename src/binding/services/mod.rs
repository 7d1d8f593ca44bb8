//! Application services for the chat binding workflow.

mod linking;

pub use linking::{BindingService, BindingServiceError, BindingServiceResult};
