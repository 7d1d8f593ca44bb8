//! Domain model for chat bindings.

mod binding;
mod ids;

pub use binding::Binding;
pub use ids::ChatId;
