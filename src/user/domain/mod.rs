//! Domain model for user accounts.

mod ids;
mod user;

pub use ids::UserId;
pub use user::{NewUser, PersistedUserData, User, UserChangeset};
