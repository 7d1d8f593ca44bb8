//! Application services for user account management.

mod lifecycle;

pub use lifecycle::{
    CreateUserRequest, PatchUserRequest, ReplaceUserRequest, UserService, UserServiceError,
    UserServiceResult,
};
