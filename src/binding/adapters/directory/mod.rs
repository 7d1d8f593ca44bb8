//! [`UserDirectory`](crate::binding::ports::UserDirectory) implementations.

mod http;
mod local;

pub use http::HttpUserDirectory;
pub use local::LocalUserDirectory;
