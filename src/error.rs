//! Transport-agnostic classification of service failures.
//!
//! Each service error reports one [`ErrorKind`] so the HTTP or RPC layer can
//! choose a status code without matching on every variant.

use std::fmt;

/// Failure category shared by all services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested record does not exist or belongs to another owner.
    NotFound,
    /// Client-supplied data violates a domain rule.
    Validation,
    /// The persistence backend failed.
    Store,
    /// The user-existence check itself failed.
    Lookup,
}

impl ErrorKind {
    /// Returns a stable machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Store => "store",
            Self::Lookup => "lookup",
        }
    }

    /// Returns `true` for the expected, caller-correctable outcomes.
    ///
    /// Store and lookup failures are unexpected and should be logged by the
    /// surrounding system.
    #[must_use]
    pub const fn is_expected(self) -> bool {
        matches!(self, Self::NotFound | Self::Validation)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
