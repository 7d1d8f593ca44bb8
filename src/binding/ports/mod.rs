//! Port contracts for the binding workflow.

pub mod directory;
pub mod repository;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
pub use repository::{BindingRepository, BindingRepositoryError, BindingRepositoryResult};

#[cfg(test)]
pub use directory::MockUserDirectory;
#[cfg(test)]
pub use repository::MockBindingRepository;
