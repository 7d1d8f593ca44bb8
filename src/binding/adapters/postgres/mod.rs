//! `PostgreSQL` adapter for binding persistence.

mod models;
mod repository;

pub use repository::PostgresBindingRepository;
