//! Adapter implementations for binding persistence and user lookup.

pub mod directory;
pub mod memory;
pub mod postgres;
