//! Adapter implementations for user persistence.

pub mod memory;
pub mod postgres;
