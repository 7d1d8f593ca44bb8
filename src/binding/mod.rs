//! Binding a chat identity to a user's email.
//!
//! A chat channel is bound to an email only after a [`ports::UserDirectory`]
//! confirms a user holds that email. The directory may be the local user
//! service or a remote user registry reached over HTTP; the workflow cannot
//! tell them apart.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
