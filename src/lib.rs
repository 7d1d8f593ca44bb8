//! Taskmanager: users, owner-scoped tasks and chat identity bindings.
//!
//! This crate holds the resource lifecycle of a task-tracking backend: how
//! users and tasks are created, replaced, patched, queried and deleted, and
//! how a chat identity is bound to a user's email. Transport layers (HTTP,
//! RPC, chat delivery) sit outside the crate and call the services.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   HTTP)
//! - **Services**: Validation, ownership enforcement and orchestration
//!
//! # Modules
//!
//! - [`validation`]: Field-level rules shared by the services
//! - [`user`]: User accounts
//! - [`task`]: Tasks scoped to their owning user
//! - [`binding`]: Email to chat identity bindings
//! - [`storage`]: Shared persistence plumbing
//! - [`config`]: Layered application configuration
//! - [`telemetry`]: Structured logging bootstrap
//! - [`error`]: Transport-agnostic failure classification

pub mod binding;
pub mod config;
pub mod error;
pub mod storage;
pub mod task;
pub mod telemetry;
pub mod user;
pub mod validation;

#[cfg(test)]
mod test_support;
