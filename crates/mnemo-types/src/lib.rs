//! Shared domain types for mnemo.
//!
//! This crate contains the data shapes used across the client: the session
//! credential, memory records, chat exchanges, and the per-operation error
//! taxonomies. Zero infrastructure dependencies -- only serde, chrono,
//! secrecy, thiserror.

pub mod chat;
pub mod credential;
pub mod error;
pub mod memory;
