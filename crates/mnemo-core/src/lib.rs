//! Session & memory synchronization core for mnemo.
//!
//! This crate defines the "ports" ([`transport::Transport`],
//! [`session::CredentialStore`]) that the infrastructure layer implements,
//! the session/cache/chat state holders, and the
//! [`manager::SessionManager`] facade that serializes all authenticated
//! network operations. It depends only on `mnemo-types` -- never on
//! reqwest or any IO crate.

pub mod chat;
pub mod coordinator;
pub mod manager;
pub mod memory;
pub mod session;
pub mod transport;
