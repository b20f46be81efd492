//! Infrastructure layer for mnemo.
//!
//! Contains the implementations of the ports defined in `mnemo-core`: the
//! reqwest HTTP transport and the OS-keychain credential store, plus the
//! TOML configuration loader.

pub mod config;
pub mod http;
pub mod keychain;
