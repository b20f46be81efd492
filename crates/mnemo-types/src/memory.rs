//! Memory record types.
//!
//! A memory starts life as a client-stamped [`MemoryDraft`], travels to the
//! backend, and comes back as a server-confirmed [`Memory`] with a
//! remote-assigned id. The client never fabricates ids.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp format stamped on new memories ("yyyy-MM-dd HH:mm:ss").
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A persisted user-authored note with server-assigned identity.
///
/// This is both the domain record and the wire shape of the backend's
/// memory endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: i64,
    pub content: String,
    pub timestamp: String,
}

/// A memory awaiting submission: the client stamps the timestamp, the
/// server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryDraft {
    pub content: String,
    pub timestamp: String,
}

impl MemoryDraft {
    /// Create a draft stamped with the current local time.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}
