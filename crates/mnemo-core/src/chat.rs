//! Chat log: the transient record of this session's exchanges.

use std::sync::Mutex;

use mnemo_types::chat::ChatExchange;

/// Append-only log of question/answer exchanges.
///
/// Lives only for the owning session; never persisted. Exchanges are
/// appended in request-completion order.
#[derive(Default)]
pub struct ChatLog {
    exchanges: Mutex<Vec<ChatExchange>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed exchange.
    pub fn append(&self, exchange: ChatExchange) {
        self.exchanges.lock().expect("chat lock poisoned").push(exchange);
    }

    /// Snapshot of all exchanges completed so far. Re-iterable.
    pub fn history(&self) -> Vec<ChatExchange> {
        self.exchanges.lock().expect("chat lock poisoned").clone()
    }

    /// Drop the log (logout/teardown).
    pub fn clear(&self) {
        self.exchanges.lock().expect("chat lock poisoned").clear();
    }
}
