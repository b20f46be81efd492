//! Chat exchange types.

use serde::{Deserialize, Serialize};

/// A completed question/answer round-trip.
///
/// Appended to the chat log once the answer arrives; only the question is
/// ever sent to the server. Exchanges live for the session only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_serialize() {
        let exchange = ChatExchange {
            question: "what did I say?".to_string(),
            answer: "You said buy milk".to_string(),
        };
        let json = serde_json::to_string(&exchange).unwrap();
        assert!(json.contains("\"question\":\"what did I say?\""));
    }
}
