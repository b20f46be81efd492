//! Wire shapes for the memory backend's JSON API.
//!
//! Memory records travel in their domain shape (`Memory`, `MemoryDraft`);
//! only login and chat have dedicated request/response bodies.

use serde::{Deserialize, Serialize};

/// `POST /api/login/` request body.
#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST /api/login/` response body.
///
/// A missing `token` field decodes as empty; the session layer treats an
/// empty token as an invalid response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenBody {
    #[serde(default)]
    pub token: String,
}

/// `POST /api/chat/` request body.
#[derive(Debug, Serialize)]
pub(crate) struct ChatBody<'a> {
    pub message: &'a str,
}

/// `POST /api/chat/` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ReplyBody {
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_body_serializes_both_fields() {
        let body = LoginBody {
            username: "azad",
            password: "azad",
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"username":"azad","password":"azad"}"#);
    }

    #[test]
    fn test_missing_token_decodes_as_empty() {
        let body: TokenBody = serde_json::from_str("{}").unwrap();
        assert!(body.token.is_empty());
    }
}
