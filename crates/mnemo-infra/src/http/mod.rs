//! HttpTransport -- reqwest implementation of the [`Transport`] port.
//!
//! Sends JSON requests to the memory backend. Authenticated endpoints
//! carry the session token in an `Authorization: Token <token>` header.
//! Owns no session state; the credential arrives with each call.

mod types;

use std::time::Duration;

use mnemo_core::transport::Transport;
use mnemo_types::credential::Credential;
use mnemo_types::error::TransportError;
use mnemo_types::memory::{Memory, MemoryDraft};

use types::{ChatBody, LoginBody, ReplyBody, TokenBody};

/// HTTP client for the memory backend.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport against `base_url` with the given request timeout.
    ///
    /// Timeouts surface as [`TransportError::Network`], which the core
    /// reports as an unreachable backend.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create reqwest client");
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pass 2xx responses through; map anything else to `TransportError::Status`.
async fn accept(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

fn decode(err: reqwest::Error) -> TransportError {
    TransportError::Decode(err.to_string())
}

impl Transport for HttpTransport {
    async fn login(&self, username: &str, password: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .post(self.url("/api/login/"))
            .json(&LoginBody { username, password })
            .send()
            .await
            .map_err(network)?;

        let body: TokenBody = accept(response).await?.json().await.map_err(decode)?;
        Ok(body.token)
    }

    async fn ask(&self, credential: &Credential, question: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .post(self.url("/api/chat/"))
            .header("Authorization", credential.header_value())
            .json(&ChatBody { message: question })
            .send()
            .await
            .map_err(network)?;

        let body: ReplyBody = accept(response).await?.json().await.map_err(decode)?;
        Ok(body.reply)
    }

    async fn create_memory(
        &self,
        credential: &Credential,
        draft: &MemoryDraft,
    ) -> Result<Memory, TransportError> {
        let response = self
            .client
            .post(self.url("/api/memory/"))
            .header("Authorization", credential.header_value())
            .json(draft)
            .send()
            .await
            .map_err(network)?;

        accept(response).await?.json().await.map_err(decode)
    }

    async fn list_memories(&self, credential: &Credential) -> Result<Vec<Memory>, TransportError> {
        let response = self
            .client
            .get(self.url("/api/memory/"))
            .header("Authorization", credential.header_value())
            .send()
            .await
            .map_err(network)?;

        accept(response).await?.json().await.map_err(decode)
    }

    async fn fetch_memory(
        &self,
        credential: &Credential,
        id: i64,
    ) -> Result<Memory, TransportError> {
        let response = self
            .client
            .get(self.url(&format!("/api/memory/{id}/")))
            .header("Authorization", credential.header_value())
            .send()
            .await
            .map_err(network)?;

        accept(response).await?.json().await.map_err(decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> HttpTransport {
        HttpTransport::new(server.uri(), Duration::from_secs(5))
    }

    fn credential() -> Credential {
        Credential::new("abc123")
    }

    #[tokio::test]
    async fn test_login_posts_credentials_and_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login/"))
            .and(body_json(json!({"username": "azad", "password": "azad"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
            .mount(&server)
            .await;

        let token = transport(&server).login("azad", "azad").await.unwrap();
        assert_eq!(token, "abc123");
    }

    #[tokio::test]
    async fn test_login_rejection_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login/"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
            .mount(&server)
            .await;

        let err = transport(&server).login("azad", "wrong").await.unwrap_err();
        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid credentials");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_without_token_field_returns_empty_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let token = transport(&server).login("azad", "azad").await.unwrap();
        assert!(token.is_empty());
    }

    #[tokio::test]
    async fn test_ask_sends_token_header_and_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat/"))
            .and(header("Authorization", "Token abc123"))
            .and(body_json(json!({"message": "what did I say?"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"reply": "You said buy milk"})),
            )
            .mount(&server)
            .await;

        let reply = transport(&server)
            .ask(&credential(), "what did I say?")
            .await
            .unwrap();
        assert_eq!(reply, "You said buy milk");
    }

    #[tokio::test]
    async fn test_create_memory_posts_draft_and_parses_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/memory/"))
            .and(header("Authorization", "Token abc123"))
            .and(body_json(
                json!({"content": "buy milk", "timestamp": "2026-08-06 09:30:00"}),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"id": 1, "content": "buy milk", "timestamp": "2026-08-06 09:30:00"}),
            ))
            .mount(&server)
            .await;

        let draft = MemoryDraft {
            content: "buy milk".to_string(),
            timestamp: "2026-08-06 09:30:00".to_string(),
        };
        let memory = transport(&server)
            .create_memory(&credential(), &draft)
            .await
            .unwrap();
        assert_eq!(memory.id, 1);
        assert_eq!(memory.content, "buy milk");
    }

    #[tokio::test]
    async fn test_list_memories_preserves_server_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/memory/"))
            .and(header("Authorization", "Token abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "content": "call mom", "timestamp": "2026-08-06 10:00:00"},
                {"id": 1, "content": "buy milk", "timestamp": "2026-08-06 09:30:00"},
            ])))
            .mount(&server)
            .await;

        let memories = transport(&server)
            .list_memories(&credential())
            .await
            .unwrap();
        assert_eq!(memories.len(), 2);
        assert_eq!(memories[0].id, 2);
        assert_eq!(memories[1].id, 1);
    }

    #[tokio::test]
    async fn test_fetch_memory_hits_the_id_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/memory/7/"))
            .and(header("Authorization", "Token abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 7, "content": "water plants", "timestamp": "2026-08-06 11:00:00"}),
            ))
            .mount(&server)
            .await;

        let memory = transport(&server)
            .fetch_memory(&credential(), 7)
            .await
            .unwrap();
        assert_eq!(memory.id, 7);
        assert_eq!(memory.content, "water plants");
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/memory/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = transport(&server)
            .list_memories(&credential())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        // Nothing listens on this port.
        let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_secs(1));
        let err = transport.login("azad", "azad").await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let transport = HttpTransport::new("http://localhost:8000/", Duration::from_secs(1));
        assert_eq!(transport.url("/api/login/"), "http://localhost:8000/api/login/");
    }
}
