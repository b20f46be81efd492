//! Transport port: the backend API surface the manager talks through.
//!
//! Implementations live in mnemo-infra (`HttpTransport`). Uses native
//! async fn in traits (RPITIT, Rust 2024 edition); the manager is generic
//! over this trait, so tests script it without any network.

use mnemo_types::credential::Credential;
use mnemo_types::error::TransportError;
use mnemo_types::memory::{Memory, MemoryDraft};

/// Stateless executor for backend requests.
///
/// Owns no session state; the credential arrives with each authenticated
/// call. Timeouts are this layer's concern and surface as
/// [`TransportError::Network`].
pub trait Transport: Send + Sync {
    /// Submit the login form. Returns the token from the response body,
    /// possibly empty -- the session layer decides what that means.
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<String, TransportError>> + Send;

    /// Send a question. Returns the reply text.
    fn ask(
        &self,
        credential: &Credential,
        question: &str,
    ) -> impl std::future::Future<Output = Result<String, TransportError>> + Send;

    /// Submit a memory draft. Returns the server-confirmed record.
    fn create_memory(
        &self,
        credential: &Credential,
        draft: &MemoryDraft,
    ) -> impl std::future::Future<Output = Result<Memory, TransportError>> + Send;

    /// Fetch the full memory list, in server order.
    fn list_memories(
        &self,
        credential: &Credential,
    ) -> impl std::future::Future<Output = Result<Vec<Memory>, TransportError>> + Send;

    /// Fetch a single memory by id.
    fn fetch_memory(
        &self,
        credential: &Credential,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Memory, TransportError>> + Send;
}
