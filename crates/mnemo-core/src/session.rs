//! Session store: exclusive owner of the credential lifecycle.

use std::sync::{Arc, Mutex};

use mnemo_types::credential::Credential;
use mnemo_types::error::CredentialStoreError;

/// Persistence hooks for the credential, outside the core lifecycle.
///
/// The core only needs load/save/clear; the storage format belongs to the
/// implementation. The production adapter (`KeychainCredentialStore`) lives
/// in mnemo-infra; [`InMemoryCredentialStore`] backs tests and embedded
/// callers. Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait CredentialStore: Send + Sync {
    /// Load a previously persisted credential, if any.
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<Credential>, CredentialStoreError>> + Send;

    /// Persist the credential for the next process start.
    fn save(
        &self,
        credential: &Credential,
    ) -> impl std::future::Future<Output = Result<(), CredentialStoreError>> + Send;

    /// Forget any persisted credential. Idempotent.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), CredentialStoreError>> + Send;
}

/// Holds the current authentication token; absent until login succeeds.
///
/// The credential is set only from a login result carrying a non-empty
/// token and is cleared atomically on logout.
#[derive(Default)]
pub struct SessionStore {
    credential: Mutex<Option<Credential>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the credential issued by a successful login.
    pub fn set(&self, credential: Credential) {
        *self.credential.lock().expect("session lock poisoned") = Some(credential);
    }

    /// Clear the credential unconditionally. Idempotent, no network effect.
    pub fn clear(&self) {
        *self.credential.lock().expect("session lock poisoned") = None;
    }

    /// The current credential, if logged in. Pure read.
    pub fn current(&self) -> Option<Credential> {
        self.credential.lock().expect("session lock poisoned").clone()
    }
}

/// Ephemeral credential store for tests and embedded callers.
///
/// Clones share the same slot, so a test can hand one clone to the manager
/// and inspect the other.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
        Ok(self.slot.lock().expect("slot lock poisoned").clone())
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        *self.slot.lock().expect("slot lock poisoned") = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        *self.slot.lock().expect("slot lock poisoned") = None;
        Ok(())
    }
}
