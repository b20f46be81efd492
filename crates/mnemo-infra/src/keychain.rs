//! OS keychain adapter for credential persistence.
//!
//! Uses the `keyring` crate to store the session token via:
//! - macOS Keychain
//! - Linux Secret Service (GNOME Keyring, KDE Wallet)
//! - Windows Credential Manager
//!
//! Only the raw token string is stored; a missing entry means logged out.

use mnemo_core::session::CredentialStore;
use mnemo_types::credential::Credential;
use mnemo_types::error::CredentialStoreError;

/// Keychain entry name the token is stored under.
const TOKEN_KEY: &str = "session-token";

/// Credential store backed by the OS keychain.
pub struct KeychainCredentialStore {
    service_name: String,
}

impl KeychainCredentialStore {
    /// Create a store with the default service name "mnemo".
    pub fn new() -> Self {
        Self {
            service_name: "mnemo".to_string(),
        }
    }

    /// Create a store with a custom service name (useful for testing).
    pub fn with_service(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    fn entry(&self) -> Result<keyring::Entry, CredentialStoreError> {
        keyring::Entry::new(&self.service_name, TOKEN_KEY)
            .map_err(|e| CredentialStoreError::Backend(format!("keychain entry error: {e}")))
    }
}

impl Default for KeychainCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeychainCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, CredentialStoreError> {
        let entry = self.entry()?;

        match entry.get_password() {
            Ok(token) => Ok(Some(Credential::new(token))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialStoreError::Backend(format!(
                "keychain get error: {e}"
            ))),
        }
    }

    async fn save(&self, credential: &Credential) -> Result<(), CredentialStoreError> {
        let entry = self.entry()?;

        entry
            .set_password(credential.token())
            .map_err(|e| CredentialStoreError::Backend(format!("keychain set error: {e}")))
    }

    async fn clear(&self) -> Result<(), CredentialStoreError> {
        let entry = self.entry()?;

        // Clearing an absent entry is not an error; logout is idempotent.
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CredentialStoreError::Backend(format!(
                "keychain delete error: {e}"
            ))),
        }
    }
}
