//! Session credential: the bearer token proving an authenticated session.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// The bearer token issued by the backend on a successful login.
///
/// Present only after login succeeds; the session store holds
/// `Option<Credential>` and an absent credential means logged out (an
/// empty-string token is never stored). The token is wrapped in
/// [`SecretString`] so it cannot leak through `Debug` output or logs.
#[derive(Clone)]
pub struct Credential {
    token: SecretString,
}

impl Credential {
    /// Wrap a token issued by the backend.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    /// The raw token value. Only call this when building request headers
    /// or handing the token to the credential store.
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Render the `Authorization` header value the backend expects.
    pub fn header_value(&self) -> String {
        format!("Token {}", self.token.expose_secret())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[redacted]")
            .finish()
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.token.expose_secret() == other.token.expose_secret()
    }
}

impl Eq for Credential {}
