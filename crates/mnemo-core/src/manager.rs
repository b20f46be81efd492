//! SessionManager: the facade tying session, cache, chat log, and request
//! coordination together.
//!
//! One manager instance is owned by the active user session (no global
//! singleton); the transport and credential store are injected at
//! construction. All state mutation happens at request-completion time
//! under short-lived locks that never span an `.await`, so results land in
//! completion order.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use mnemo_types::chat::ChatExchange;
use mnemo_types::credential::Credential;
use mnemo_types::error::{AskError, AuthError, FetchError, SaveError};
use mnemo_types::memory::{Memory, MemoryDraft};

use crate::chat::ChatLog;
use crate::coordinator::{FlightBoard, OpKind, StateSnapshot};
use crate::memory::MemoryCache;
use crate::session::{CredentialStore, SessionStore};
use crate::transport::Transport;

/// Owns the credential, the memory cache, and the chat log, and serializes
/// every network operation through per-kind single-flight guards.
///
/// Single-flight policy: a second operation of a kind already in flight is
/// rejected with the operation's `AlreadyInProgress` variant. When a save
/// and a refresh overlap, the refresh wins -- a refresh completing after
/// the save replaces the whole cache, dropping the optimistic append.
pub struct SessionManager<T: Transport, S: CredentialStore> {
    transport: T,
    credentials: S,
    session: SessionStore,
    cache: MemoryCache,
    chat: ChatLog,
    flights: FlightBoard,
    live: AtomicBool,
    last_error: Mutex<Option<String>>,
    state_tx: watch::Sender<StateSnapshot>,
}

impl<T: Transport, S: CredentialStore> SessionManager<T, S> {
    /// Create a manager with the given transport and credential store.
    pub fn new(transport: T, credentials: S) -> Self {
        let (state_tx, _) = watch::channel(StateSnapshot::default());
        Self {
            transport,
            credentials,
            session: SessionStore::new(),
            cache: MemoryCache::new(),
            chat: ChatLog::new(),
            flights: FlightBoard::new(),
            live: AtomicBool::new(true),
            last_error: Mutex::new(None),
            state_tx,
        }
    }

    // --- Session lifecycle ---

    /// Load a persisted credential from the store, if any.
    ///
    /// Store failures degrade to logged-out with a warning; they never
    /// block startup. Returns whether a session was restored.
    pub async fn restore(&self) -> bool {
        match self.credentials.load().await {
            Ok(Some(credential)) => {
                self.session.set(credential);
                self.publish();
                info!("restored persisted session");
                true
            }
            Ok(None) => false,
            Err(err) => {
                warn!("could not load persisted credential: {err}");
                false
            }
        }
    }

    /// Log in with the given credentials and store the issued token.
    ///
    /// Inputs are trimmed before submission. A 2xx response with an empty
    /// or missing token fails with [`AuthError::InvalidResponse`]. No
    /// retries; a failed login returns the error for the user to retry.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        let Some(guard) = self.flights.begin(OpKind::Login) else {
            return Err(AuthError::AlreadyInProgress);
        };
        self.publish();

        let result = self
            .transport
            .login(username.trim(), password.trim())
            .await;
        let outcome = match result {
            Ok(token) if token.is_empty() => Err(AuthError::InvalidResponse),
            Ok(token) => Ok(Credential::new(token)),
            Err(err) => Err(AuthError::from(err)),
        };

        if !self.is_live() {
            debug!("discarding login result after teardown");
            return outcome;
        }

        match &outcome {
            Ok(credential) => {
                self.session.set(credential.clone());
                if let Err(err) = self.credentials.save(credential).await {
                    warn!("could not persist credential: {err}");
                }
                self.clear_error();
                info!("login succeeded");
            }
            Err(err) => self.record_error(err.to_string()),
        }

        drop(guard);
        self.publish();
        outcome
    }

    /// Clear the session unconditionally. Idempotent, no network effect.
    ///
    /// The memory cache and chat log are screen-scoped, so they go too.
    pub async fn logout(&self) {
        self.session.clear();
        self.cache.clear();
        self.chat.clear();
        self.clear_error();
        if let Err(err) = self.credentials.clear().await {
            warn!("could not clear persisted credential: {err}");
        }
        self.publish();
        info!("logged out");
    }

    /// The current credential, if logged in. Pure read.
    pub fn credential(&self) -> Option<Credential> {
        self.session.current()
    }

    // --- Memory operations ---

    /// Fetch the remote memory list and replace the cache with it.
    pub async fn refresh(&self) -> Result<Vec<Memory>, FetchError> {
        let credential = self.session.current().ok_or(FetchError::NotAuthenticated)?;
        let Some(guard) = self.flights.begin(OpKind::Refresh) else {
            return Err(FetchError::AlreadyInProgress);
        };
        self.publish();

        let result = self
            .transport
            .list_memories(&credential)
            .await
            .map_err(FetchError::from);

        if !self.is_live() {
            debug!("discarding refresh result after teardown");
            return result;
        }

        let outcome = match result {
            Ok(fetched) => {
                self.clear_error();
                Ok(self.cache.replace_all(fetched))
            }
            Err(err) => {
                self.record_error(err.to_string());
                Err(err)
            }
        };

        drop(guard);
        self.publish();
        outcome
    }

    /// Stamp and save a new memory, appending the server-confirmed record.
    ///
    /// Blank content is rejected before any network call. On failure the
    /// cache is left untouched -- no optimistic insert.
    pub async fn remember(&self, content: &str) -> Result<Memory, SaveError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(SaveError::EmptyContent);
        }
        let credential = self.session.current().ok_or(SaveError::NotAuthenticated)?;
        let Some(guard) = self.flights.begin(OpKind::Save) else {
            return Err(SaveError::AlreadyInProgress);
        };
        self.publish();

        let draft = MemoryDraft::new(content);
        let result = self
            .transport
            .create_memory(&credential, &draft)
            .await
            .map_err(SaveError::from);

        if !self.is_live() {
            debug!("discarding save result after teardown");
            return result;
        }

        match &result {
            Ok(memory) => {
                self.cache.append(memory.clone());
                self.clear_error();
                info!(id = memory.id, "memory saved");
            }
            Err(err) => self.record_error(err.to_string()),
        }

        drop(guard);
        self.publish();
        result
    }

    /// Fetch a single memory by id. Never touches the cache.
    ///
    /// Shares the refresh flight slot: it is a read of the remote memory
    /// collection, so at most one such read is in flight at a time.
    pub async fn fetch_memory(&self, id: i64) -> Result<Memory, FetchError> {
        let credential = self.session.current().ok_or(FetchError::NotAuthenticated)?;
        let Some(guard) = self.flights.begin(OpKind::Refresh) else {
            return Err(FetchError::AlreadyInProgress);
        };
        self.publish();

        let result = self
            .transport
            .fetch_memory(&credential, id)
            .await
            .map_err(FetchError::from);

        if !self.is_live() {
            debug!("discarding memory fetch result after teardown");
            return result;
        }

        match &result {
            Ok(_) => self.clear_error(),
            Err(err) => self.record_error(err.to_string()),
        }

        drop(guard);
        self.publish();
        result
    }

    /// Snapshot of the cached memory list. Pure read.
    pub fn memories(&self) -> Vec<Memory> {
        self.cache.list()
    }

    // --- Chat operations ---

    /// Ask a question and record the completed exchange.
    ///
    /// Blank questions are rejected before any network call. Only the
    /// question travels; the exchange is appended once the answer arrives,
    /// so the log is in completion order.
    pub async fn ask(&self, question: &str) -> Result<String, AskError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }
        let credential = self.session.current().ok_or(AskError::NotAuthenticated)?;
        let Some(guard) = self.flights.begin(OpKind::Ask) else {
            return Err(AskError::AlreadyInProgress);
        };
        self.publish();

        let result = self
            .transport
            .ask(&credential, question)
            .await
            .map_err(AskError::from);

        if !self.is_live() {
            debug!("discarding ask result after teardown");
            return result;
        }

        match &result {
            Ok(answer) => {
                self.chat.append(ChatExchange {
                    question: question.to_string(),
                    answer: answer.clone(),
                });
                self.clear_error();
            }
            Err(err) => self.record_error(err.to_string()),
        }

        drop(guard);
        self.publish();
        result
    }

    /// Exchanges completed so far in this session. Pure read.
    pub fn history(&self) -> Vec<ChatExchange> {
        self.chat.history()
    }

    // --- Observable state ---

    /// Subscribe to state transitions (busy flags, cache, errors).
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot> {
        self.state_tx.subscribe()
    }

    /// Point-in-time view of the manager's state.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            authenticated: self.session.current().is_some(),
            memories: self.cache.list(),
            busy: self.flights.busy(),
            last_error: self.last_error.lock().expect("error lock poisoned").clone(),
        }
    }

    /// Mark the manager as torn down.
    ///
    /// In-flight results that complete afterwards are discarded without
    /// mutating shared state.
    pub fn close(&self) {
        self.live.store(false, Ordering::Release);
        debug!("session manager closed");
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.snapshot());
    }

    fn record_error(&self, message: String) {
        *self.last_error.lock().expect("error lock poisoned") = Some(message);
    }

    fn clear_error(&self) {
        *self.last_error.lock().expect("error lock poisoned") = None;
    }
}
