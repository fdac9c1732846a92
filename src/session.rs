//! Authenticated-identity state and the capability that mints bearer tokens.
//!
//! Screens never reach for a global auth client. They receive an
//! [`IdentityProvider`] through [`crate::state::AppState`] and wait for it to
//! resolve before making any resource call.

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::config::ClientConfig;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    /// Name shown in the dashboard header.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Authenticated(Identity),
    Anonymous,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            SessionState::Anonymous => None,
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session-state changes. `None` until the provider has finished its
    /// initial check.
    fn subscribe(&self) -> watch::Receiver<Option<SessionState>>;

    /// Mint a fresh bearer token for the current identity, `None` when no
    /// session is active.
    async fn id_token(&self) -> Result<Option<String>, AppError>;
}

/// Wait until the provider has resolved and return the session.
pub async fn resolve_session(provider: &dyn IdentityProvider) -> SessionState {
    let mut rx = provider.subscribe();
    let session = match rx.wait_for(|state| state.is_some()).await {
        Ok(state) => state.clone().unwrap_or(SessionState::Anonymous),
        // Provider dropped before resolving, nobody can sign us in anymore
        Err(_) => SessionState::Anonymous,
    };
    session
}

/// Provider backed by a fixed token, used by the CLI and in tests.
pub struct StaticIdentityProvider {
    state: watch::Sender<Option<SessionState>>,
    token: Mutex<Option<String>>,
}

impl StaticIdentityProvider {
    pub fn anonymous() -> Self {
        Self {
            state: watch::Sender::new(Some(SessionState::Anonymous)),
            token: Mutex::new(None),
        }
    }

    pub fn signed_in(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            state: watch::Sender::new(Some(SessionState::Authenticated(identity))),
            token: Mutex::new(Some(token.into())),
        }
    }

    /// Starts unresolved; screens block until `sign_in`, `sign_out` or
    /// `mark_resolved` is called.
    pub fn unresolved() -> Self {
        Self {
            state: watch::Sender::new(None),
            token: Mutex::new(None),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.id_token {
            Some(token) => {
                let identity = Identity {
                    uid: config.user_id.clone(),
                    email: config.user_email.clone(),
                    display_name: None,
                };
                Self::signed_in(identity, token.clone())
            }
            None => Self::anonymous(),
        }
    }

    pub fn sign_in(&self, identity: Identity, token: impl Into<String>) {
        *self.token.lock() = Some(token.into());
        self.state.send_replace(Some(SessionState::Authenticated(identity)));
    }

    pub fn sign_out(&self) {
        *self.token.lock() = None;
        self.state.send_replace(Some(SessionState::Anonymous));
    }

    /// Replace the token without changing the identity (refresh).
    pub fn rotate_token(&self, token: impl Into<String>) {
        let mut current = self.token.lock();
        if current.is_some() {
            *current = Some(token.into());
        }
    }

    pub fn mark_resolved(&self) {
        self.state.send_if_modified(|state| {
            if state.is_none() {
                *state = Some(SessionState::Anonymous);
                true
            } else {
                false
            }
        });
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn subscribe(&self) -> watch::Receiver<Option<SessionState>> {
        self.state.subscribe()
    }

    async fn id_token(&self) -> Result<Option<String>, AppError> {
        let authenticated = matches!(*self.state.borrow(), Some(SessionState::Authenticated(_)));
        if !authenticated {
            return Ok(None);
        }
        Ok(self.token.lock().clone())
    }
}
