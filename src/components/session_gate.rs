//! Session Gate for Smartmark.
//!
//! Decides whether a caller is signed in before any account-scoped component
//! is mounted. A failed identity lookup is indistinguishable from a normal
//! signed-out state; it is reported to stderr only.

use std::sync::Arc;

use crate::backend::Backend;
use crate::config::Config;

/// Resolution state of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The identity lookup has not completed; render a placeholder and
    /// mount nothing account-scoped.
    Unresolved,
    /// No caller is signed in (or the lookup failed).
    SignedOut,
    /// A caller is signed in under this account identifier.
    SignedIn(String),
}

/// Gates account-scoped content on a resolved session.
pub struct SessionGate {
    backend: Arc<dyn Backend>,
    config: Config,
    state: SessionState,
}

impl SessionGate {
    pub fn new(backend: Arc<dyn Backend>, config: Config) -> Self {
        Self {
            backend,
            config,
            state: SessionState::Unresolved,
        }
    }

    /// Asks the identity provider for the current caller and records the
    /// outcome. No retry, no timeout; errors downgrade to signed-out.
    pub async fn resolve(&mut self) -> &SessionState {
        self.state = match self.backend.current_account().await {
            Ok(Some(account_id)) => SessionState::SignedIn(account_id),
            Ok(None) => SessionState::SignedOut,
            Err(err) => {
                eprintln!("[auth] identity lookup failed: {}", err);
                SessionState::SignedOut
            }
        };
        &self.state
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The resolved account identifier, if any.
    pub fn account_id(&self) -> Option<&str> {
        match &self.state {
            SessionState::SignedIn(account_id) => Some(account_id),
            _ => None,
        }
    }

    /// True once the lookup has completed, signed in or not.
    pub fn is_resolved(&self) -> bool {
        self.state != SessionState::Unresolved
    }

    /// Initiates the OAuth sign-in flow: builds the authorize URL with the
    /// configured post-login redirect and hands it back for the environment
    /// to navigate to. On failure to initiate, reports to stderr and returns
    /// `None` — there is no user-visible error state for this path.
    pub fn begin_sign_in(&self, provider: &str) -> Option<String> {
        match self
            .backend
            .authorize_url(provider, &self.config.redirect_url)
        {
            Ok(url) => Some(url),
            Err(err) => {
                eprintln!("[auth] sign-in failed to start: {}", err);
                None
            }
        }
    }
}
