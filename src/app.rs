//! App Core for Smartmark.
//!
//! Composition root: owns the shared backend handle and the component
//! lifecycles. Account-scoped components are mounted only once the session
//! gate has resolved a caller, and are torn down before a different account
//! is mounted.

use std::sync::Arc;

use crate::backend::Backend;
use crate::components::bookmark_synchronizer::BookmarkSynchronizer;
use crate::components::bookmark_writer::BookmarkWriter;
use crate::components::session_gate::{SessionGate, SessionState};
use crate::config::Config;

/// The account-scoped pair: create form plus live list. Exists only while a
/// caller is signed in.
pub struct Dashboard {
    pub writer: BookmarkWriter,
    pub list: BookmarkSynchronizer,
}

/// Central application struct wiring the session gate, writer, and
/// synchronizer to one injected backend client.
pub struct App {
    backend: Arc<dyn Backend>,
    pub session: SessionGate,
    pub dashboard: Option<Dashboard>,
}

impl App {
    /// Creates the app around an injected backend client. The client's
    /// lifecycle is owned here; components only borrow the handle.
    pub fn new(backend: Arc<dyn Backend>, config: Config) -> Self {
        let session = SessionGate::new(backend.clone(), config);
        Self {
            backend,
            session,
            dashboard: None,
        }
    }

    /// Startup sequence: resolve the session, and when a caller is signed in,
    /// mount the dashboard and run its initial load + subscribe.
    pub async fn startup(&mut self) {
        self.session.resolve().await;
        self.sync_dashboard().await;
    }

    /// Re-resolves the session and reconciles the dashboard: unmounts when
    /// signed out, remounts when the account changed. The old synchronizer's
    /// subscription is closed before a new one is opened.
    pub async fn refresh_session(&mut self) {
        self.session.resolve().await;
        self.sync_dashboard().await;
    }

    /// Shutdown sequence: tear down the live subscription.
    pub fn shutdown(&mut self) {
        if let Some(dashboard) = &mut self.dashboard {
            dashboard.list.close();
        }
        self.dashboard = None;
    }

    async fn sync_dashboard(&mut self) {
        match self.session.state().clone() {
            SessionState::SignedIn(account_id) => {
                let mounted = self
                    .dashboard
                    .as_ref()
                    .map(|d| d.list.account_id() == account_id)
                    .unwrap_or(false);
                if !mounted {
                    self.shutdown();
                    self.mount_dashboard(&account_id).await;
                }
            }
            SessionState::SignedOut | SessionState::Unresolved => self.shutdown(),
        }
    }

    async fn mount_dashboard(&mut self, account_id: &str) {
        let writer = BookmarkWriter::new(self.backend.clone());
        let mut list = BookmarkSynchronizer::new(self.backend.clone(), account_id);
        list.start().await;
        self.dashboard = Some(Dashboard { writer, list });
    }
}
