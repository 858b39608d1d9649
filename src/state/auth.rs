//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware pages to coordinate login redirects
//! and owner-scoped queries. The app calls [`init_session`] once at mount,
//! spawns the returned initial query, and keeps the subscription alive until
//! the root is torn down.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::net::auth_listeners::{AuthChange, AuthSubscription};
use crate::net::backend::AuthClient;
use crate::net::types::{AuthSession, Session};

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading_auth: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading_auth: true }
    }
}

impl AuthState {
    pub fn signed(&self) -> bool {
        self.session.is_some()
    }

    pub fn uid(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.uid.as_str())
    }

    pub fn apply(&mut self, update: AuthUpdate) {
        match update {
            AuthUpdate::Resolved(session) => {
                self.session = session;
                self.loading_auth = false;
            }
        }
    }
}

/// A resolution from the auth service: the full replacement session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthUpdate {
    Resolved(Option<Session>),
}

impl AuthUpdate {
    fn from_auth_session(session: Option<&AuthSession>) -> Self {
        Self::Resolved(session.map(|s| Session::from(&s.user)))
    }
}

/// Startup work returned by [`init_session`].
pub struct SessionInit {
    /// One-shot existing-session query; spawn it on the local executor.
    pub initial: Pin<Box<dyn Future<Output = ()>>>,
    /// Disposer for the standing change subscription.
    pub subscription: AuthSubscription,
}

/// Subscribe `sink` to auth changes and prepare the initial session query.
///
/// A failed initial query is logged and reported as "no session". No retry.
pub fn init_session<C, F>(client: C, sink: F) -> SessionInit
where
    C: AuthClient + 'static,
    F: Fn(AuthUpdate) + Send + Sync + 'static,
{
    let sink = Arc::new(sink);

    let listener_sink = Arc::clone(&sink);
    let subscription = client.on_auth_state_change(Arc::new(move |change: &AuthChange| {
        listener_sink(AuthUpdate::from_auth_session(change.session.as_ref()));
    }));

    let initial = Box::pin(async move {
        let session = match client.get_session().await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("initial session query failed: {e}");
                None
            }
        };
        sink(AuthUpdate::from_auth_session(session.as_ref()));
    });

    SessionInit { initial, subscription }
}
