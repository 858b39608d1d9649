//! Auth-state change fan-out with explicit subscription handles.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth client emits a change whenever sign-in, sign-up or sign-out
//! changes the held session. The session store subscribes once at startup and
//! holds the returned [`AuthSubscription`] for the app lifetime; releasing it
//! detaches the callback so nothing fires against a disposed consumer.

#[cfg(test)]
#[path = "auth_listeners_test.rs"]
mod auth_listeners_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::types::AuthSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
}

/// A change notification carrying the new session, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthChange {
    pub event: AuthChangeEvent,
    pub session: Option<AuthSession>,
}

pub type AuthListener = Arc<dyn Fn(&AuthChange) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, AuthListener)>,
}

/// Shared listener registry. Clones share the same set of listeners.
#[derive(Clone, Default)]
pub struct AuthListeners {
    inner: Arc<Mutex<Registry>>,
}

impl AuthListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        AuthSubscription { id, registry: Some(Arc::downgrade(&self.inner)) }
    }

    /// Deliver `change` to every live listener. Listeners run outside the
    /// lock so they may subscribe or unsubscribe re-entrantly.
    pub fn emit(&self, change: &AuthChange) {
        let listeners: Vec<AuthListener> = {
            let registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };
        log::debug!("auth change {:?} -> {} listener(s)", change.event, listeners.len());
        for listener in listeners {
            listener(change);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for one registered listener. Released on `unsubscribe` or drop.
#[must_use = "dropping the subscription detaches the listener"]
pub struct AuthSubscription {
    id: u64,
    registry: Option<Weak<Mutex<Registry>>>,
}

impl AuthSubscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.listeners.retain(|(id, _)| *id != self.id);
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription").field("id", &self.id).finish_non_exhaustive()
    }
}
