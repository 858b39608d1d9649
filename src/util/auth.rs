//! Route-guard decisions for owner-only views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route applies the same three-way decision, so it lives
//! here as a pure function and the `Private` component only renders it.
//! There is no timeout: if the initial session query never resolves the
//! guard stays in `Loading`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth not resolved yet; render an empty placeholder.
    Loading,
    /// Auth resolved without a session.
    Redirect(&'static str),
    /// Auth resolved with a session; render the protected view.
    Allow,
}

pub fn guard(state: &AuthState) -> GuardDecision {
    if state.loading_auth {
        GuardDecision::Loading
    } else if state.signed() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(LOGIN_PATH)
    }
}

/// Whether auth has loaded and no user is present.
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    matches!(guard(state), GuardDecision::Redirect(_))
}
