//! Browser localStorage persistence for the auth session.
//!
//! SYSTEM CONTEXT
//! ==============
//! A reload must find the previous sign-in, so the token response is kept
//! under a project-scoped key. Native builds have no storage and every call
//! is a no-op.

#[cfg(test)]
#[path = "session_storage_test.rs"]
mod session_storage_test;

use super::types::AuthSession;

/// Storage key for the session of the project hosted at `supabase_url`.
pub fn storage_key(supabase_url: &str) -> String {
    let host = supabase_url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let project = host.split('.').next().unwrap_or(host);
    format!("sb-{project}-auth-token")
}

/// Load the persisted session, discarding anything unparseable.
pub fn load_session(key: &str) -> Option<AuthSession> {
    #[cfg(feature = "csr")]
    {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten())?;
        let raw = storage.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

pub fn save_session(key: &str, session: &AuthSession) {
    #[cfg(feature = "csr")]
    {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
            return;
        };
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        if storage.set_item(key, &raw).is_err() {
            log::warn!("failed to persist auth session");
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, session);
    }
}

pub fn clear_session(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}
