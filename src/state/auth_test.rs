use std::sync::Mutex;

use futures::executor::block_on;

use super::*;
use crate::net::auth_listeners::AuthChangeEvent;
use crate::net::error::{AuthError, BackendError};
use crate::net::test_helpers::{FakeAuth, auth_session};

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_session() {
    let state = AuthState::default();
    assert!(state.session.is_none());
    assert!(!state.signed());
}

#[test]
fn auth_state_default_is_loading() {
    assert!(AuthState::default().loading_auth);
}

// =============================================================
// Applying updates
// =============================================================

#[test]
fn apply_session_replaces_wholesale_and_stops_loading() {
    let mut state = AuthState::default();
    let first = Session { uid: "u-1".to_owned(), name: Some("Ana".to_owned()), email: None };
    let second = Session { uid: "u-2".to_owned(), name: None, email: Some("bo@example.com".to_owned()) };

    state.apply(AuthUpdate::Resolved(Some(first)));
    state.apply(AuthUpdate::Resolved(Some(second.clone())));
    assert_eq!(state.session, Some(second));
    assert!(!state.loading_auth);
    assert_eq!(state.uid(), Some("u-2"));
}

#[test]
fn apply_none_clears_session() {
    let mut state = AuthState {
        session: Some(Session { uid: "u-1".to_owned(), name: None, email: None }),
        loading_auth: false,
    };
    state.apply(AuthUpdate::Resolved(None));
    assert!(state.session.is_none());
    assert!(!state.signed());
    assert!(!state.loading_auth);
}

// =============================================================
// Lifecycle
// =============================================================

fn wire(fake: &FakeAuth) -> (Arc<Mutex<AuthState>>, SessionInit) {
    let state = Arc::new(Mutex::new(AuthState::default()));
    let sink_state = Arc::clone(&state);
    let init = init_session(fake.clone(), move |update| sink_state.lock().unwrap().apply(update));
    (state, init)
}

#[test]
fn initial_query_with_existing_session_signs_in() {
    let fake = FakeAuth::with_initial(Ok(Some(auth_session("u-1", Some("Ana"), Some("ana@example.com")))));
    let (state, init) = wire(&fake);
    assert!(state.lock().unwrap().loading_auth);

    block_on(init.initial);
    let state = state.lock().unwrap().clone();
    assert!(!state.loading_auth);
    assert_eq!(
        state.session,
        Some(Session { uid: "u-1".to_owned(), name: Some("Ana".to_owned()), email: Some("ana@example.com".to_owned()) })
    );
}

#[test]
fn failed_initial_query_is_treated_as_signed_out() {
    let fake = FakeAuth::with_initial(Err(AuthError::Backend(BackendError::Http("offline".to_owned()))));
    let (state, init) = wire(&fake);
    block_on(init.initial);
    let state = state.lock().unwrap().clone();
    assert!(!state.loading_auth);
    assert!(!state.signed());
}

#[test]
fn change_event_replaces_session_exactly() {
    let fake = FakeAuth::with_initial(Ok(None));
    let (state, init) = wire(&fake);
    block_on(init.initial);

    fake.emit(AuthChangeEvent::SignedIn, Some(auth_session("U", Some("Uma"), Some("uma@example.com"))));
    let held = state.lock().unwrap().clone();
    assert!(held.signed());
    assert_eq!(
        held.session,
        Some(Session { uid: "U".to_owned(), name: Some("Uma".to_owned()), email: Some("uma@example.com".to_owned()) })
    );

    fake.emit(AuthChangeEvent::SignedOut, None);
    let held = state.lock().unwrap().clone();
    assert!(!held.signed());
    assert!(held.session.is_none());
    assert!(!held.loading_auth);
}

#[test]
fn change_event_before_initial_resolution_ends_loading() {
    let fake = FakeAuth::with_initial(Ok(None));
    let (state, _init) = wire(&fake);
    fake.emit(AuthChangeEvent::SignedIn, Some(auth_session("u-9", None, None)));
    assert!(!state.lock().unwrap().loading_auth);
}

#[test]
fn unresolved_initial_query_stays_loading() {
    let fake = FakeAuth::with_initial(Ok(None));
    let (state, init) = wire(&fake);
    drop(init.initial);
    assert!(state.lock().unwrap().loading_auth);
    assert!(!state.lock().unwrap().signed());
}

#[test]
fn unsubscribe_stops_delivering_changes() {
    let fake = FakeAuth::with_initial(Ok(None));
    let (state, init) = wire(&fake);
    block_on(init.initial);
    init.subscription.unsubscribe();
    assert!(fake.listeners.is_empty());

    fake.emit(AuthChangeEvent::SignedIn, Some(auth_session("u-1", None, None)));
    assert!(!state.lock().unwrap().signed());
}
