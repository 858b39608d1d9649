use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counting_listener(counter: &Arc<AtomicUsize>) -> AuthListener {
    let counter = Arc::clone(counter);
    Arc::new(move |_change: &AuthChange| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

fn signed_out() -> AuthChange {
    AuthChange { event: AuthChangeEvent::SignedOut, session: None }
}

#[test]
fn emit_reaches_every_subscriber() {
    let listeners = AuthListeners::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _a = listeners.subscribe(counting_listener(&hits));
    let _b = listeners.subscribe(counting_listener(&hits));

    listeners.emit(&signed_out());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn unsubscribe_detaches_only_that_listener() {
    let listeners = AuthListeners::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let a = listeners.subscribe(counting_listener(&hits));
    let _b = listeners.subscribe(counting_listener(&hits));

    a.unsubscribe();
    assert_eq!(listeners.len(), 1);
    listeners.emit(&signed_out());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn dropping_subscription_releases_listener() {
    let listeners = AuthListeners::new();
    let hits = Arc::new(AtomicUsize::new(0));
    {
        let _sub = listeners.subscribe(counting_listener(&hits));
        assert_eq!(listeners.len(), 1);
    }
    assert!(listeners.is_empty());
    listeners.emit(&signed_out());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn subscription_outliving_registry_is_harmless() {
    let listeners = AuthListeners::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = listeners.subscribe(counting_listener(&hits));
    drop(listeners);
    sub.unsubscribe();
}
