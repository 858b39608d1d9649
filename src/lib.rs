//! # webcarros
//!
//! Leptos + WASM frontend for a used-car classifieds site. Users register,
//! sign in, publish listings with photos and manage their own listings; the
//! public pages browse every listing and render a single one.
//!
//! Persistence, authentication and file storage all live in a hosted
//! Supabase project. This crate holds the typed adapters for those services,
//! the session/guard state machine, the listing form and view controllers,
//! and the pages that wire them into the router.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
