//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, listing forms, listing collections) so
//! pages depend on small focused models that test without a browser.

pub mod account_form;
pub mod auth;
pub mod listing_form;
pub mod listings;
