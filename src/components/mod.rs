//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render site chrome, listing cards and form fields while
//! reading shared auth state from Leptos context providers.

pub mod dashboard_header;
pub mod field;
pub mod header;
pub mod listing_card;
pub mod private;
