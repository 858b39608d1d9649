//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep guard decisions, validation rules and display
//! formatting out of page code so they stay reusable and testable.

pub mod auth;
pub mod format;
pub mod validation;
