//! Networking modules for the hosted Supabase backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` declares the seams, `supabase` implements them over HTTP,
//! `listings` layers the owner-scoped repository on top, and `types` defines
//! the wire schema shared by all of them.

pub mod auth_listeners;
pub mod backend;
pub mod error;
pub mod listings;
pub mod session_storage;
pub mod supabase;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
