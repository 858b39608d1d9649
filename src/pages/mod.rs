//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetching, navigation, signal
//! updates) and delegates rendering details to `components`. Remote work is
//! done by the controllers in `state` and `net`; pages only apply results.

pub mod car;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod new_listing;
pub mod register;
