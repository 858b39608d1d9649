//! Seams between the controllers and the hosted backend.
//!
//! DESIGN
//! ======
//! Each trait covers one hosted service and returns typed results. The
//! browser build implements all three on `SupabaseClient`; tests implement
//! them on in-memory fakes. Futures are `?Send` because the browser client
//! is single-threaded and `gloo-net` futures are not `Send`.

use async_trait::async_trait;

use super::auth_listeners::{AuthListener, AuthSubscription};
use super::error::{AuthError, BackendError};
use super::types::{AuthSession, Listing, NewListing, SignUpResponse};

/// Hosted authentication: sessions, credentials and change events.
#[async_trait(?Send)]
pub trait AuthClient {
    /// Session persisted from an earlier sign-in, if any.
    async fn get_session(&self) -> Result<Option<AuthSession>, AuthError>;

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<SignUpResponse, AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Register a standing listener for auth-state changes.
    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription;
}

/// Hosted relational store, restricted to the listings table.
#[async_trait(?Send)]
pub trait ListingStore {
    async fn select_by_owner(&self, owner_uid: &str) -> Result<Vec<Listing>, BackendError>;

    async fn select_all(&self) -> Result<Vec<Listing>, BackendError>;

    /// Single-row fetch; zero rows is `BackendError::NotFound`.
    async fn select_single(&self, id: &str) -> Result<Listing, BackendError>;

    async fn insert(&self, listing: &NewListing) -> Result<Listing, BackendError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError>;
}

/// Hosted object storage, restricted to the listing-photo bucket.
#[async_trait(?Send)]
pub trait ObjectStorage {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<(), BackendError>;

    /// Public URL for `path`. Pure: the same path always yields the same URL.
    fn public_url(&self, path: &str) -> String;

    /// Bulk delete in a single request.
    async fn remove(&self, paths: &[String]) -> Result<(), BackendError>;
}
