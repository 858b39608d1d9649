//! Supabase client implementing the auth, listing-store and storage seams.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: every request resolves to `BackendError::Unavailable`,
//! since these endpoints are only reachable from the browser bundle.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `BackendError::Status` (406 on a single-row fetch
//! becomes `NotFound`). Auth endpoints additionally lift the GoTrue error
//! message into `AuthError::Rejected` so pages can log something readable.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::auth_listeners::{AuthChange, AuthChangeEvent, AuthListener, AuthListeners, AuthSubscription};
use super::backend::{AuthClient, ListingStore, ObjectStorage};
use super::error::{AuthError, BackendError};
use super::session_storage;
use super::types::{AuthSession, Listing, NewListing, SignUpResponse};
use crate::config::SupabaseConfig;

const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Delete,
}

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Body<'a> {
    Empty,
    Json(serde_json::Value),
    Bytes(&'a [u8]),
}

/// A fully described HTTP call, built purely so it can be inspected in tests.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HttpRequest<'a> {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Body<'a>,
}

impl<'a> HttpRequest<'a> {
    fn new(method: Method, url: String) -> Self {
        Self { method, url, headers: Vec::new(), body: Body::Empty }
    }

    fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    fn json(mut self, value: serde_json::Value) -> Self {
        self.body = Body::Json(value);
        self
    }

    fn bytes(mut self, bytes: &'a [u8]) -> Self {
        self.body = Body::Bytes(bytes);
        self
    }

    pub(crate) fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }
}

/// Handle to one Supabase project. Clones share the session and listeners.
#[derive(Clone)]
pub struct SupabaseClient {
    config: Arc<SupabaseConfig>,
    storage_key: Arc<str>,
    session: Arc<Mutex<Option<AuthSession>>>,
    listeners: AuthListeners,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        let storage_key = session_storage::storage_key(&config.url);
        Self {
            config: Arc::new(config),
            storage_key: storage_key.into(),
            session: Arc::new(Mutex::new(None)),
            listeners: AuthListeners::new(),
        }
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn current_session(&self) -> Option<AuthSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_session(&self, session: Option<AuthSession>) {
        match &session {
            Some(s) => session_storage::save_session(&self.storage_key, s),
            None => session_storage::clear_session(&self.storage_key),
        }
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// User token when signed in, otherwise the anon key.
    fn bearer(&self) -> String {
        let token = self
            .current_session()
            .map_or_else(|| self.config.anon_key.clone(), |s| s.access_token);
        format!("Bearer {token}")
    }

    fn request<'a>(&self, method: Method, url: String) -> HttpRequest<'a> {
        HttpRequest::new(method, url)
            .header("apikey", self.config.anon_key.clone())
            .header("Authorization", self.bearer())
    }

    // =========================================================================
    // REQUEST BUILDERS
    // =========================================================================

    pub(crate) fn signup_request(&self, email: &str, password: &str, name: &str) -> HttpRequest<'static> {
        self.request(Method::Post, auth_endpoint(&self.config.url, "signup"))
            .json(serde_json::json!({ "email": email, "password": password, "data": { "name": name } }))
    }

    pub(crate) fn password_grant_request(&self, email: &str, password: &str) -> HttpRequest<'static> {
        self.request(Method::Post, auth_endpoint(&self.config.url, "token?grant_type=password"))
            .json(serde_json::json!({ "email": email, "password": password }))
    }

    pub(crate) fn logout_request(&self) -> HttpRequest<'static> {
        self.request(Method::Post, auth_endpoint(&self.config.url, "logout"))
    }

    pub(crate) fn select_by_owner_request(&self, owner_uid: &str) -> HttpRequest<'static> {
        let url = format!(
            "{}?select=*&user_id=eq.{}",
            table_url(&self.config.url, &self.config.table),
            urlencoding::encode(owner_uid)
        );
        self.request(Method::Get, url)
    }

    pub(crate) fn select_all_request(&self) -> HttpRequest<'static> {
        let url = format!("{}?select=*&order=created_at.desc", table_url(&self.config.url, &self.config.table));
        self.request(Method::Get, url)
    }

    pub(crate) fn select_single_request(&self, id: &str) -> HttpRequest<'static> {
        let url = format!(
            "{}?select=*&id=eq.{}",
            table_url(&self.config.url, &self.config.table),
            urlencoding::encode(id)
        );
        self.request(Method::Get, url).header("Accept", PGRST_OBJECT)
    }

    pub(crate) fn insert_request(&self, listing: &NewListing) -> Result<HttpRequest<'static>, BackendError> {
        let payload = serde_json::to_value(listing).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(self
            .request(Method::Post, table_url(&self.config.url, &self.config.table))
            .header("Prefer", "return=representation")
            .header("Accept", PGRST_OBJECT)
            .json(payload))
    }

    pub(crate) fn delete_request(&self, id: &str) -> HttpRequest<'static> {
        let url = format!(
            "{}?id=eq.{}",
            table_url(&self.config.url, &self.config.table),
            urlencoding::encode(id)
        );
        self.request(Method::Delete, url)
    }

    pub(crate) fn upload_request<'a>(&self, path: &str, bytes: &'a [u8], content_type: &str) -> HttpRequest<'a> {
        self.request(Method::Post, object_url(&self.config.url, &self.config.bucket, path))
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .bytes(bytes)
    }

    pub(crate) fn remove_request(&self, paths: &[String]) -> HttpRequest<'static> {
        let url = format!("{}/storage/v1/object/{}", self.config.url, self.config.bucket);
        self.request(Method::Delete, url).json(serde_json::json!({ "prefixes": paths }))
    }
}

#[async_trait(?Send)]
impl AuthClient for SupabaseClient {
    async fn get_session(&self) -> Result<Option<AuthSession>, AuthError> {
        if let Some(session) = self.current_session() {
            return Ok(Some(session));
        }
        let stored = session_storage::load_session(&self.storage_key);
        if stored.is_some() {
            *self.session.lock().unwrap_or_else(PoisonError::into_inner) = stored.clone();
        }
        Ok(stored)
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<SignUpResponse, AuthError> {
        let body = execute(self.signup_request(email, password, name)).await.map_err(auth_failure)?;
        let response: SignUpResponse = decode(&body)?;
        if let SignUpResponse::Session(session) = &response {
            self.set_session(Some(session.clone()));
            self.listeners.emit(&AuthChange { event: AuthChangeEvent::SignedIn, session: Some(session.clone()) });
        }
        Ok(response)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let body = execute(self.password_grant_request(email, password)).await.map_err(auth_failure)?;
        let session: AuthSession = decode(&body)?;
        self.set_session(Some(session.clone()));
        self.listeners.emit(&AuthChange { event: AuthChangeEvent::SignedIn, session: Some(session.clone()) });
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let remote = if self.current_session().is_some() {
            execute(self.logout_request()).await.map(|_| ())
        } else {
            Ok(())
        };
        // The local session goes away even when the revoke call fails.
        self.set_session(None);
        self.listeners.emit(&AuthChange { event: AuthChangeEvent::SignedOut, session: None });
        remote.map_err(auth_failure)
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }
}

#[async_trait(?Send)]
impl ListingStore for SupabaseClient {
    async fn select_by_owner(&self, owner_uid: &str) -> Result<Vec<Listing>, BackendError> {
        decode(&execute(self.select_by_owner_request(owner_uid)).await?)
    }

    async fn select_all(&self) -> Result<Vec<Listing>, BackendError> {
        decode(&execute(self.select_all_request()).await?)
    }

    async fn select_single(&self, id: &str) -> Result<Listing, BackendError> {
        decode(&execute(self.select_single_request(id)).await?)
    }

    async fn insert(&self, listing: &NewListing) -> Result<Listing, BackendError> {
        decode(&execute(self.insert_request(listing)?).await?)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
        execute(self.delete_request(id)).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl ObjectStorage for SupabaseClient {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<(), BackendError> {
        execute(self.upload_request(path, bytes, content_type)).await.map(|_| ())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.config.url, &self.config.bucket, path)
    }

    async fn remove(&self, paths: &[String]) -> Result<(), BackendError> {
        execute(self.remove_request(paths)).await.map(|_| ())
    }
}

// =============================================================================
// URLS
// =============================================================================

fn auth_endpoint(base: &str, path: &str) -> String {
    format!("{base}/auth/v1/{path}")
}

fn table_url(base: &str, table: &str) -> String {
    format!("{base}/rest/v1/{table}")
}

fn object_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{base}/storage/v1/object/{bucket}/{path}")
}

pub(crate) fn public_object_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{base}/storage/v1/object/public/{bucket}/{path}")
}

// =============================================================================
// RESPONSES
// =============================================================================

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Pull the human-readable message out of a GoTrue error body.
pub(crate) fn auth_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
        .map(str::to_owned)
}

fn auth_failure(err: BackendError) -> AuthError {
    match &err {
        BackendError::Status { body, .. } => match auth_error_message(body) {
            Some(message) => AuthError::Rejected(message),
            None => AuthError::Backend(err),
        },
        _ => AuthError::Backend(err),
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "csr")]
async fn execute(req: HttpRequest<'_>) -> Result<String, BackendError> {
    use gloo_net::http::Request;

    let builder = match req.method {
        Method::Get => Request::get(&req.url),
        Method::Post => Request::post(&req.url),
        Method::Delete => Request::delete(&req.url),
    };
    let builder = req.headers.iter().fold(builder, |b, (name, value)| b.header(name, value));
    let request = match req.body {
        Body::Empty => builder.build(),
        Body::Json(value) => builder.json(&value),
        Body::Bytes(bytes) => builder.body(js_sys::Uint8Array::from(bytes)),
    }
    .map_err(|e| BackendError::Http(e.to_string()))?;

    let resp = request.send().await.map_err(|e| BackendError::Http(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| BackendError::Decode(e.to_string()))?;
    if !resp.ok() {
        return Err(BackendError::from_status(status, text));
    }
    Ok(text)
}

#[cfg(not(feature = "csr"))]
async fn execute(req: HttpRequest<'_>) -> Result<String, BackendError> {
    let _ = req;
    Err(BackendError::Unavailable)
}
