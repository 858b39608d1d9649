//! In-memory fakes of the backend seams for controller tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use super::auth_listeners::{AuthChange, AuthChangeEvent, AuthListener, AuthListeners, AuthSubscription};
use super::backend::{AuthClient, ListingStore, ObjectStorage};
use super::error::{AuthError, BackendError};
use super::types::{AuthSession, AuthUser, Listing, ListingImage, NewListing, SignUpResponse, UserMetadata};

pub const PUBLIC_BASE: &str = "https://cdn.test/car";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SelectByOwner(String),
    SelectAll,
    SelectSingle(String),
    Insert(String),
    DeleteById(String),
    Upload { path: String, content_type: String, len: usize },
    Remove(Vec<String>),
}

/// Records every call in order; failures are switched on per operation.
#[derive(Default)]
pub struct FakeBackend {
    pub rows: RefCell<Vec<Listing>>,
    pub calls: RefCell<Vec<Call>>,
    pub fail_query: Cell<bool>,
    pub fail_insert: Cell<bool>,
    pub fail_delete: Cell<bool>,
    pub fail_upload: Cell<bool>,
    pub fail_remove: Cell<bool>,
}

impl FakeBackend {
    pub fn with_rows(rows: Vec<Listing>) -> Self {
        Self { rows: RefCell::new(rows), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn offline() -> BackendError {
    BackendError::Http("offline".to_owned())
}

#[async_trait(?Send)]
impl ListingStore for FakeBackend {
    async fn select_by_owner(&self, owner_uid: &str) -> Result<Vec<Listing>, BackendError> {
        self.record(Call::SelectByOwner(owner_uid.to_owned()));
        if self.fail_query.get() {
            return Err(offline());
        }
        Ok(self.rows.borrow().iter().filter(|l| l.user_id == owner_uid).cloned().collect())
    }

    async fn select_all(&self) -> Result<Vec<Listing>, BackendError> {
        self.record(Call::SelectAll);
        if self.fail_query.get() {
            return Err(offline());
        }
        Ok(self.rows.borrow().clone())
    }

    async fn select_single(&self, id: &str) -> Result<Listing, BackendError> {
        self.record(Call::SelectSingle(id.to_owned()));
        if self.fail_query.get() {
            return Err(offline());
        }
        self.rows.borrow().iter().find(|l| l.id == id).cloned().ok_or(BackendError::NotFound)
    }

    async fn insert(&self, listing: &NewListing) -> Result<Listing, BackendError> {
        self.record(Call::Insert(listing.name.clone()));
        if self.fail_insert.get() {
            return Err(offline());
        }
        let row = Listing {
            id: format!("c-{}", self.rows.borrow().len() + 1),
            name: listing.name.clone(),
            model: listing.model.clone(),
            year: listing.year.clone(),
            km: listing.km.clone(),
            price: listing.price.clone(),
            city: listing.city.clone(),
            description: listing.description.clone(),
            whatsapp: listing.whatsapp.clone(),
            user_id: listing.user_id.clone(),
            owner: listing.owner.clone(),
            created_at: None,
            images: listing.images.clone(),
        };
        self.rows.borrow_mut().push(row.clone());
        Ok(row)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), BackendError> {
        self.record(Call::DeleteById(id.to_owned()));
        if self.fail_delete.get() {
            return Err(offline());
        }
        self.rows.borrow_mut().retain(|l| l.id != id);
        Ok(())
    }
}

#[async_trait(?Send)]
impl ObjectStorage for FakeBackend {
    async fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<(), BackendError> {
        self.record(Call::Upload { path: path.to_owned(), content_type: content_type.to_owned(), len: bytes.len() });
        if self.fail_upload.get() {
            return Err(offline());
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{PUBLIC_BASE}/{path}")
    }

    async fn remove(&self, paths: &[String]) -> Result<(), BackendError> {
        self.record(Call::Remove(paths.to_vec()));
        if self.fail_remove.get() {
            return Err(offline());
        }
        Ok(())
    }
}

pub fn listing(id: &str, owner: &str, image_names: &[&str]) -> Listing {
    Listing {
        id: id.to_owned(),
        name: "Onix".to_owned(),
        model: "1.0 Flex".to_owned(),
        year: "2020/2021".to_owned(),
        km: "23567".to_owned(),
        price: "69500".to_owned(),
        city: "Campinas - SP".to_owned(),
        description: "single owner".to_owned(),
        whatsapp: "11987654321".to_owned(),
        user_id: owner.to_owned(),
        owner: Some("Ana".to_owned()),
        created_at: None,
        images: image_names
            .iter()
            .map(|name| ListingImage {
                uid: owner.to_owned(),
                name: (*name).to_owned(),
                url: format!("{PUBLIC_BASE}/images/{owner}/{name}"),
            })
            .collect(),
    }
}

pub fn auth_session(uid: &str, name: Option<&str>, email: Option<&str>) -> AuthSession {
    AuthSession {
        access_token: format!("token-{uid}"),
        refresh_token: None,
        expires_in: Some(3600),
        token_type: Some("bearer".to_owned()),
        user: AuthUser {
            id: uid.to_owned(),
            email: email.map(str::to_owned),
            user_metadata: UserMetadata { name: name.map(str::to_owned) },
        },
    }
}

/// Auth fake whose initial session query resolves to a preset answer.
#[derive(Clone, Default)]
pub struct FakeAuth {
    pub listeners: AuthListeners,
    pub initial: Rc<RefCell<Option<Result<Option<AuthSession>, AuthError>>>>,
    pub sign_outs: Rc<Cell<usize>>,
}

impl FakeAuth {
    pub fn with_initial(initial: Result<Option<AuthSession>, AuthError>) -> Self {
        let fake = Self::default();
        *fake.initial.borrow_mut() = Some(initial);
        fake
    }

    pub fn emit(&self, event: AuthChangeEvent, session: Option<AuthSession>) {
        self.listeners.emit(&AuthChange { event, session });
    }
}

#[async_trait(?Send)]
impl AuthClient for FakeAuth {
    async fn get_session(&self) -> Result<Option<AuthSession>, AuthError> {
        self.initial.borrow_mut().take().unwrap_or(Ok(None))
    }

    async fn sign_up(&self, email: &str, _password: &str, name: &str) -> Result<SignUpResponse, AuthError> {
        let session = auth_session("new-user", Some(name), Some(email));
        self.emit(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(SignUpResponse::Session(session))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        if password != "secret1" {
            return Err(AuthError::Rejected("Invalid login credentials".to_owned()));
        }
        let session = auth_session("u-1", None, Some(email));
        self.emit(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_outs.set(self.sign_outs.get() + 1);
        self.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }
}
