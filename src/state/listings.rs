//! Listing collections and single-listing state for the browse pages.
//!
//! DESIGN
//! ======
//! Local state only changes after the backend confirms: a delete removes the
//! card once `delete_listing` returns `Ok`, never before. Image-load tracking
//! is a grow-only set; a page session shows few enough cards that eviction is
//! not needed.

#[cfg(test)]
#[path = "listings_test.rs"]
mod listings_test;

use std::collections::HashSet;

use crate::net::backend::{ListingStore, ObjectStorage};
use crate::net::error::RepositoryError;
use crate::net::listings::ListingRepository;
use crate::net::types::Listing;

/// Cards on the dashboard or home grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingsState {
    pub items: Vec<Listing>,
    loaded_images: HashSet<String>,
}

impl ListingsState {
    pub fn replace(&mut self, items: Vec<Listing>) {
        self.items = items;
    }

    pub fn find(&self, id: &str) -> Option<&Listing> {
        self.items.iter().find(|l| l.id == id)
    }

    /// Drop `id` from the grid if the remote delete succeeded. Returns whether
    /// anything was removed.
    pub fn apply_delete(&mut self, id: &str, result: &Result<(), RepositoryError>) -> bool {
        if result.is_err() {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|l| l.id != id);
        self.items.len() != before
    }

    pub fn mark_image_loaded(&mut self, id: &str) {
        self.loaded_images.insert(id.to_owned());
    }

    pub fn is_image_loaded(&self, id: &str) -> bool {
        self.loaded_images.contains(id)
    }
}

/// Fetch the owner's listings, logging and returning `None` on failure so
/// the caller leaves its state as it was.
pub async fn load_owned<B>(repo: &ListingRepository<B>, owner_uid: &str) -> Option<Vec<Listing>>
where
    B: ListingStore + ObjectStorage,
{
    match repo.list_by_owner(owner_uid).await {
        Ok(items) => Some(items),
        Err(e) => {
            log::error!("loading listings for {owner_uid} failed: {e}");
            None
        }
    }
}

/// Fetch every listing for the home grid.
pub async fn load_all<B>(repo: &ListingRepository<B>) -> Option<Vec<Listing>>
where
    B: ListingStore + ObjectStorage,
{
    match repo.list_all().await {
        Ok(items) => Some(items),
        Err(e) => {
            log::error!("loading listings failed: {e}");
            None
        }
    }
}

/// `/car/:id` page state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ListingDetail {
    #[default]
    Loading,
    Loaded(Listing),
    /// The id matched nothing or the fetch failed; the page renders nothing.
    Unavailable,
}

impl ListingDetail {
    pub fn from_result(id: &str, result: Result<Listing, RepositoryError>) -> Self {
        match result {
            Ok(listing) => Self::Loaded(listing),
            Err(e) => {
                log::error!("loading listing {id} failed: {e}");
                Self::Unavailable
            }
        }
    }

    pub fn listing(&self) -> Option<&Listing> {
        match self {
            Self::Loaded(listing) => Some(listing),
            _ => None,
        }
    }
}
