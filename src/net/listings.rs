//! Listing repository: owner-scoped reads, photo upload, two-phase delete.
//!
//! DESIGN
//! ======
//! Delete is a saga with no atomic commit:
//! 1. remove every photo of the listing in one bulk storage call;
//! 2. only then delete the row.
//!
//! A failed step 1 aborts with the row intact. A failed step 2 leaves a row
//! whose photos are gone; nothing compensates for that, and the error says
//! so (`ImagesRemovedRecordKept`). Photo paths are rebuilt from the image
//! metadata on the row, so no separate index of stored objects exists.

#[cfg(test)]
#[path = "listings_test.rs"]
mod listings_test;

use super::backend::{ListingStore, ObjectStorage};
use super::error::{BackendError, RepositoryError};
use super::types::{ImageFile, Listing, ListingImage, NewListing, image_path};

#[derive(Clone)]
pub struct ListingRepository<B> {
    backend: B,
}

impl<B> ListingRepository<B>
where
    B: ListingStore + ObjectStorage,
{
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Every listing owned by `owner_uid`.
    ///
    /// # Errors
    ///
    /// `RemoteQuery` on transport or service failure; an empty `Ok` means the
    /// owner has no listings.
    pub async fn list_by_owner(&self, owner_uid: &str) -> Result<Vec<Listing>, RepositoryError> {
        self.backend.select_by_owner(owner_uid).await.map_err(RepositoryError::RemoteQuery)
    }

    /// Every listing, newest first.
    ///
    /// # Errors
    ///
    /// `RemoteQuery` on transport or service failure.
    pub async fn list_all(&self) -> Result<Vec<Listing>, RepositoryError> {
        self.backend.select_all().await.map_err(RepositoryError::RemoteQuery)
    }

    /// A single listing by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has this id, `RemoteQuery` otherwise.
    pub async fn get_by_id(&self, id: &str) -> Result<Listing, RepositoryError> {
        self.backend.select_single(id).await.map_err(|err| match err {
            BackendError::NotFound => RepositoryError::NotFound(id.to_owned()),
            other => RepositoryError::RemoteQuery(other),
        })
    }

    /// # Errors
    ///
    /// `RemoteWrite` when the insert fails.
    pub async fn create_listing(&self, listing: &NewListing) -> Result<Listing, RepositoryError> {
        self.backend.insert(listing).await.map_err(RepositoryError::RemoteWrite)
    }

    /// Remove a listing's photos, then its row.
    ///
    /// # Errors
    ///
    /// `RemoteUpload` when photo removal fails (row untouched);
    /// `ImagesRemovedRecordKept` when the row delete fails afterwards;
    /// `RemoteWrite` when a listing without photos fails to delete.
    pub async fn delete_listing(&self, listing: &Listing) -> Result<(), RepositoryError> {
        let paths: Vec<String> = listing.images.iter().map(ListingImage::storage_path).collect();
        if paths.is_empty() {
            return self.backend.delete_by_id(&listing.id).await.map_err(RepositoryError::RemoteWrite);
        }

        self.backend.remove(&paths).await.map_err(|err| {
            log::error!("removing {} image(s) of listing {} failed: {err}", paths.len(), listing.id);
            RepositoryError::RemoteUpload(err)
        })?;

        self.backend.delete_by_id(&listing.id).await.map_err(|source| {
            log::error!("listing {} lost its images but the row delete failed: {source}", listing.id);
            RepositoryError::ImagesRemovedRecordKept { id: listing.id.clone(), source }
        })
    }

    /// Store a photo under `images/{owner_uid}/{random id}` and return its
    /// metadata with the public URL.
    ///
    /// # Errors
    ///
    /// `RemoteUpload` when the upload fails. No retry.
    pub async fn upload_image(&self, owner_uid: &str, file: &ImageFile) -> Result<ListingImage, RepositoryError> {
        let name = uuid::Uuid::new_v4().to_string();
        let path = image_path(owner_uid, &name);
        self.backend
            .upload(&path, &file.bytes, &file.content_type)
            .await
            .map_err(RepositoryError::RemoteUpload)?;
        let url = self.backend.public_url(&path);
        log::debug!("uploaded {} ({} bytes) to {path}", file.name, file.bytes.len());
        Ok(ListingImage { uid: owner_uid.to_owned(), name, url })
    }
}
