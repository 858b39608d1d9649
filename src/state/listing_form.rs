//! New-listing form: field rules, image acceptance and upload sequencing.
//!
//! SYSTEM CONTEXT
//! ==============
//! Picking a photo uploads it straight away, before the listing exists, and
//! the returned image is kept on the form. Submitting validates the fields
//! and hands back a draft; the page only logs it and does not call
//! `ListingRepository::create_listing`, so no listing row is written from
//! this form.

#[cfg(test)]
#[path = "listing_form_test.rs"]
mod listing_form_test;

use crate::net::backend::{ListingStore, ObjectStorage};
use crate::net::error::RepositoryError;
use crate::net::listings::ListingRepository;
use crate::net::types::{ImageFile, ListingImage, Session};
use crate::util::validation::{FieldErrors, Form, FormField, is_phone_number, require};

pub const IMAGE_REJECTED_ALERT: &str = "Send a JPEG or PNG image!";

/// MIME types the photo picker lets through.
///
/// The PNG entry reads `imagem/png`, so real PNG files (`image/png`) are
/// rejected with the picker alert.
const ACCEPTED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "imagem/png"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListingField {
    Name,
    Model,
    Year,
    Km,
    Price,
    City,
    Whatsapp,
    Description,
}

impl FormField for ListingField {
    const ALL: &'static [Self] = &[
        Self::Name,
        Self::Model,
        Self::Year,
        Self::Km,
        Self::Price,
        Self::City,
        Self::Whatsapp,
        Self::Description,
    ];

    fn validate(self, value: &str) -> Result<(), &'static str> {
        match self {
            Self::Name => require(value, "Car name is required"),
            Self::Model => require(value, "Model is required"),
            Self::Year => require(value, "Year is required"),
            Self::Km => require(value, "Mileage is required"),
            Self::Price => require(value, "Price is required"),
            Self::City => require(value, "City is required"),
            Self::Description => require(value, "Description is required"),
            Self::Whatsapp => {
                require(value, "Phone number is required")?;
                if is_phone_number(value) { Ok(()) } else { Err("Invalid phone number") }
            }
        }
    }
}

/// A validated set of listing fields plus the photos uploaded so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingDraft {
    pub name: String,
    pub model: String,
    pub year: String,
    pub km: String,
    pub price: String,
    pub city: String,
    pub whatsapp: String,
    pub description: String,
    pub images: Vec<ListingImage>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingForm {
    pub fields: Form<ListingField>,
    pub images: Vec<ListingImage>,
}

impl ListingForm {
    pub fn set_field(&mut self, field: ListingField, value: impl Into<String>) {
        self.fields.set_field(field, value);
    }

    pub fn add_image(&mut self, image: ListingImage) {
        self.images.push(image);
    }

    /// Validate all fields and build the draft.
    ///
    /// # Errors
    ///
    /// Returns one message per invalid field; nothing is submitted.
    pub fn submit(&mut self) -> Result<ListingDraft, FieldErrors<ListingField>> {
        self.fields.submit()?;
        let value = |field| self.fields.value(field).to_owned();
        Ok(ListingDraft {
            name: value(ListingField::Name),
            model: value(ListingField::Model),
            year: value(ListingField::Year),
            km: value(ListingField::Km),
            price: value(ListingField::Price),
            city: value(ListingField::City),
            whatsapp: value(ListingField::Whatsapp),
            description: value(ListingField::Description),
            images: self.images.clone(),
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unsupported image type: {0}")]
    ImageRejected(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub fn accepts_image_type(mime: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&mime)
}

/// Upload a freshly picked photo for the signed-in owner.
///
/// Returns `Ok(None)` without uploading when nobody is signed in.
///
/// # Errors
///
/// `ImageRejected` for a MIME type outside the accepted set, or the
/// repository's upload error.
pub async fn upload_selected_image<B>(
    repo: &ListingRepository<B>,
    session: Option<&Session>,
    file: &ImageFile,
) -> Result<Option<ListingImage>, FormError>
where
    B: ListingStore + ObjectStorage,
{
    if !accepts_image_type(&file.content_type) {
        return Err(FormError::ImageRejected(file.content_type.clone()));
    }
    let Some(session) = session else {
        return Ok(None);
    };
    let image = repo.upload_image(&session.uid, file).await?;
    Ok(Some(image))
}
