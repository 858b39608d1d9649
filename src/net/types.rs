//! Wire DTOs for the Supabase auth, data and storage boundary.
//!
//! DESIGN
//! ======
//! Rows come back from PostgREST with loose typing (`price` and `id` may be
//! strings or numbers depending on how the column was declared), so the
//! deserializers here normalize them once and nothing untyped crosses into
//! the controllers.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Root folder inside the bucket for listing photos.
pub const IMAGE_ROOT: &str = "images";

/// Storage path for a photo owned by `owner_uid`.
pub fn image_path(owner_uid: &str, name: &str) -> String {
    format!("{IMAGE_ROOT}/{owner_uid}/{name}")
}

/// The authenticated identity held by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Auth user id (UUID string).
    pub uid: String,
    /// Display name captured at sign-up, if any.
    pub name: Option<String>,
    /// Account email, if any.
    pub email: Option<String>,
}

impl From<&AuthUser> for Session {
    fn from(user: &AuthUser) -> Self {
        Self {
            uid: user.id.clone(),
            name: user.user_metadata.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A GoTrue user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Free-form profile data attached at sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

/// A GoTrue session as returned by the token and signup endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: AuthUser,
}

/// Signup responds with a session when email confirmation is off, and with a
/// bare user otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(AuthSession),
    User(AuthUser),
}

impl SignUpResponse {
    pub fn user(&self) -> &AuthUser {
        match self {
            Self::Session(session) => &session.user,
            Self::User(user) => user,
        }
    }
}

/// A photo attached to a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingImage {
    /// Owner uid; first path segment under [`IMAGE_ROOT`].
    pub uid: String,
    /// Random file id; last path segment.
    pub name: String,
    /// Public URL served by the storage bucket.
    pub url: String,
}

impl ListingImage {
    /// Storage path reconstructed from owner and name.
    pub fn storage_path(&self) -> String {
        image_path(&self.uid, &self.name)
    }
}

/// A car listing row from the `carros` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub year: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub km: String,
    #[serde(deserialize_with = "deserialize_string_from_scalar")]
    pub price: String,
    pub city: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_string_from_scalar")]
    pub whatsapp: String,
    /// Owner uid; scopes every dashboard query.
    pub user_id: String,
    /// Seller display name.
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<ListingImage>,
}

impl Listing {
    pub fn cover(&self) -> Option<&ListingImage> {
        self.images.first()
    }
}

/// Insert payload for a new listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewListing {
    pub name: String,
    pub model: String,
    pub year: String,
    pub km: String,
    pub price: String,
    pub city: String,
    pub description: String,
    pub whatsapp: String,
    pub user_id: String,
    pub owner: Option<String>,
    pub images: Vec<ListingImage>,
}

/// A file picked in the browser, read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

fn deserialize_string_from_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(D::Error::custom("expected string or number")),
    }
}

fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<ListingImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ListingImage>>::deserialize(deserializer)?.unwrap_or_default())
}
