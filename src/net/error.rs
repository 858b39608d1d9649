//! Error taxonomy for the hosted-backend adapters.
//!
//! ERROR HANDLING
//! ==============
//! `BackendError` describes what went wrong on the wire. The repository and
//! auth layers wrap it into operation-specific variants so callers can tell a
//! failed read from a failed write or upload without inspecting strings.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("row not found")]
    NotFound,
    #[error("backend not available in this build")]
    Unavailable,
}

impl BackendError {
    /// Map a non-2xx response. PostgREST answers a single-row fetch that
    /// matched zero rows with 406.
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 406 { Self::NotFound } else { Self::Status { status, body } }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("listing query failed: {0}")]
    RemoteQuery(BackendError),
    #[error("listing write failed: {0}")]
    RemoteWrite(BackendError),
    #[error("image storage failed: {0}")]
    RemoteUpload(BackendError),
    #[error("listing not found: {0}")]
    NotFound(String),
    /// Step two of the delete saga failed after the photos were removed.
    /// Nothing restores the photos; the row now points at missing objects.
    #[error("images for listing {id} were removed but the record was kept: {source}")]
    ImagesRemovedRecordKept { id: String, source: BackendError },
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("auth request failed: {0}")]
    Backend(#[from] BackendError),
    #[error("{0}")]
    Rejected(String),
}
