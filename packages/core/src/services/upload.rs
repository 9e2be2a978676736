//! Upload Collaborator Seam
//!
//! The editing core never talks to storage directly; it hands file bytes to
//! an [`UploadService`] and writes the resolved URL back into the draft.
//! Production wires a real backend; tests inject in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

/// Upload failure, surfaced as a transient notification by the host.
///
/// The block that requested the upload keeps its last-good value; a failed
/// upload never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// The upload was rejected or the transfer failed.
    #[error("Upload rejected: {0}")]
    Rejected(String),
}

impl UploadError {
    /// Create a Rejected error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// External service that stores a file and resolves to a served URL.
#[async_trait]
pub trait UploadService: Send + Sync {
    /// Upload raw file bytes, resolving to the URL they will be served from.
    async fn upload(&self, file: &[u8]) -> Result<String, UploadError>;
}
