//! Submission Collaborator Seam
//!
//! Publishing hands the assembled [`SnippetSnapshot`] to an external
//! [`SubmissionService`]. On failure the draft is preserved intact so the
//! user can retry; there is no automatic retry here.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::SnippetSnapshot;

/// Submission failure, surfaced as a transient notification by the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// The submission was rejected or the transfer failed.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

impl SubmissionError {
    /// Create a Rejected error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }
}

/// External service that accepts a published snapshot.
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Submit the snapshot, acknowledging success or failure.
    async fn submit(&self, snapshot: &SnippetSnapshot) -> Result<(), SubmissionError>;
}
