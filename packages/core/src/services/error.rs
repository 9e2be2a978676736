//! Service Layer Error Types
//!
//! This module defines error types for editor-service operations. Every
//! failure here is non-fatal: the worst outcome is an unsynchronized draft
//! the user can re-edit and resubmit.

use crate::operations::BlockOperationError;
use crate::services::submission::SubmissionError;
use crate::services::upload::UploadError;
use thiserror::Error;

/// Editor service operation errors
///
/// Async collaborator failures are caught at the call site that issued them
/// and converted into these kinds; nothing propagates to a global handler.
#[derive(Error, Debug)]
pub enum EditorServiceError {
    /// The publish gate is closed: the draft needs a non-empty title and at
    /// least one block. Hosts surface this as a disabled control, not a
    /// message.
    #[error("Draft is not ready to publish: a title and at least one block are required")]
    ValidationBlocked,

    /// The upload collaborator rejected the file. The target block keeps
    /// its last-good value.
    #[error("Upload failed: {0}")]
    UploadFailed(#[from] UploadError),

    /// The submission collaborator rejected the snapshot. The draft is
    /// preserved intact for retry.
    #[error("Submission failed: {0}")]
    SubmissionFailed(#[from] SubmissionError),

    /// A collaborator call exceeded the configured deadline.
    #[error("{what} timed out after {seconds}s")]
    Timeout { what: String, seconds: u64 },

    /// A block store operation failed.
    #[error("Block operation failed: {0}")]
    Block(#[from] BlockOperationError),
}

impl EditorServiceError {
    /// Create a Timeout error
    pub fn timeout(what: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            what: what.into(),
            seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = EditorServiceError::timeout("upload", 30);
        assert_eq!(format!("{}", err), "upload timed out after 30s");
    }

    #[test]
    fn test_upload_error_converts() {
        let err: EditorServiceError = UploadError::rejected("disk full").into();
        assert!(matches!(err, EditorServiceError::UploadFailed(_)));
        assert_eq!(format!("{}", err), "Upload failed: Upload rejected: disk full");
    }

    #[test]
    fn test_block_error_converts() {
        let err: EditorServiceError =
            BlockOperationError::index_out_of_range(2, 0).into();
        assert!(matches!(err, EditorServiceError::Block(_)));
    }
}
