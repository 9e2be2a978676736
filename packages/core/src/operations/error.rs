//! Error types for block store operations
//!
//! The reference behavior for an out-of-range index was a silent no-op;
//! here every structural operation addressed at an invalid index fails
//! loudly so caller bugs cannot be masked.

use thiserror::Error;

/// Errors that can occur while mutating the ordered block sequence.
///
/// # Examples
///
/// ```rust
/// use fieldnote_core::operations::BlockOperationError;
///
/// let err = BlockOperationError::IndexOutOfRange { index: 4, len: 2 };
/// assert_eq!(
///     err.to_string(),
///     "Block index 4 out of range for sequence of length 2"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockOperationError {
    /// The operation addressed an index outside the current sequence.
    #[error("Block index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A block replacement or field edit targeted a block of the wrong kind.
    ///
    /// Block replacement never changes a block's kind; the editor constructs
    /// the replacement from the resident block, so a mismatch is a caller bug.
    #[error("Block kind mismatch: expected {expected}, got '{actual}'")]
    KindMismatch { expected: String, actual: String },
}

impl BlockOperationError {
    /// Create an IndexOutOfRange error
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a KindMismatch error
    pub fn kind_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::KindMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
