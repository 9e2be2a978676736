//! Block Store Operation Types
//!
//! Supporting types for the structural mutations on a draft's ordered block
//! sequence: the reorder direction and the operation error kinds. The
//! mutations themselves live on [`crate::models::Draft`], the aggregate that
//! owns the sequence.

pub mod error;

pub use error::BlockOperationError;

use serde::{Deserialize, Serialize};

/// Direction for adjacent block reordering.
///
/// Reordering is adjacent-swap only; there is no arbitrary move. A move
/// against the boundary (up at the first position, down at the last) is a
/// guarded no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}
