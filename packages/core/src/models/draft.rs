//! Draft Aggregate
//!
//! The `Draft` is the full in-progress snippet being authored: metadata
//! fields plus the ordered block sequence. It is an explicit, owned
//! aggregate: components that need it receive a handle; there is no
//! ambient state. The sequence is mutated exclusively through the block
//! store operations defined here, and the publish gate is derived from the
//! current fields on every call, never cached.
//!
//! A draft exists only for the editing session. Publishing produces an
//! immutable [`SnippetSnapshot`]; the live draft continues to exist
//! independently afterward.
//!
//! # Examples
//!
//! ```rust
//! use fieldnote_core::models::{BlockKind, Draft};
//!
//! let mut draft = Draft::new();
//! assert!(!draft.can_publish());
//!
//! draft.title = "My Day".to_string();
//! draft.add_block(BlockKind::Text);
//! assert!(draft.can_publish());
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Block, BlockKind};
use crate::operations::{BlockOperationError, MoveDirection};

/// The in-progress snippet aggregate: metadata fields plus the ordered
/// block sequence.
///
/// Metadata fields are free-text and edited directly. The block sequence is
/// private; all structural mutation goes through the operations below so
/// ordering invariants hold (insertion appends, reordering is adjacent-swap
/// only, ids are never reused).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Required; judged non-empty after trimming by the publish gate.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Cover image URL, set once its upload resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    content: Vec<Block>,
}

impl Draft {
    /// Create an empty draft dated today.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            subtitle: None,
            cover: None,
            date: Utc::now().date_naive(),
            location: None,
            weather: None,
            camera: None,
            tags: Vec::new(),
            content: Vec::new(),
        }
    }

    /// The ordered block sequence, in authoring/display order.
    pub fn blocks(&self) -> &[Block] {
        &self.content
    }

    /// The draft's tag set, in insertion order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Append a new block of the given kind with type-specific defaults and
    /// a fresh unique id. Always succeeds while the draft is being edited.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldnote_core::models::{BlockKind, Draft};
    ///
    /// let mut draft = Draft::new();
    /// let block = draft.add_block(BlockKind::Gallery);
    /// assert_eq!(block.kind(), BlockKind::Gallery);
    /// assert_eq!(draft.blocks().len(), 1);
    /// ```
    pub fn add_block(&mut self, kind: BlockKind) -> &Block {
        let block = Block::new(kind);
        tracing::debug!(kind = %kind, id = %block.id(), "block appended");
        self.content.push(block);
        // push guarantees a last element
        &self.content[self.content.len() - 1]
    }

    /// Borrow the block at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` when `index` is outside the sequence.
    pub fn block(&self, index: usize) -> Result<&Block, BlockOperationError> {
        let len = self.content.len();
        self.content
            .get(index)
            .ok_or(BlockOperationError::IndexOutOfRange { index, len })
    }

    /// Mutably borrow the block at `index` for per-field editing.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` when `index` is outside the sequence.
    pub fn block_mut(&mut self, index: usize) -> Result<&mut Block, BlockOperationError> {
        let len = self.content.len();
        self.content
            .get_mut(index)
            .ok_or(BlockOperationError::IndexOutOfRange { index, len })
    }

    /// Replace the block at `index` with `new_value`.
    ///
    /// Replacement never changes a block's kind; the per-type editor builds
    /// `new_value` from the block it read, so a kind mismatch is a caller
    /// bug, surfaced loudly rather than applied.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` when `index` is outside the sequence and
    /// `KindMismatch` when `new_value`'s kind differs from the resident
    /// block's.
    pub fn update_block(
        &mut self,
        index: usize,
        new_value: Block,
    ) -> Result<(), BlockOperationError> {
        let len = self.content.len();
        let slot = self
            .content
            .get_mut(index)
            .ok_or(BlockOperationError::IndexOutOfRange { index, len })?;
        if slot.kind() != new_value.kind() {
            return Err(BlockOperationError::kind_mismatch(
                slot.kind(),
                new_value.kind(),
            ));
        }
        tracing::debug!(index, id = %slot.id(), "block replaced");
        *slot = new_value;
        Ok(())
    }

    /// Remove and return the block at `index`; later blocks shift down one
    /// position.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` when `index` is outside the sequence.
    pub fn remove_block(&mut self, index: usize) -> Result<Block, BlockOperationError> {
        let len = self.content.len();
        if index >= len {
            return Err(BlockOperationError::IndexOutOfRange { index, len });
        }
        let removed = self.content.remove(index);
        tracing::debug!(index, id = %removed.id(), "block removed");
        Ok(removed)
    }

    /// Swap the block at `index` with its immediate neighbor in the given
    /// direction. A move against the boundary (up at the first position,
    /// down at the last) is a guarded no-op.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` when `index` is outside the sequence.
    pub fn move_block(
        &mut self,
        index: usize,
        direction: MoveDirection,
    ) -> Result<(), BlockOperationError> {
        let len = self.content.len();
        if index >= len {
            return Err(BlockOperationError::IndexOutOfRange { index, len });
        }
        match direction {
            MoveDirection::Up if index > 0 => {
                self.content.swap(index, index - 1);
                tracing::debug!(index, "block moved up");
            }
            MoveDirection::Down if index + 1 < len => {
                self.content.swap(index, index + 1);
                tracing::debug!(index, "block moved down");
            }
            // Boundary move: guarded no-op
            _ => {}
        }
        Ok(())
    }

    /// Add a tag if it is non-empty and not already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Remove a tag if present.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|existing| existing != tag);
    }

    /// The publish gate: true iff the trimmed title is non-empty and the
    /// draft has at least one block.
    ///
    /// Derived from the current fields on every call. Block-level
    /// completeness does not factor in; see [`Draft::incomplete_blocks`].
    pub fn can_publish(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.is_empty()
    }

    /// Indexes of blocks still waiting on an upload (image blocks with an
    /// empty `src`, gallery entries with an empty `src`).
    ///
    /// Advisory only; incomplete blocks do not close the publish gate. A
    /// host can use this to warn before publishing.
    pub fn incomplete_blocks(&self) -> Vec<usize> {
        self.content
            .iter()
            .enumerate()
            .filter(|(_, block)| block.is_incomplete())
            .map(|(index, _)| index)
            .collect()
    }

    /// Produce the immutable submission payload from the current draft
    /// state: a freshly generated id, all metadata fields, the date as
    /// `YYYY.MM.DD`, and the block sequence verbatim in display order.
    ///
    /// The draft itself is untouched.
    pub fn snapshot(&self) -> SnippetSnapshot {
        SnippetSnapshot {
            id: Uuid::new_v4().to_string(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            cover: self.cover.clone(),
            date: self.date.format("%Y.%m.%d").to_string(),
            location: self.location.clone(),
            weather: self.weather.clone(),
            camera: self.camera.clone(),
            tags: self.tags.clone(),
            content: self.content.clone(),
        }
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self::new()
    }
}

/// The immutable payload produced at submission time from the current
/// draft state.
///
/// # Examples
///
/// ```rust
/// use fieldnote_core::models::{BlockKind, Draft};
///
/// let mut draft = Draft::new();
/// draft.title = "My Day".to_string();
/// draft.add_block(BlockKind::Text);
///
/// let snapshot = draft.snapshot();
/// assert_eq!(snapshot.title, "My Day");
/// assert_eq!(snapshot.content.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetSnapshot {
    /// Freshly generated at snapshot time, not server-assigned.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Formatted `YYYY.MM.DD`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    pub tags: Vec<String>,
    /// Tagged block union, in display order.
    pub content: Vec<Block>,
}
