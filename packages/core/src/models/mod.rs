//! Data Models
//!
//! This module contains the core data structures of the editing model:
//!
//! - `Block` - tagged content unit (text, image, gallery, quote)
//! - `Draft` - the owned aggregate being composed: metadata + block sequence
//! - `SnippetSnapshot` - immutable submission payload
//!
//! The draft and its block sequence exist only in memory for the editing
//! session; the snapshot is the one structural contract shared with the
//! submission collaborator.

mod block;
mod draft;

pub use block::{Block, BlockKind, GalleryImage, GalleryLayout, ImageLayout};
pub use draft::{Draft, SnippetSnapshot};

#[cfg(test)]
mod draft_test;
