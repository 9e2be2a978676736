//! Content Block Data Structures
//!
//! This module defines the `Block` sum type: one variant per content kind a
//! snippet body can hold (text paragraph, single image, image gallery,
//! quotation). Each variant carries exactly the fields that kind supports,
//! so invalid field combinations cannot be represented.
//!
//! # Serialized Shape
//!
//! Blocks serialize with an internal `"type"` tag and lowercase kind names,
//! matching the submission payload contract:
//!
//! ```json
//! { "type": "image", "id": "…", "src": "https://…/a.jpg", "layout": "normal" }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use fieldnote_core::models::{Block, BlockKind};
//!
//! // Fresh blocks start with type-specific defaults
//! let mut block = Block::new(BlockKind::Text);
//! assert_eq!(block.kind(), BlockKind::Text);
//!
//! block.set_content("First paragraph").unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::operations::BlockOperationError;

/// Payload-free discriminant for the four block kinds.
///
/// Used when adding a new block to the draft and for the kind-stability
/// check on block replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
    Gallery,
    Quote,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Gallery => "gallery",
            BlockKind::Quote => "quote",
        };
        f.write_str(name)
    }
}

/// Presentation layout for a single image block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLayout {
    #[default]
    Normal,
    Bleed,
    Portrait,
}

/// Column layout for a gallery block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GalleryLayout {
    #[default]
    #[serde(rename = "grid-2")]
    Grid2,
    #[serde(rename = "grid-3")]
    Grid3,
}

/// One image entry within a gallery block.
///
/// Entries are appended through the gallery editor once their upload has
/// resolved, so `src` is non-empty for every entry the editor produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif: Option<String>,
}

impl GalleryImage {
    /// Create a gallery entry for a resolved upload URL.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            exif: None,
        }
    }
}

/// One unit of content within a snippet body.
///
/// The `id` is assigned at creation, unique within an editing session, and
/// stable for the block's lifetime. Field edits never touch it.
///
/// # Examples
///
/// ```rust
/// use fieldnote_core::models::{Block, BlockKind, ImageLayout};
///
/// let mut image = Block::new(BlockKind::Image);
/// image.set_src("https://cdn.example/a.jpg").unwrap();
/// image.set_image_layout(ImageLayout::Bleed).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text {
        id: String,
        content: String,
    },
    Image {
        id: String,
        /// Empty until an upload resolves.
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exif: Option<String>,
        #[serde(default)]
        layout: ImageLayout,
    },
    Gallery {
        id: String,
        #[serde(default)]
        layout: GalleryLayout,
        images: Vec<GalleryImage>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Quote {
        id: String,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
}

impl Block {
    /// Create a block of the given kind with type-specific default fields
    /// and a fresh unique id.
    ///
    /// Defaults: text and quote start with empty content, image with an
    /// empty `src` and `normal` layout, gallery with no images and the
    /// `grid-2` layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldnote_core::models::{Block, BlockKind, GalleryLayout};
    ///
    /// let gallery = Block::new(BlockKind::Gallery);
    /// match gallery {
    ///     Block::Gallery { layout, images, .. } => {
    ///         assert_eq!(layout, GalleryLayout::Grid2);
    ///         assert!(images.is_empty());
    ///     }
    ///     _ => unreachable!(),
    /// }
    /// ```
    pub fn new(kind: BlockKind) -> Self {
        let id = Uuid::new_v4().to_string();
        match kind {
            BlockKind::Text => Block::Text {
                id,
                content: String::new(),
            },
            BlockKind::Image => Block::Image {
                id,
                src: String::new(),
                caption: None,
                exif: None,
                layout: ImageLayout::default(),
            },
            BlockKind::Gallery => Block::Gallery {
                id,
                layout: GalleryLayout::default(),
                images: Vec::new(),
                caption: None,
            },
            BlockKind::Quote => Block::Quote {
                id,
                content: String::new(),
                author: None,
            },
        }
    }

    /// The block's stable unique identifier.
    pub fn id(&self) -> &str {
        match self {
            Block::Text { id, .. }
            | Block::Image { id, .. }
            | Block::Gallery { id, .. }
            | Block::Quote { id, .. } => id,
        }
    }

    /// The block's kind discriminant.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text { .. } => BlockKind::Text,
            Block::Image { .. } => BlockKind::Image,
            Block::Gallery { .. } => BlockKind::Gallery,
            Block::Quote { .. } => BlockKind::Quote,
        }
    }

    /// Replace the text content of a text or quote block.
    ///
    /// Empty strings are allowed at edit time; completeness is only judged
    /// on the aggregate at publish time.
    ///
    /// # Errors
    ///
    /// Returns `BlockOperationError::KindMismatch` for image and gallery
    /// blocks, which carry no text content.
    pub fn set_content(&mut self, value: impl Into<String>) -> Result<(), BlockOperationError> {
        match self {
            Block::Text { content, .. } | Block::Quote { content, .. } => {
                *content = value.into();
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch(
                "text or quote",
                other.kind(),
            )),
        }
    }

    /// Replace the attribution of a quote block. `None` clears it.
    pub fn set_author(&mut self, value: Option<String>) -> Result<(), BlockOperationError> {
        match self {
            Block::Quote { author, .. } => {
                *author = value;
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("quote", other.kind())),
        }
    }

    /// Replace the resolved upload URL of an image block.
    pub fn set_src(&mut self, value: impl Into<String>) -> Result<(), BlockOperationError> {
        match self {
            Block::Image { src, .. } => {
                *src = value.into();
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("image", other.kind())),
        }
    }

    /// Replace the caption of an image or gallery block. `None` clears it.
    pub fn set_caption(&mut self, value: Option<String>) -> Result<(), BlockOperationError> {
        match self {
            Block::Image { caption, .. } | Block::Gallery { caption, .. } => {
                *caption = value;
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch(
                "image or gallery",
                other.kind(),
            )),
        }
    }

    /// Replace the EXIF annotation of an image block. `None` clears it.
    pub fn set_exif(&mut self, value: Option<String>) -> Result<(), BlockOperationError> {
        match self {
            Block::Image { exif, .. } => {
                *exif = value;
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("image", other.kind())),
        }
    }

    /// Replace the layout of an image block.
    pub fn set_image_layout(&mut self, value: ImageLayout) -> Result<(), BlockOperationError> {
        match self {
            Block::Image { layout, .. } => {
                *layout = value;
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("image", other.kind())),
        }
    }

    /// Replace the layout of a gallery block.
    pub fn set_gallery_layout(&mut self, value: GalleryLayout) -> Result<(), BlockOperationError> {
        match self {
            Block::Gallery { layout, .. } => {
                *layout = value;
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("gallery", other.kind())),
        }
    }

    /// Append a resolved upload to a gallery block's image sequence.
    pub fn push_image(&mut self, src: impl Into<String>) -> Result<(), BlockOperationError> {
        match self {
            Block::Gallery { images, .. } => {
                images.push(GalleryImage::new(src));
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("gallery", other.kind())),
        }
    }

    /// Replace the EXIF annotation of one gallery entry. `None` clears it.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` for non-gallery blocks and `IndexOutOfRange`
    /// when the entry index is invalid.
    pub fn set_image_exif(
        &mut self,
        index: usize,
        value: Option<String>,
    ) -> Result<(), BlockOperationError> {
        match self {
            Block::Gallery { images, .. } => {
                let len = images.len();
                let entry = images
                    .get_mut(index)
                    .ok_or(BlockOperationError::IndexOutOfRange { index, len })?;
                entry.exif = value;
                Ok(())
            }
            other => Err(BlockOperationError::kind_mismatch("gallery", other.kind())),
        }
    }

    /// Remove one gallery entry, shifting later entries down.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` for non-gallery blocks and `IndexOutOfRange`
    /// when the entry index is invalid.
    pub fn remove_image(&mut self, index: usize) -> Result<GalleryImage, BlockOperationError> {
        match self {
            Block::Gallery { images, .. } => {
                let len = images.len();
                if index >= len {
                    return Err(BlockOperationError::IndexOutOfRange { index, len });
                }
                Ok(images.remove(index))
            }
            other => Err(BlockOperationError::kind_mismatch("gallery", other.kind())),
        }
    }

    /// Whether the block is still waiting on content only an upload can
    /// provide: an image block whose `src` is empty, or a gallery entry
    /// with an empty `src`.
    ///
    /// Incomplete blocks do not close the publish gate; they are reported
    /// so a host can warn before publishing.
    pub fn is_incomplete(&self) -> bool {
        match self {
            Block::Image { src, .. } => src.is_empty(),
            Block::Gallery { images, .. } => images.iter().any(|image| image.src.is_empty()),
            Block::Text { .. } | Block::Quote { .. } => false,
        }
    }
}
