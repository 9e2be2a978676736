//! Editor Service - Draft Orchestration
//!
//! This module provides the service that owns a [`Draft`] for the duration
//! of an editing session and coordinates its async collaborators:
//!
//! - Image attachment (upload, then write the resolved URL into the draft)
//! - Cover upload
//! - Publishing (gate check, snapshot assembly, submission hand-off)
//!
//! # Concurrency Model
//!
//! Exactly one logical actor drives edits, but uploads overlap: a user can
//! re-select a file for the same image block before the previous upload
//! resolves. Each image block carries an upload generation counter; a
//! resolution whose generation is stale is discarded, so the last-selected
//! file wins deterministically regardless of resolution order.
//!
//! Uploads that resolve after their target block was removed (or after the
//! session was reset) are discarded the same way - no crash, no retry.
//!
//! Collaborator calls are bounded by a configurable deadline so a hung
//! upload or submission cannot leave the host spinning indefinitely.
//!
//! # Examples
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use fieldnote_core::models::BlockKind;
//! # use fieldnote_core::services::{EditorService, UploadService, SubmissionService};
//! # async fn example<U: UploadService + 'static, S: SubmissionService + 'static>(
//! #     uploader: Arc<U>,
//! #     submitter: Arc<S>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let editor = EditorService::new(uploader, submitter);
//!
//! {
//!     let mut draft = editor.draft().await;
//!     draft.title = "My Day".to_string();
//!     draft.add_block(BlockKind::Text);
//!     draft.add_block(BlockKind::Image);
//! }
//!
//! editor.attach_image(1, b"raw image bytes").await?;
//! let snapshot = editor.publish().await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time;

use crate::models::{BlockKind, Draft, SnippetSnapshot};
use crate::operations::BlockOperationError;
use crate::services::error::EditorServiceError;
use crate::services::submission::SubmissionService;
use crate::services::upload::UploadService;

/// Default deadline for upload and submission calls.
const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of an upload-backed attachment.
///
/// A resolved upload is only written into the draft when it is still
/// current; otherwise the URL is reported back without being applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The upload resolved and its URL was written into the draft.
    Applied { url: String },
    /// The upload resolved but a newer selection superseded it, or the
    /// target block no longer exists.
    Discarded { url: String },
}

impl AttachOutcome {
    /// The URL the upload resolved to, applied or not.
    pub fn url(&self) -> &str {
        match self {
            AttachOutcome::Applied { url } | AttachOutcome::Discarded { url } => url,
        }
    }

    /// Whether the resolution was written into the draft.
    pub fn is_applied(&self) -> bool {
        matches!(self, AttachOutcome::Applied { .. })
    }
}

/// Service owning one draft editing session and its collaborators.
///
/// Cheap to share behind an `Arc`; all methods take `&self` so overlapping
/// uploads can be in flight while the user keeps editing.
pub struct EditorService<U, S> {
    draft: Mutex<Draft>,
    /// Latest selected upload generation per image block id.
    generations: Mutex<HashMap<String, u64>>,
    uploader: Arc<U>,
    submitter: Arc<S>,
    timeout: Duration,
}

impl<U, S> EditorService<U, S>
where
    U: UploadService,
    S: SubmissionService,
{
    /// Create a service around a fresh empty draft.
    pub fn new(uploader: Arc<U>, submitter: Arc<S>) -> Self {
        Self {
            draft: Mutex::new(Draft::new()),
            generations: Mutex::new(HashMap::new()),
            uploader,
            submitter,
            timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    /// Override the collaborator deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lock the draft for direct metadata and block-field editing.
    ///
    /// Hold the guard only across synchronous edits.
    pub async fn draft(&self) -> MutexGuard<'_, Draft> {
        self.draft.lock().await
    }

    /// Whether the publish action is currently invocable.
    pub async fn can_publish(&self) -> bool {
        self.draft.lock().await.can_publish()
    }

    /// Upload a file for the image block at `index` and write the resolved
    /// URL into its `src`.
    ///
    /// Re-selecting a file for the same block before a prior upload
    /// resolves supersedes it: the stale resolution is discarded when it
    /// eventually arrives. On upload failure the block keeps its last-good
    /// `src`.
    ///
    /// # Errors
    ///
    /// Returns `Block(IndexOutOfRange)` for an invalid index,
    /// `Block(KindMismatch)` when the block at `index` is not an image
    /// block, `UploadFailed` when the collaborator rejects the file, and
    /// `Timeout` when it exceeds the deadline.
    pub async fn attach_image(
        &self,
        index: usize,
        file: &[u8],
    ) -> Result<AttachOutcome, EditorServiceError> {
        let (block_id, generation) = {
            let draft = self.draft.lock().await;
            let block = draft.block(index)?;
            if block.kind() != BlockKind::Image {
                return Err(
                    BlockOperationError::kind_mismatch(BlockKind::Image, block.kind()).into(),
                );
            }
            let id = block.id().to_string();
            let mut generations = self.generations.lock().await;
            let counter = generations.entry(id.clone()).or_insert(0);
            *counter += 1;
            (id, *counter)
        };

        let url = self.upload_with_deadline(file).await?;

        let mut draft = self.draft.lock().await;
        let generations = self.generations.lock().await;
        if generations.get(&block_id) != Some(&generation) {
            tracing::debug!(block = %block_id, "stale upload resolution discarded");
            return Ok(AttachOutcome::Discarded { url });
        }
        drop(generations);

        // The sequence may have been reordered while the upload was in
        // flight; re-resolve the target by id.
        match draft
            .blocks()
            .iter()
            .position(|block| block.id() == block_id)
        {
            Some(position) => {
                draft.block_mut(position)?.set_src(url.clone())?;
                tracing::debug!(block = %block_id, url = %url, "image source resolved");
                Ok(AttachOutcome::Applied { url })
            }
            None => {
                tracing::debug!(block = %block_id, "upload resolved for a removed block");
                Ok(AttachOutcome::Discarded { url })
            }
        }
    }

    /// Upload a file and append it to the gallery block at `index`.
    ///
    /// Gallery attachments accumulate, so there is no supersession here;
    /// every resolved upload appends one entry. A resolution whose target
    /// gallery was removed in the meantime is discarded.
    ///
    /// # Errors
    ///
    /// Returns `Block(IndexOutOfRange)` for an invalid index,
    /// `Block(KindMismatch)` when the block at `index` is not a gallery,
    /// `UploadFailed` when the collaborator rejects the file, and `Timeout`
    /// when it exceeds the deadline.
    pub async fn attach_gallery_image(
        &self,
        index: usize,
        file: &[u8],
    ) -> Result<AttachOutcome, EditorServiceError> {
        let block_id = {
            let draft = self.draft.lock().await;
            let block = draft.block(index)?;
            if block.kind() != BlockKind::Gallery {
                return Err(
                    BlockOperationError::kind_mismatch(BlockKind::Gallery, block.kind()).into(),
                );
            }
            block.id().to_string()
        };

        let url = self.upload_with_deadline(file).await?;

        let mut draft = self.draft.lock().await;
        match draft
            .blocks()
            .iter()
            .position(|block| block.id() == block_id)
        {
            Some(position) => {
                draft.block_mut(position)?.push_image(url.clone())?;
                tracing::debug!(block = %block_id, url = %url, "gallery image appended");
                Ok(AttachOutcome::Applied { url })
            }
            None => {
                tracing::debug!(block = %block_id, "upload resolved for a removed gallery");
                Ok(AttachOutcome::Discarded { url })
            }
        }
    }

    /// Upload a file and set it as the draft's cover image.
    pub async fn set_cover(&self, file: &[u8]) -> Result<String, EditorServiceError> {
        let url = self.upload_with_deadline(file).await?;
        self.draft.lock().await.cover = Some(url.clone());
        tracing::debug!(url = %url, "cover resolved");
        Ok(url)
    }

    /// Publish the draft: check the gate, assemble the immutable snapshot,
    /// and hand it to the submission collaborator.
    ///
    /// The draft is retained unchanged in every case - on success the
    /// caller decides whether to [`reset`](Self::reset), on failure the
    /// user may re-edit and retry with nothing lost.
    ///
    /// # Errors
    ///
    /// Returns `ValidationBlocked` without touching the collaborator when
    /// the gate is closed, `SubmissionFailed` when the collaborator rejects
    /// the snapshot, and `Timeout` when it exceeds the deadline.
    pub async fn publish(&self) -> Result<SnippetSnapshot, EditorServiceError> {
        let snapshot = {
            let draft = self.draft.lock().await;
            if !draft.can_publish() {
                return Err(EditorServiceError::ValidationBlocked);
            }
            draft.snapshot()
        };

        match time::timeout(self.timeout, self.submitter.submit(&snapshot)).await {
            Ok(Ok(())) => {
                tracing::info!(
                    snippet = %snapshot.id,
                    blocks = snapshot.content.len(),
                    "snippet published"
                );
                Ok(snapshot)
            }
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "submission failed, draft retained");
                Err(err.into())
            }
            Err(_) => {
                tracing::warn!(
                    seconds = self.timeout.as_secs(),
                    "submission timed out, draft retained"
                );
                Err(EditorServiceError::timeout("submission", self.timeout.as_secs()))
            }
        }
    }

    /// Discard the session: replace the draft with a fresh empty one.
    ///
    /// In-flight uploads resolve against the old block ids and are
    /// discarded.
    pub async fn reset(&self) {
        *self.draft.lock().await = Draft::new();
        self.generations.lock().await.clear();
        tracing::debug!("draft reset");
    }

    async fn upload_with_deadline(&self, file: &[u8]) -> Result<String, EditorServiceError> {
        match time::timeout(self.timeout, self.uploader.upload(file)).await {
            Ok(Ok(url)) => Ok(url),
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "upload failed");
                Err(err.into())
            }
            Err(_) => {
                tracing::warn!(seconds = self.timeout.as_secs(), "upload timed out");
                Err(EditorServiceError::timeout("upload", self.timeout.as_secs()))
            }
        }
    }
}
