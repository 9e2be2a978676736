//! Fieldnote Core Editing Model
//!
//! This crate provides the block-content editing core behind the Fieldnote
//! snippet composer: the ordered block sequence, its mutation operations,
//! the derived publish gate, and submission of an immutable snapshot to an
//! external service.
//!
//! # Architecture
//!
//! - **Sum-typed blocks**: one enum variant per content kind (text, image,
//!   gallery, quote); invalid field combinations are unrepresentable
//! - **Explicit aggregate**: the `Draft` owns the sequence; components
//!   receive a handle, there is no ambient state
//! - **Derived gate**: publish readiness is recomputed from current fields
//!   on every call, never cached
//! - **Collaborator seams**: upload, submission, and session storage are
//!   async traits; the core holds no I/O of its own
//!
//! # Modules
//!
//! - [`models`] - Data structures (Block, Draft, SnippetSnapshot)
//! - [`operations`] - Block store operation types and errors
//! - [`services`] - Editor orchestration, auth session, collaborator seams

pub mod models;
pub mod operations;
pub mod services;

// Re-export commonly used types
pub use models::*;
pub use operations::{BlockOperationError, MoveDirection};
pub use services::*;
