//! Domain model for the idea notebook.
//!
//! # Responsibility
//! - Define the canonical recursive node shared by store, layout and editor.
//!
//! # Invariants
//! - Every idea is identified by a stable `IdeaId`, unique across the tree.
//! - Ideas are never deleted; the notebook only grows, reorders and edits.

pub mod idea;
