//! In-memory idea tree store.
//!
//! # Responsibility
//! - Hold the canonical nested collection of ideas as immutable snapshots.
//! - Keep traversal and structural-sharing details inside this boundary.
//!
//! # Invariants
//! - Mutators return new snapshots and never alias changed nodes.
//! - Store operations do not validate titles or tags; callers do.

pub mod idea_tree;
