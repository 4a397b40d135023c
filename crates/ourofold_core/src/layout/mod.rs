//! Display-order projection and spiral placement.
//!
//! # Responsibility
//! - Turn tree snapshots into what presentation renders, in order.
//! - Translate flat drag-and-drop results back into store calls.

pub mod spiral;
