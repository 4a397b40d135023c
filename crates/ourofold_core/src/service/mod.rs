//! Core use-case services.
//!
//! # Responsibility
//! - Turn presentation events into tree snapshots.
//! - Keep presentation layers decoupled from store and layout details.

pub mod editor_session;
pub mod notebook_service;
