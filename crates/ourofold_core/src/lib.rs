//! Core engine for the OuroFold idea notebook.
//! Owns the idea tree, its copy-on-write mutations, and the spiral layout.

pub mod layout;
pub mod logging;
pub mod model;
pub mod sample;
pub mod service;
pub mod store;

pub use layout::spiral::{
    flatten, is_drag_enabled, position_for, reorder_roots, Connector, FlatEntry, PlacedIdea,
    Placement, SpiralConfig, SpiralLayout,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::idea::{Idea, IdeaId, IdeaRef, IdeaValidationError};
pub use sample::sample_ideas;
pub use service::editor_session::{EditTarget, EditorError, EditorSession, SaveOutcome};
pub use service::notebook_service::{Notice, NotebookError, NotebookResult, NotebookService};
pub use store::idea_tree::{IdeaTree, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
