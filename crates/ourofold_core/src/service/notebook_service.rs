//! Notebook use-case service.
//!
//! # Responsibility
//! - Own the current tree snapshot as the single writer.
//! - Translate presentation events (toggle, add-child, edit-save, drag-reorder)
//!   into store calls and report what changed.
//!
//! # Invariants
//! - Every mutation is applied to the snapshot produced by the previous one.
//! - At most one editor session is open at a time.
//! - A failed save on a blank title keeps the session open.

use crate::layout::spiral::{self, SpiralConfig, SpiralLayout};
use crate::model::idea::IdeaId;
use crate::service::editor_session::{EditorError, EditorSession, SaveOutcome};
use crate::store::idea_tree::{IdeaTree, StoreError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for notebook use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookError {
    /// `save_editor` called with no open session.
    EditorClosed,
    /// Draft rejected or its target vanished.
    Editor(EditorError),
    /// Target idea does not exist.
    Store(StoreError),
    /// Flat entry at this index is not a drag source.
    DragDisabled(usize),
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EditorClosed => write!(f, "no idea editor is open"),
            Self::Editor(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::DragDisabled(index) => {
                write!(f, "entry at index {index} cannot be dragged")
            }
        }
    }
}

impl Error for NotebookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Editor(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EditorError> for NotebookError {
    fn from(value: EditorError) -> Self {
        Self::Editor(value)
    }
}

impl From<StoreError> for NotebookError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result type used by notebook service operations.
pub type NotebookResult<T> = Result<T, NotebookError>;

/// User-facing summary of a committed change, e.g. for a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    IdeaCreated { title: String },
    ChildIdeaCreated { title: String },
    IdeaUpdated { title: String },
    IdeasReordered,
}

impl Notice {
    /// Short heading.
    pub fn headline(&self) -> &'static str {
        match self {
            Self::IdeaCreated { .. } => "New idea created",
            Self::ChildIdeaCreated { .. } => "Child idea created",
            Self::IdeaUpdated { .. } => "Idea updated",
            Self::IdeasReordered => "Ideas reordered",
        }
    }

    /// One-line description.
    pub fn message(&self) -> String {
        match self {
            Self::IdeaCreated { title } | Self::ChildIdeaCreated { title } => {
                format!("\"{title}\" added to the spiral")
            }
            Self::IdeaUpdated { title } => format!("\"{title}\" has been modified"),
            Self::IdeasReordered => "Your idea structure has been updated".to_string(),
        }
    }
}

impl From<SaveOutcome> for Notice {
    fn from(value: SaveOutcome) -> Self {
        match value {
            SaveOutcome::CreatedRoot { title, .. } => Self::IdeaCreated { title },
            SaveOutcome::CreatedChild { title, .. } => Self::ChildIdeaCreated { title },
            SaveOutcome::Updated { title, .. } => Self::IdeaUpdated { title },
        }
    }
}

/// Notebook facade owning the current snapshot.
pub struct NotebookService {
    tree: IdeaTree,
    editor: Option<EditorSession>,
    config: SpiralConfig,
}

impl NotebookService {
    /// Creates a service over `tree` with the default spiral geometry.
    pub fn new(tree: IdeaTree) -> Self {
        Self::with_config(tree, SpiralConfig::default())
    }

    pub fn with_config(tree: IdeaTree, config: SpiralConfig) -> Self {
        Self {
            tree,
            editor: None,
            config,
        }
    }

    /// Current committed snapshot.
    pub fn snapshot(&self) -> &IdeaTree {
        &self.tree
    }

    /// Flattened, placed view of the current snapshot.
    pub fn layout(&self) -> SpiralLayout {
        SpiralLayout::compute(&self.tree, &self.config)
    }

    /// Flips the expand flag of `id`.
    ///
    /// # Errors
    /// - `NotebookError::Store` when `id` is unknown.
    pub fn toggle_expand(&mut self, id: &IdeaId) -> NotebookResult<()> {
        self.tree = self.tree.try_toggle_expand(id)?;
        debug!("event=idea_toggle module=notebook status=ok");
        Ok(())
    }

    /// Opens an empty editor for a new root idea, replacing any open session.
    pub fn begin_create_root(&mut self) -> &mut EditorSession {
        self.editor.insert(EditorSession::create_root())
    }

    /// Opens an empty editor for a new child of `parent_id`.
    ///
    /// # Errors
    /// - `NotebookError::Store` when `parent_id` is unknown.
    pub fn begin_add_child(&mut self, parent_id: &IdeaId) -> NotebookResult<&mut EditorSession> {
        if !self.tree.contains(parent_id) {
            return Err(StoreError::IdeaNotFound(parent_id.clone()).into());
        }
        Ok(self
            .editor
            .insert(EditorSession::create_child(parent_id.clone())))
    }

    /// Opens an editor pre-filled from idea `id`.
    ///
    /// # Errors
    /// - `NotebookError::Store` when `id` is unknown.
    pub fn begin_edit(&mut self, id: &IdeaId) -> NotebookResult<&mut EditorSession> {
        let idea = self
            .tree
            .find(id)
            .ok_or_else(|| StoreError::IdeaNotFound(id.clone()))?;
        let session = EditorSession::edit(idea);
        Ok(self.editor.insert(session))
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorSession> {
        self.editor.as_mut()
    }

    /// Closes the editor without saving.
    pub fn cancel_editor(&mut self) {
        if self.editor.take().is_some() {
            debug!("event=editor_cancel module=notebook status=ok");
        }
    }

    /// Commits the open editor session and closes it.
    ///
    /// # Errors
    /// - `NotebookError::EditorClosed` when no session is open.
    /// - `NotebookError::Editor(BlankTitle)`; the session stays open.
    /// - `NotebookError::Editor(Store(..))` when the target vanished; the
    ///   session is closed.
    pub fn save_editor(&mut self) -> NotebookResult<Notice> {
        let session = self.editor.take().ok_or(NotebookError::EditorClosed)?;
        match session.save(&self.tree) {
            Ok((tree, outcome)) => {
                self.tree = tree;
                info!(
                    "event=idea_save module=notebook status=ok kind={}",
                    outcome_kind(&outcome)
                );
                Ok(outcome.into())
            }
            Err(EditorError::BlankTitle) => {
                self.editor = Some(session);
                Err(EditorError::BlankTitle.into())
            }
            Err(err) => {
                info!("event=idea_save module=notebook status=error reason=target_missing");
                Err(err.into())
            }
        }
    }

    /// Applies a finished drag from flat index `source` to `destination`.
    ///
    /// A drop outside any target (`destination == None`) changes nothing and
    /// returns `Ok(None)`.
    ///
    /// # Errors
    /// - `NotebookError::DragDisabled` when `source` is not a root-level entry.
    pub fn reorder(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> NotebookResult<Option<Notice>> {
        let Some(destination) = destination else {
            return Ok(None);
        };
        let flat = spiral::flatten(&self.tree);
        match flat.get(source) {
            None => return Ok(None),
            Some(entry) if !spiral::is_drag_enabled(entry) => {
                return Err(NotebookError::DragDisabled(source));
            }
            Some(_) => {}
        }

        let roots = spiral::reorder_roots(&flat, source, destination);
        self.tree = self.tree.replace_root_order(roots);
        info!(
            "event=root_reorder module=notebook status=ok source={} destination={}",
            source, destination
        );
        Ok(Some(Notice::IdeasReordered))
    }
}

fn outcome_kind(outcome: &SaveOutcome) -> &'static str {
    match outcome {
        SaveOutcome::CreatedRoot { .. } => "create_root",
        SaveOutcome::CreatedChild { .. } => "create_child",
        SaveOutcome::Updated { .. } => "update",
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, NotebookError, NotebookService};
    use crate::model::idea::{Idea, IdeaId};
    use crate::service::editor_session::EditorError;
    use crate::store::idea_tree::IdeaTree;

    fn service() -> NotebookService {
        NotebookService::new(IdeaTree::new([
            Idea::with_id("a", "A").children([Idea::with_id("a1", "A1")]),
            Idea::with_id("b", "B"),
        ]))
    }

    #[test]
    fn blank_save_keeps_editor_open() {
        let mut notebook = service();
        notebook.begin_create_root().set_title("  ");
        assert_eq!(
            notebook.save_editor().unwrap_err(),
            NotebookError::Editor(EditorError::BlankTitle)
        );
        assert!(notebook.editor().is_some());

        notebook
            .editor_mut()
            .expect("editor stays open")
            .set_title("Now titled");
        let notice = notebook.save_editor().unwrap();
        assert_eq!(notice.headline(), "New idea created");
        assert_eq!(notice.message(), "\"Now titled\" added to the spiral");
        assert!(notebook.editor().is_none());
    }

    #[test]
    fn save_without_session_fails() {
        let mut notebook = service();
        assert_eq!(
            notebook.save_editor().unwrap_err(),
            NotebookError::EditorClosed
        );
    }

    #[test]
    fn child_creation_expands_parent() {
        let mut notebook = service();
        notebook
            .begin_add_child(&IdeaId::new("b"))
            .unwrap()
            .set_title("B1");
        let notice = notebook.save_editor().unwrap();
        assert!(matches!(notice, Notice::ChildIdeaCreated { .. }));

        let b = notebook.snapshot().find(&IdeaId::new("b")).unwrap();
        assert!(b.is_expanded);
        assert_eq!(b.children[0].depth, 1);
        assert_eq!(notebook.layout().len(), 3);
    }

    #[test]
    fn dragging_nested_entry_is_rejected() {
        let mut notebook = service();
        notebook.toggle_expand(&IdeaId::new("a")).unwrap();
        assert_eq!(
            notebook.reorder(1, Some(0)).unwrap_err(),
            NotebookError::DragDisabled(1)
        );
        assert_eq!(notebook.reorder(0, None).unwrap(), None);
    }

    #[test]
    fn cancel_discards_pending_target() {
        let mut notebook = service();
        notebook.begin_add_child(&IdeaId::new("a")).unwrap();
        notebook.cancel_editor();
        assert_eq!(
            notebook.save_editor().unwrap_err(),
            NotebookError::EditorClosed
        );
        assert!(notebook
            .begin_edit(&IdeaId::new("missing"))
            .is_err());
    }
}
