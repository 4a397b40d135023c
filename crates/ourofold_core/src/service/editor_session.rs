//! Idea editor session.
//!
//! # Responsibility
//! - Carry the explicit insertion/edit target between "open editor" and "save".
//! - Hold the draft fields and apply the editor's input rules.
//! - Commit a saved draft to a tree snapshot.
//!
//! # Invariants
//! - A blank title (after trim) is never committed.
//! - Draft tags are trimmed, non-blank, and unique by exact match.
//! - Pending tag input is never saved; only committed tags are.
//! - Editing keeps the idea's id, depth, children and expand flag.

use crate::model::idea::{Idea, IdeaId, IdeaRef};
use crate::store::idea_tree::{IdeaTree, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Where a saved draft goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Append a new root-level idea.
    CreateRoot,
    /// Append a new child under `parent_id`.
    CreateChild { parent_id: IdeaId },
    /// Replace the fields of an existing idea.
    Edit { id: IdeaId },
}

/// Errors from committing an editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Title is empty after trim.
    BlankTitle,
    /// Target parent or idea is gone from the snapshot.
    Store(StoreError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "idea title must not be blank"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::BlankTitle => None,
        }
    }
}

impl From<StoreError> for EditorError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What a successful save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    CreatedRoot { id: IdeaId, title: String },
    CreatedChild {
        parent_id: IdeaId,
        id: IdeaId,
        title: String,
    },
    Updated { id: IdeaId, title: String },
}

impl SaveOutcome {
    pub fn id(&self) -> &IdeaId {
        match self {
            Self::CreatedRoot { id, .. }
            | Self::CreatedChild { id, .. }
            | Self::Updated { id, .. } => id,
        }
    }
}

/// Open editor state: target plus draft fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    target: EditTarget,
    title: String,
    content: String,
    tags: Vec<String>,
    tag_input: String,
}

impl EditorSession {
    /// Opens an empty draft for a new root-level idea.
    pub fn create_root() -> Self {
        Self::empty(EditTarget::CreateRoot)
    }

    /// Opens an empty draft for a new child of `parent_id`.
    pub fn create_child(parent_id: IdeaId) -> Self {
        Self::empty(EditTarget::CreateChild { parent_id })
    }

    /// Opens a draft pre-filled from `idea`.
    pub fn edit(idea: &IdeaRef) -> Self {
        Self {
            target: EditTarget::Edit {
                id: idea.id.clone(),
            },
            title: idea.title.clone(),
            content: idea.content.clone(),
            tags: idea.tags.clone(),
            tag_input: String::new(),
        }
    }

    fn empty(target: EditTarget) -> Self {
        Self {
            target,
            title: String::new(),
            content: String::new(),
            tags: Vec::new(),
            tag_input: String::new(),
        }
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Adds a trimmed tag. Returns `false` for blank input or an exact duplicate.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Text typed into the tag field but not yet committed.
    pub fn tag_input(&self) -> &str {
        &self.tag_input
    }

    pub fn set_tag_input(&mut self, input: impl Into<String>) {
        self.tag_input = input.into();
    }

    /// Commits the tag field through [`EditorSession::add_tag`].
    ///
    /// The field is cleared when the tag is accepted and kept otherwise.
    pub fn commit_tag_input(&mut self) -> bool {
        let input = std::mem::take(&mut self.tag_input);
        if self.add_tag(&input) {
            return true;
        }
        self.tag_input = input;
        false
    }

    /// Removes `tag`. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    /// Whether `save` would pass the title check.
    pub fn can_save(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Commits the draft to `tree` and returns the new snapshot.
    ///
    /// # Errors
    /// - `EditorError::BlankTitle` when the trimmed title is empty.
    /// - `EditorError::Store` when the parent or edited idea no longer exists.
    pub fn save(&self, tree: &IdeaTree) -> Result<(IdeaTree, SaveOutcome), EditorError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(EditorError::BlankTitle);
        }
        let title = title.to_string();
        let content = self.content.trim().to_string();
        let tags = self.tags.clone();

        match &self.target {
            EditTarget::CreateRoot => {
                let mut idea = Idea::new(title.clone()).content(content);
                idea.tags = tags;
                let id = idea.id.clone();
                Ok((tree.push_root(idea), SaveOutcome::CreatedRoot { id, title }))
            }
            EditTarget::CreateChild { parent_id } => {
                let mut idea = Idea::new(title.clone()).content(content);
                idea.tags = tags;
                let id = idea.id.clone();
                let next = tree.try_add_child(parent_id, idea)?;
                Ok((
                    next,
                    SaveOutcome::CreatedChild {
                        parent_id: parent_id.clone(),
                        id,
                        title,
                    },
                ))
            }
            EditTarget::Edit { id } => {
                let replacement_title = title.clone();
                let next = tree.try_update_by_id(id, move |current| Idea {
                    title: replacement_title,
                    content,
                    tags,
                    ..current.clone()
                })?;
                Ok((
                    next,
                    SaveOutcome::Updated {
                        id: id.clone(),
                        title,
                    },
                ))
            }
        }
    }
}
