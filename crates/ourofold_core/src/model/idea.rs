//! Idea domain model.
//!
//! # Responsibility
//! - Define the recursive node record of the idea notebook.
//! - Provide constructors and validation helpers for editor/seed paths.
//!
//! # Invariants
//! - `id` is stable and unique across the whole tree.
//! - A child's `depth` is always its parent's `depth + 1`.
//! - Children are owned singly by their parent; there are no back-pointers.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

const GENERATED_ID_PREFIX: &str = "idea-";

/// Shared handle to one idea node.
///
/// Snapshots share unchanged subtrees through this handle, so
/// `Arc::ptr_eq` doubles as a cheap "did this subtree change" check.
pub type IdeaRef = Arc<Idea>;

/// Opaque, stable identifier of one idea.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(String);

impl IdeaId {
    /// Generates a fresh identifier (`idea-<uuid v4>`).
    pub fn generate() -> Self {
        Self(format!("{GENERATED_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Wraps an existing identifier, e.g. from seed or imported data.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for IdeaId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdeaId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for IdeaId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation failures for idea records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaValidationError {
    /// Identifier is empty after trim.
    BlankId,
    /// Title is empty after trim.
    BlankTitle(IdeaId),
    /// The same tag appears twice on one idea.
    DuplicateTag { id: IdeaId, tag: String },
    /// Two ideas in one tree share an identifier.
    DuplicateId(IdeaId),
    /// A child's stored depth disagrees with its position.
    DepthMismatch {
        id: IdeaId,
        expected: u32,
        actual: u32,
    },
}

impl Display for IdeaValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "idea id must not be blank"),
            Self::BlankTitle(id) => write!(f, "idea title must not be blank: {id}"),
            Self::DuplicateTag { id, tag } => write!(f, "duplicate tag `{tag}` on idea {id}"),
            Self::DuplicateId(id) => write!(f, "idea id is not unique: {id}"),
            Self::DepthMismatch {
                id,
                expected,
                actual,
            } => write!(
                f,
                "idea {id} has depth {actual}, expected {expected} from its position"
            ),
        }
    }
}

impl Error for IdeaValidationError {}

/// One node of the idea notebook.
///
/// Serialized with camelCase keys (`isExpanded`) to match the record shape
/// used by presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Stable identifier; the only lookup key.
    pub id: IdeaId,
    /// Display title. The editor never persists a blank one.
    pub title: String,
    /// Free text body, may be empty.
    #[serde(default)]
    pub content: String,
    /// Tags in insertion order, no exact duplicates.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ancestor count; `0` for root-level ideas.
    #[serde(default)]
    pub depth: u32,
    /// Ordered children; order is display order.
    #[serde(default)]
    pub children: Vec<IdeaRef>,
    /// Display flag, meaningful only when `children` is non-empty.
    #[serde(default)]
    pub is_expanded: bool,
}

impl Idea {
    /// Creates a collapsed, childless root idea with a generated ID.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(IdeaId::generate(), title)
    }

    /// Creates a collapsed, childless root idea with a caller-provided ID.
    pub fn with_id(id: impl Into<IdeaId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            depth: 0,
            children: Vec::new(),
            is_expanded: false,
        }
    }

    /// Builder-style content setter, mostly for seed data.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Builder-style tag setter. Does not deduplicate.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style child setter; children are rebased under `self.depth`.
    pub fn children(mut self, children: impl IntoIterator<Item = Idea>) -> Self {
        let child_depth = self.depth + 1;
        self.children = children
            .into_iter()
            .map(|child| Arc::new(child.rebased(child_depth)))
            .collect();
        self
    }

    /// Builder-style expand flag setter.
    pub fn expanded(mut self, is_expanded: bool) -> Self {
        self.is_expanded = is_expanded;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns a copy whose subtree depths are recomputed from `depth`.
    ///
    /// Subtrees that are already at the right depth are shared, not copied.
    pub fn rebased(mut self, depth: u32) -> Self {
        if self.depth == depth && subtree_depths_consistent(&self) {
            return self;
        }
        self.depth = depth;
        self.children = self
            .children
            .into_iter()
            .map(|child| {
                if child.depth == depth + 1 && subtree_depths_consistent(&child) {
                    child
                } else {
                    Arc::new(Arc::unwrap_or_clone(child).rebased(depth + 1))
                }
            })
            .collect();
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_len())
            .sum::<usize>()
    }

    /// Validates this idea and its whole subtree.
    ///
    /// # Errors
    /// - Blank id or title.
    /// - Duplicate tag (exact match).
    /// - Child depth not equal to parent depth + 1.
    pub fn validate(&self) -> Result<(), IdeaValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(IdeaValidationError::BlankId);
        }
        if self.title.trim().is_empty() {
            return Err(IdeaValidationError::BlankTitle(self.id.clone()));
        }

        let mut seen = HashSet::new();
        for tag in &self.tags {
            if !seen.insert(tag.as_str()) {
                return Err(IdeaValidationError::DuplicateTag {
                    id: self.id.clone(),
                    tag: tag.clone(),
                });
            }
        }

        for child in &self.children {
            if child.depth != self.depth + 1 {
                return Err(IdeaValidationError::DepthMismatch {
                    id: child.id.clone(),
                    expected: self.depth + 1,
                    actual: child.depth,
                });
            }
            child.validate()?;
        }
        Ok(())
    }
}

fn subtree_depths_consistent(idea: &Idea) -> bool {
    idea.children
        .iter()
        .all(|child| child.depth == idea.depth + 1 && subtree_depths_consistent(child))
}
