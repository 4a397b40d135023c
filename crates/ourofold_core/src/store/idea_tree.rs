//! Copy-on-write idea tree store.
//!
//! # Responsibility
//! - Own the ordered root sequence of the notebook.
//! - Provide pure find/update/insert/reorder operations returning new snapshots.
//!
//! # Invariants
//! - No operation mutates `self`; every mutator returns a new `IdeaTree`.
//! - Only the path from a root to the changed node is rebuilt. Every other
//!   subtree is shared with the previous snapshot (`Arc::ptr_eq` holds).
//! - An unknown id is a silent no-op for the unchecked API and a
//!   `StoreError::IdeaNotFound` for the `try_*` API.
//! - Inserted subtrees are rebased so `depth` matches their new position.

use crate::model::idea::{Idea, IdeaId, IdeaRef, IdeaValidationError};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Result type used by checked store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from checked idea tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No idea with this id exists anywhere in the tree.
    IdeaNotFound(IdeaId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdeaNotFound(id) => write!(f, "idea not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Immutable snapshot of the whole notebook.
///
/// Cloning is shallow: only the root vector is copied, nodes are shared.
/// Deserializing goes through [`IdeaTree::new`], so stored depths are
/// recomputed from nesting and never trusted from the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdeaTree {
    roots: Vec<IdeaRef>,
}

impl IdeaTree {
    /// Builds a tree from owned root ideas, rebasing each subtree to depth 0.
    pub fn new(roots: impl IntoIterator<Item = Idea>) -> Self {
        Self {
            roots: roots
                .into_iter()
                .map(|idea| Arc::new(idea.rebased(0)))
                .collect(),
        }
    }

    /// Root-level ideas in display order.
    pub fn roots(&self) -> &[IdeaRef] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of ideas in the tree, collapsed or not.
    pub fn len(&self) -> usize {
        self.roots.iter().map(|root| root.subtree_len()).sum()
    }

    /// Depth-first pre-order search across the whole tree.
    ///
    /// Ignores `is_expanded`; collapsed subtrees are searched too.
    pub fn find(&self, id: &IdeaId) -> Option<&IdeaRef> {
        let path = locate(&self.roots, id)?;
        let mut nodes = &self.roots;
        let mut found = None;
        for index in path {
            let node = &nodes[index];
            nodes = &node.children;
            found = Some(node);
        }
        found
    }

    pub fn contains(&self, id: &IdeaId) -> bool {
        locate(&self.roots, id).is_some()
    }

    /// Replaces the idea `id` with `transform(idea)`.
    ///
    /// Ancestors on the path are rebuilt; all other nodes are shared.
    /// Returns a shallow copy of `self` when `id` is not present.
    pub fn update_by_id<F>(&self, id: &IdeaId, transform: F) -> IdeaTree
    where
        F: FnOnce(&Idea) -> Idea,
    {
        match self.try_update_by_id(id, transform) {
            Ok(tree) => tree,
            Err(_) => {
                warn!("event=idea_update module=store status=noop reason=id_not_found");
                self.clone()
            }
        }
    }

    /// Checked variant of [`IdeaTree::update_by_id`].
    ///
    /// # Errors
    /// - `StoreError::IdeaNotFound` when `id` is not present.
    pub fn try_update_by_id<F>(&self, id: &IdeaId, transform: F) -> StoreResult<IdeaTree>
    where
        F: FnOnce(&Idea) -> Idea,
    {
        let path =
            locate(&self.roots, id).ok_or_else(|| StoreError::IdeaNotFound(id.clone()))?;
        debug!(
            "event=idea_update module=store status=ok path_len={}",
            path.len()
        );
        Ok(Self {
            roots: rebuild_path(&self.roots, &path, transform),
        })
    }

    /// Appends `new_idea` as the last child of `parent_id` and expands the parent.
    ///
    /// The inserted subtree is rebased to `parent.depth + 1`. Callers must
    /// pass an id not already in the tree (`Idea::new` generates one).
    /// Returns a shallow copy of `self` when `parent_id` is not present.
    pub fn add_child(&self, parent_id: &IdeaId, new_idea: Idea) -> IdeaTree {
        match self.try_add_child(parent_id, new_idea) {
            Ok(tree) => tree,
            Err(_) => {
                warn!("event=idea_add_child module=store status=noop reason=parent_not_found");
                self.clone()
            }
        }
    }

    /// Checked variant of [`IdeaTree::add_child`].
    ///
    /// # Errors
    /// - `StoreError::IdeaNotFound` when `parent_id` is not present.
    ///
    /// # Panics
    /// - In debug builds, when `new_idea.id` already exists in the tree.
    pub fn try_add_child(&self, parent_id: &IdeaId, new_idea: Idea) -> StoreResult<IdeaTree> {
        debug_assert!(
            !self.contains(&new_idea.id),
            "duplicate idea id on insert: {}",
            new_idea.id
        );
        self.try_update_by_id(parent_id, move |parent| {
            let mut parent = parent.clone();
            let child = new_idea.rebased(parent.depth + 1);
            parent.children.push(Arc::new(child));
            parent.is_expanded = true;
            parent
        })
    }

    /// Flips `is_expanded` on `id`.
    ///
    /// Leaf ideas are left untouched; toggling twice restores the input.
    pub fn toggle_expand(&self, id: &IdeaId) -> IdeaTree {
        match self.try_toggle_expand(id) {
            Ok(tree) => tree,
            Err(_) => {
                warn!("event=idea_toggle module=store status=noop reason=id_not_found");
                self.clone()
            }
        }
    }

    /// Checked variant of [`IdeaTree::toggle_expand`].
    ///
    /// # Errors
    /// - `StoreError::IdeaNotFound` when `id` is not present.
    pub fn try_toggle_expand(&self, id: &IdeaId) -> StoreResult<IdeaTree> {
        let target = self
            .find(id)
            .ok_or_else(|| StoreError::IdeaNotFound(id.clone()))?;
        if !target.has_children() {
            debug!("event=idea_toggle module=store status=noop reason=leaf");
            return Ok(self.clone());
        }
        self.try_update_by_id(id, |idea| {
            let mut idea = idea.clone();
            idea.is_expanded = !idea.is_expanded;
            idea
        })
    }

    /// Appends `idea` as a new root-level idea.
    ///
    /// Callers must pass an id not already in the tree (`Idea::new`
    /// generates one).
    ///
    /// # Panics
    /// - In debug builds, when `idea.id` already exists in the tree.
    pub fn push_root(&self, idea: Idea) -> IdeaTree {
        debug_assert!(
            !self.contains(&idea.id),
            "duplicate idea id on insert: {}",
            idea.id
        );
        let mut roots = self.roots.clone();
        roots.push(Arc::new(idea.rebased(0)));
        Self { roots }
    }

    /// Replaces the root-level order wholesale.
    ///
    /// Subtree contents are not touched; callers pass the same root nodes
    /// in a new order (see `layout::reorder_roots`).
    pub fn replace_root_order(&self, roots: Vec<IdeaRef>) -> IdeaTree {
        debug!(
            "event=root_reorder module=store status=ok roots={}",
            roots.len()
        );
        Self { roots }
    }

    /// Validates every idea and global id uniqueness.
    ///
    /// Mutators never call this; it is meant for seed/imported data.
    pub fn validate(&self) -> Result<(), IdeaValidationError> {
        let mut seen = HashSet::new();
        for root in &self.roots {
            if root.depth != 0 {
                return Err(IdeaValidationError::DepthMismatch {
                    id: root.id.clone(),
                    expected: 0,
                    actual: root.depth,
                });
            }
            root.validate()?;
            collect_unique_ids(root, &mut seen)?;
        }
        Ok(())
    }
}

impl From<Vec<Idea>> for IdeaTree {
    fn from(value: Vec<Idea>) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for IdeaTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Idea>::deserialize(deserializer).map(Self::new)
    }
}

/// Finds the child-index path to `id`, pre-order, first match wins.
fn locate(nodes: &[IdeaRef], id: &IdeaId) -> Option<Vec<usize>> {
    for (index, node) in nodes.iter().enumerate() {
        if &node.id == id {
            return Some(vec![index]);
        }
        if let Some(mut rest) = locate(&node.children, id) {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

/// Rebuilds `nodes` along `path`, applying `transform` at its end.
fn rebuild_path<F>(nodes: &[IdeaRef], path: &[usize], transform: F) -> Vec<IdeaRef>
where
    F: FnOnce(&Idea) -> Idea,
{
    let mut rebuilt = nodes.to_vec();
    let Some((&index, rest)) = path.split_first() else {
        return rebuilt;
    };
    let current = &nodes[index];
    let replacement = if rest.is_empty() {
        transform(current.as_ref())
    } else {
        let mut ancestor = Idea::clone(current);
        ancestor.children = rebuild_path(&current.children, rest, transform);
        ancestor
    };
    rebuilt[index] = Arc::new(replacement);
    rebuilt
}

fn collect_unique_ids<'a>(
    idea: &'a Idea,
    seen: &mut HashSet<&'a IdeaId>,
) -> Result<(), IdeaValidationError> {
    if !seen.insert(&idea.id) {
        return Err(IdeaValidationError::DuplicateId(idea.id.clone()));
    }
    for child in &idea.children {
        collect_unique_ids(child, seen)?;
    }
    Ok(())
}
