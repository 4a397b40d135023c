//! Spiral layout engine.
//!
//! # Responsibility
//! - Flatten an idea tree into the visible, depth-annotated display order.
//! - Place each visible entry on a spiral (offset, stacking, opacity).
//! - Map a flat drag-and-drop move back onto root-level order.
//!
//! # Invariants
//! - Flattening is pre-order and only descends into expanded, non-empty nodes.
//! - `stack_order` strictly decreases with the display index.
//! - `opacity` never increases with depth and never drops below the floor.
//! - Reordering only changes the relative order of root-level ideas.

use crate::model::idea::IdeaRef;
use crate::store::idea_tree::IdeaTree;
use log::debug;
use std::sync::Arc;

const DEFAULT_ANGLE_STEP_DEG: f64 = 15.0;
const DEFAULT_DEPTH_ANGLE_STEP_DEG: f64 = 30.0;
const DEFAULT_BASE_RADIUS: f64 = 50.0;
const DEFAULT_RADIUS_STEP: f64 = 80.0;
const DEFAULT_MAX_RADIUS: f64 = 300.0;
const DEFAULT_WOBBLE_AMPLITUDE: f64 = 10.0;
const DEFAULT_WOBBLE_FREQUENCY: f64 = 0.5;
const DEFAULT_STACK_BASE: i64 = 100;
const DEFAULT_OPACITY_STEP: f64 = 0.15;
const DEFAULT_OPACITY_FLOOR: f64 = 0.3;

/// One visible idea in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Shared node from the snapshot that produced this entry.
    pub idea: IdeaRef,
    /// Depth derived from the traversal, not read from the node.
    pub depth: u32,
}

/// Visual placement of one flattened entry, relative to the spiral center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub dx: f64,
    pub dy: f64,
    /// Higher renders on top.
    pub stack_order: i64,
    /// In `[opacity_floor, 1.0]`; a floor above 1.0 or NaN acts as 1.0.
    pub opacity: f64,
}

/// Tunables for the spiral geometry.
///
/// Only the ordering/opacity contracts are stable; the exact geometry may
/// be tuned freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralConfig {
    /// Degrees added per display index.
    pub angle_step_deg: f64,
    /// Degrees added per depth level.
    pub depth_angle_step_deg: f64,
    pub base_radius: f64,
    /// Radius added per depth level.
    pub radius_step: f64,
    /// Cap applied before the wobble.
    pub max_radius: f64,
    /// Peak radius perturbation keyed by index.
    pub wobble_amplitude: f64,
    pub wobble_frequency: f64,
    /// Stack order of the first entry.
    pub stack_base: i64,
    /// Opacity lost per depth level.
    pub opacity_step: f64,
    pub opacity_floor: f64,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            angle_step_deg: DEFAULT_ANGLE_STEP_DEG,
            depth_angle_step_deg: DEFAULT_DEPTH_ANGLE_STEP_DEG,
            base_radius: DEFAULT_BASE_RADIUS,
            radius_step: DEFAULT_RADIUS_STEP,
            max_radius: DEFAULT_MAX_RADIUS,
            wobble_amplitude: DEFAULT_WOBBLE_AMPLITUDE,
            wobble_frequency: DEFAULT_WOBBLE_FREQUENCY,
            stack_base: DEFAULT_STACK_BASE,
            opacity_step: DEFAULT_OPACITY_STEP,
            opacity_floor: DEFAULT_OPACITY_FLOOR,
        }
    }
}

impl SpiralConfig {
    /// Computes the placement of entry `index` at `depth`.
    ///
    /// Pure in `(index, depth)`; the idea itself does not matter.
    pub fn position_for(&self, index: usize, depth: u32) -> Placement {
        let index_f = index as f64;
        let depth_f = f64::from(depth);

        let angle = (index_f * self.angle_step_deg + depth_f * self.depth_angle_step_deg)
            .to_radians();
        let radius = (self.base_radius + depth_f * self.radius_step).min(self.max_radius);
        let wobble = (index_f * self.wobble_frequency).sin() * self.wobble_amplitude;
        let radius = radius + wobble;

        let stack_order = self
            .stack_base
            .saturating_sub(i64::try_from(index).unwrap_or(i64::MAX));
        // `f64::min` drops NaN, so the clamp bounds are always ordered.
        let floor = self.opacity_floor.min(1.0);
        let opacity = (1.0 - depth_f * self.opacity_step).clamp(floor, 1.0);

        Placement {
            dx: angle.cos() * radius,
            dy: angle.sin() * radius,
            stack_order,
            opacity,
        }
    }
}

/// Placement with the default spiral geometry.
pub fn position_for(index: usize, depth: u32) -> Placement {
    SpiralConfig::default().position_for(index, depth)
}

/// Flattens `tree` into display order.
///
/// Collapsed or childless nodes contribute exactly one entry.
pub fn flatten(tree: &IdeaTree) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    flatten_into(tree.roots(), 0, &mut entries);
    entries
}

fn flatten_into(nodes: &[IdeaRef], depth: u32, entries: &mut Vec<FlatEntry>) {
    for node in nodes {
        entries.push(FlatEntry {
            idea: Arc::clone(node),
            depth,
        });
        if node.is_expanded && node.has_children() {
            flatten_into(&node.children, depth + 1, entries);
        }
    }
}

/// Whether an entry may start a drag. Only root-level ideas can be dragged.
pub fn is_drag_enabled(entry: &FlatEntry) -> bool {
    entry.depth == 0
}

/// Moves flat entry `source_index` to `dest_index` and returns the
/// resulting root-level order.
///
/// `dest_index` is a position in the sequence after removal and is clamped
/// to its end. An out-of-range `source_index` leaves the order unchanged.
/// Non-root entries never change parent through this operation.
pub fn reorder_roots(flat: &[FlatEntry], source_index: usize, dest_index: usize) -> Vec<IdeaRef> {
    let mut items = flat.to_vec();
    if source_index < items.len() {
        let moved = items.remove(source_index);
        let dest_index = dest_index.min(items.len());
        items.insert(dest_index, moved);
    } else {
        debug!(
            "event=root_reorder module=layout status=noop reason=source_out_of_range source={} len={}",
            source_index,
            flat.len()
        );
    }

    items
        .into_iter()
        .filter(|entry| entry.depth == 0)
        .map(|entry| entry.idea)
        .collect()
}

/// One visible idea with its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedIdea {
    pub entry: FlatEntry,
    pub placement: Placement,
    pub drag_enabled: bool,
}

/// Line joining an entry to its predecessor in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    /// Index of the later entry; the line starts at `to_index - 1`.
    pub to_index: usize,
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Full render pass output for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiralLayout {
    pub items: Vec<PlacedIdea>,
    pub connectors: Vec<Connector>,
}

impl SpiralLayout {
    /// Flattens and places every visible idea of `tree`.
    pub fn compute(tree: &IdeaTree, config: &SpiralConfig) -> Self {
        let items: Vec<PlacedIdea> = flatten(tree)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| PlacedIdea {
                placement: config.position_for(index, entry.depth),
                drag_enabled: is_drag_enabled(&entry),
                entry,
            })
            .collect();

        let connectors = items
            .windows(2)
            .enumerate()
            .map(|(offset, pair)| Connector {
                to_index: offset + 1,
                from: (pair[0].placement.dx, pair[0].placement.dy),
                to: (pair[1].placement.dx, pair[1].placement.dy),
            })
            .collect();

        Self { items, connectors }
    }

    /// Flattened entries without placements, in display order.
    pub fn entries(&self) -> Vec<FlatEntry> {
        self.items.iter().map(|item| item.entry.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{position_for, reorder_roots, FlatEntry, SpiralConfig, SpiralLayout};
    use crate::model::idea::Idea;
    use crate::store::idea_tree::IdeaTree;
    use std::sync::Arc;

    fn entry(id: &str, depth: u32) -> FlatEntry {
        FlatEntry {
            idea: Arc::new(Idea::with_id(id, id)),
            depth,
        }
    }

    fn ids(roots: &[crate::model::idea::IdeaRef]) -> Vec<&str> {
        roots.iter().map(|idea| idea.id.as_str()).collect()
    }

    #[test]
    fn stack_order_strictly_decreases() {
        let orders: Vec<i64> = (0..250)
            .map(|index| position_for(index, (index % 4) as u32).stack_order)
            .collect();
        assert!(orders.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn opacity_is_monotonic_with_floor() {
        let config = SpiralConfig::default();
        let mut previous = f64::INFINITY;
        for depth in 0..20 {
            let opacity = config.position_for(3, depth).opacity;
            assert!(opacity <= previous);
            assert!(opacity >= config.opacity_floor);
            previous = opacity;
        }
        assert_eq!(config.position_for(0, 0).opacity, 1.0);
        assert_eq!(config.position_for(0, 50).opacity, config.opacity_floor);
    }

    #[test]
    fn out_of_range_opacity_floor_is_capped() {
        for floor in [1.2, f64::NAN, f64::INFINITY] {
            let config = SpiralConfig {
                opacity_floor: floor,
                ..SpiralConfig::default()
            };
            assert_eq!(config.position_for(0, 0).opacity, 1.0);
            assert_eq!(config.position_for(4, 9).opacity, 1.0);
        }
    }

    #[test]
    fn placement_is_deterministic() {
        assert_eq!(position_for(7, 2), position_for(7, 2));
    }

    #[test]
    fn reorder_clamps_destination() {
        let flat = vec![entry("a", 0), entry("b", 0), entry("c", 0)];
        assert_eq!(ids(&reorder_roots(&flat, 0, 99)), vec!["b", "c", "a"]);
    }

    #[test]
    fn reorder_ignores_out_of_range_source() {
        let flat = vec![entry("a", 0), entry("a1", 1), entry("b", 0)];
        assert_eq!(ids(&reorder_roots(&flat, 9, 0)), vec!["a", "b"]);
    }

    #[test]
    fn dragging_child_does_not_reparent() {
        let flat = vec![entry("a", 0), entry("a1", 1), entry("b", 0)];
        assert_eq!(ids(&reorder_roots(&flat, 1, 2)), vec!["a", "b"]);
    }

    #[test]
    fn layout_connects_consecutive_entries() {
        let tree = IdeaTree::new([
            Idea::with_id("a", "A")
                .children([Idea::with_id("a1", "A1")])
                .expanded(true),
            Idea::with_id("b", "B"),
        ]);
        let layout = SpiralLayout::compute(&tree, &SpiralConfig::default());
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.connectors.len(), 2);
        assert!(!layout.items[1].drag_enabled);
        assert_eq!(
            layout.connectors[1].from,
            (layout.items[1].placement.dx, layout.items[1].placement.dy)
        );
    }
}
