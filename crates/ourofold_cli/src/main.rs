//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `ourofold_core` linkage.
//! - Print the demo notebook's spiral so layout changes are easy to eyeball.

use ourofold_core::{sample_ideas, NotebookService};

fn main() {
    println!("ourofold_core ping={}", ourofold_core::ping());
    println!("ourofold_core version={}", ourofold_core::core_version());

    let notebook = NotebookService::new(sample_ideas());
    for (index, item) in notebook.layout().items.iter().enumerate() {
        let placement = item.placement;
        println!(
            "{index:>2} {indent}{title} dx={dx:.1} dy={dy:.1} z={z} opacity={opacity:.2}",
            indent = "  ".repeat(item.entry.depth as usize),
            title = item.entry.idea.title,
            dx = placement.dx,
            dy = placement.dy,
            z = placement.stack_order,
            opacity = placement.opacity,
        );
    }
}
