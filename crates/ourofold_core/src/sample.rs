//! Demo seed notebook.

use crate::model::idea::Idea;
use crate::store::idea_tree::IdeaTree;

/// Returns the demo notebook: three roots, the first one expanded, with a
/// three-level chain under it.
pub fn sample_ideas() -> IdeaTree {
    IdeaTree::new([
        Idea::with_id("1", "The Nature of Recursive Thinking")
            .content(
                "How do ideas spawn other ideas? This fundamental question leads us down \
                 a spiral of meta-cognition...",
            )
            .tags(["philosophy", "cognition", "meta"])
            .children([
                Idea::with_id("1-1", "Self-Reference in Ideas")
                    .content(
                        "When an idea references itself, it creates an infinite loop of \
                         possibility.",
                    )
                    .tags(["self-reference", "infinity"])
                    .children([Idea::with_id("1-1-1", "Gödel's Incompleteness")
                        .content(
                            "Mathematical systems that reference themselves reveal fundamental \
                             limitations.",
                        )
                        .tags(["mathematics", "logic"])]),
                Idea::with_id("1-2", "Emergent Complexity")
                    .content(
                        "Simple rules can generate infinitely complex patterns when applied \
                         recursively.",
                    )
                    .tags(["emergence", "complexity"]),
            ])
            .expanded(true),
        Idea::with_id("2", "Digital Origami Patterns")
            .content("Exploring how folding algorithms can inspire user interface design...")
            .tags(["design", "origami", "ui/ux"]),
        Idea::with_id("3", "Consciousness as Recursive Process")
            .content("What if awareness is simply the brain observing itself observing itself?")
            .tags(["consciousness", "neuroscience", "philosophy"]),
    ])
}

#[cfg(test)]
mod tests {
    use super::sample_ideas;
    use crate::layout::spiral::flatten;

    #[test]
    fn sample_is_valid_and_partially_expanded() {
        let tree = sample_ideas();
        assert!(tree.validate().is_ok());
        assert_eq!(tree.len(), 6);

        let flat = flatten(&tree);
        let visible: Vec<&str> = flat.iter().map(|entry| entry.idea.id.as_str()).collect();
        assert_eq!(visible, vec!["1", "1-1", "1-2", "2", "3"]);
    }
}
