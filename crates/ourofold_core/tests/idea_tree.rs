use ourofold_core::{flatten, Idea, IdeaId, IdeaTree};
use std::sync::Arc;

fn scenario_tree() -> IdeaTree {
    IdeaTree::new([
        Idea::with_id("A", "A").children([Idea::with_id("A1", "A1")]),
        Idea::with_id("B", "B"),
    ])
}

fn deep_tree() -> IdeaTree {
    IdeaTree::new([
        Idea::with_id("r1", "Root one")
            .children([
                Idea::with_id("r1-a", "Nested a").children([
                    Idea::with_id("r1-a-x", "Deep x"),
                    Idea::with_id("r1-a-y", "Deep y"),
                ]),
                Idea::with_id("r1-b", "Nested b"),
            ])
            .expanded(true),
        Idea::with_id("r2", "Root two").children([Idea::with_id("r2-a", "Nested r2")]),
        Idea::with_id("r3", "Root three"),
    ])
}

fn all_ids() -> Vec<IdeaId> {
    ["r1", "r1-a", "r1-a-x", "r1-a-y", "r1-b", "r2", "r2-a", "r3"]
        .into_iter()
        .map(IdeaId::new)
        .collect()
}

fn retitle(idea: &Idea) -> Idea {
    let mut idea = idea.clone();
    idea.title = format!("{} (edited)", idea.title);
    idea.tags.push("edited".to_string());
    idea
}

#[test]
fn missing_ids_leave_tree_deep_equal() {
    let tree = deep_tree();
    let missing = IdeaId::new("does-not-exist");

    assert_eq!(tree.update_by_id(&missing, retitle), tree);
    assert_eq!(tree.add_child(&missing, Idea::with_id("n", "N")), tree);
    assert_eq!(tree.toggle_expand(&missing), tree);
}

#[test]
fn find_after_update_equals_transformed_node() {
    let tree = deep_tree();
    for id in all_ids() {
        let before = tree.find(&id).unwrap();
        let updated = tree.update_by_id(&id, retitle);
        let after = updated.find(&id).unwrap();
        assert_eq!(**after, retitle(before), "id {id}");
    }
}

#[test]
fn add_child_appends_expands_and_sets_depth() {
    let tree = deep_tree();
    for parent_id in all_ids() {
        let parent_depth = tree.find(&parent_id).unwrap().depth;
        let child = Idea::with_id(format!("{parent_id}-new"), "New");
        let updated = tree.add_child(&parent_id, child.clone());

        let parent = updated.find(&parent_id).unwrap();
        assert!(parent.is_expanded);
        let last = parent.children.last().unwrap();
        assert_eq!(last.id, child.id);
        assert_eq!(last.depth, parent_depth + 1);
        assert!(updated.validate().is_ok());
    }
}

#[test]
fn toggle_twice_restores_original() {
    let tree = deep_tree();
    for id in all_ids() {
        let twice = tree.toggle_expand(&id).toggle_expand(&id);
        assert_eq!(twice, tree, "id {id}");
    }
}

#[test]
fn unrelated_roots_stay_shared_after_add_child() {
    let tree = deep_tree();
    let updated = tree.add_child(&IdeaId::new("r2-a"), Idea::with_id("x", "X"));
    assert!(Arc::ptr_eq(&tree.roots()[0], &updated.roots()[0]));
    assert!(!Arc::ptr_eq(&tree.roots()[1], &updated.roots()[1]));
    assert!(Arc::ptr_eq(&tree.roots()[2], &updated.roots()[2]));
}

#[test]
fn scenario_add_child_to_collapsed_root() {
    let tree = scenario_tree();
    let updated = tree.add_child(&IdeaId::new("A"), Idea::with_id("A2", "A2"));

    let a = updated.find(&IdeaId::new("A")).unwrap();
    let child_ids: Vec<&str> = a.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(child_ids, vec!["A1", "A2"]);
    assert_eq!(a.children[1].depth, 1);
    assert!(a.is_expanded);

    let flat = flatten(&updated);
    let depths: Vec<u32> = flat.iter().map(|entry| entry.depth).collect();
    assert_eq!(depths, vec![0, 1, 1, 0]);
}

#[test]
fn push_root_and_replace_order() {
    let tree = scenario_tree().push_root(Idea::with_id("C", "C"));
    assert_eq!(tree.roots().len(), 3);

    let reversed: Vec<_> = tree.roots().iter().rev().cloned().collect();
    let reordered = tree.replace_root_order(reversed);
    let ids: Vec<&str> = reordered.roots().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["C", "B", "A"]);
    assert_eq!(reordered.len(), tree.len());
}
