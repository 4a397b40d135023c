use ourofold_core::{flatten, Idea, IdeaId, IdeaTree, IdeaValidationError};

#[test]
fn idea_new_sets_defaults() {
    let idea = Idea::new("hello");

    assert!(idea.id.as_str().starts_with("idea-"));
    assert_eq!(idea.title, "hello");
    assert!(idea.content.is_empty());
    assert!(idea.tags.is_empty());
    assert_eq!(idea.depth, 0);
    assert!(idea.children.is_empty());
    assert!(!idea.is_expanded);
}

#[test]
fn serialization_uses_camel_case_fields() {
    let idea = Idea::with_id("1", "Root")
        .tags(["a"])
        .children([Idea::with_id("1-1", "Child")])
        .expanded(true);

    let json = serde_json::to_value(&idea).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["isExpanded"], true);
    assert_eq!(json["children"][0]["depth"], 1);
    assert_eq!(json["children"][0]["isExpanded"], false);

    let decoded: Idea = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, idea);
}

#[test]
fn deserialize_fills_optional_fields() {
    let value = serde_json::json!([
        { "id": "x", "title": "X", "children": [ { "id": "y", "title": "Y", "depth": 1 } ] }
    ]);
    let tree: IdeaTree = serde_json::from_value(value).unwrap();
    let x = tree.find(&IdeaId::new("x")).unwrap();
    assert!(!x.is_expanded);
    assert!(x.tags.is_empty());
    assert!(tree.validate().is_ok());
}

#[test]
fn validate_flags_inconsistent_idea_depth() {
    let value = serde_json::json!(
        { "id": "x", "title": "X", "children": [ { "id": "y", "title": "Y", "depth": 4 } ] }
    );
    let idea: Idea = serde_json::from_value(value).unwrap();
    assert_eq!(
        idea.validate().unwrap_err(),
        IdeaValidationError::DepthMismatch {
            id: IdeaId::new("y"),
            expected: 1,
            actual: 4,
        }
    );
}

#[test]
fn deserialized_tree_recomputes_depths_from_nesting() {
    let value = serde_json::json!([
        { "id": "x", "title": "X", "depth": 3, "children": [ { "id": "y", "title": "Y", "depth": 4 } ] }
    ]);
    let tree: IdeaTree = serde_json::from_value(value).unwrap();
    assert_eq!(tree.find(&IdeaId::new("x")).unwrap().depth, 0);
    assert_eq!(tree.find(&IdeaId::new("y")).unwrap().depth, 1);
    assert!(tree.validate().is_ok());
}

#[test]
fn add_child_after_loading_tree_without_depths_keeps_depths_consistent() {
    let value = serde_json::json!([
        { "id": "x", "title": "X", "children": [ { "id": "y", "title": "Y" } ] }
    ]);
    let tree: IdeaTree = serde_json::from_value(value).unwrap();
    assert!(tree.validate().is_ok());

    let updated = tree
        .add_child(&IdeaId::new("y"), Idea::with_id("z", "Z"))
        .toggle_expand(&IdeaId::new("x"));
    assert!(updated.validate().is_ok());

    let traversal_depth = flatten(&updated)
        .iter()
        .find(|entry| entry.idea.id.as_str() == "z")
        .map(|entry| entry.depth);
    assert_eq!(traversal_depth, Some(2));
    assert_eq!(updated.find(&IdeaId::new("z")).unwrap().depth, 2);
}
