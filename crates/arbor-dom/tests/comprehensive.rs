//! Comprehensive tests for arbor-dom
//!
//! Exercises the attribute store, navigation, search and mutation through the
//! public API only.

use arbor_dom::{
    Attribute, AttributeList, Collection, DomError, DomTree, NodeId, NodeKind, Position, by_class,
    by_id, find_all, find_first,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build `<ul id="list">` with `n` `<li class="item">` children, each holding
/// a text node "item {i}".
fn list(n: usize) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let ul = tree.create_element("ul");
    tree.set_attribute(ul, "id", "list").unwrap();
    tree.append_child(tree.root(), ul).unwrap();
    for i in 0..n {
        let li = tree.create_element("li");
        tree.add_class(li, "item").unwrap();
        let text = tree.create_text(&format!("item {i}"));
        tree.append_child(li, text).unwrap();
        tree.append_child(ul, li).unwrap();
    }
    (tree, ul)
}

// ============================================================================
// ATTRIBUTE STORE
// ============================================================================

#[test]
fn test_set_is_idempotent() {
    let mut attrs = AttributeList::new();
    attrs.set("href", "/a");
    attrs.set("href", "/a");
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("href"), Some("/a"));
}

#[test]
fn test_remove_then_has_is_false() {
    let mut attrs = AttributeList::new();
    assert!(attrs.remove("missing").is_none());
    assert!(!attrs.has("missing"));

    attrs.set("title", "x");
    let removed = attrs.remove("title").unwrap();
    assert_eq!(removed, Attribute::new("title", "x"));
    assert!(!attrs.has("title"));
}

#[test]
fn test_bare_set_keeps_namespace() {
    let mut attrs = AttributeList::new();
    attrs.set_ns(Some("xlink"), "href", "#a");
    attrs.set("href", "#b");

    assert_eq!(attrs.len(), 1);
    let entry = attrs.get_attr("href").unwrap();
    assert_eq!(entry.namespace.as_deref(), Some("xlink"));
    assert_eq!(entry.value, "#b");
}

#[test]
fn test_namespaced_entries_coexist() {
    let mut attrs = AttributeList::new();
    attrs.set_ns(Some("xlink"), "href", "#ns");
    attrs.set_ns(None, "href", "/plain");

    assert_eq!(attrs.len(), 2);
    assert_eq!(attrs.get("href"), Some("#ns"));
    assert_eq!(attrs.get_ns(None, "href"), Some("/plain"));
    assert_eq!(attrs.index_of_ns(None, "href"), Some(1));

    attrs.remove("href");
    assert_eq!(attrs.get("href"), Some("/plain"));
}

#[test]
fn test_class_helpers_on_tree() {
    let (mut tree, ul) = list(1);
    let li = tree.first_element_child(ul).unwrap();

    tree.add_class(li, "active").unwrap();
    tree.add_class(li, "active").unwrap();
    assert_eq!(tree.get_attribute(li, "class"), Some("item active"));

    assert!(!tree.toggle_class(li, "item").unwrap());
    assert_eq!(tree.get_attribute(li, "class"), Some("active"));
    assert!(tree.toggle_class(li, "item").unwrap());
    assert!(tree.has_class(li, "item"));

    tree.remove_class(li, "active").unwrap();
    assert!(!tree.has_class(li, "active"));
}

// ============================================================================
// NAVIGATION AND SEARCH
// ============================================================================

#[test]
fn test_children_and_counts() {
    let (tree, ul) = list(4);
    let children = tree.children(ul);
    assert_eq!(children.len(), 4);
    assert_eq!(tree.child_element_count(ul), 4);
    assert_eq!(children.first(), tree.first_element_child(ul));
    assert_eq!(children.last(), tree.last_element_child(ul));
    for li in &children {
        assert_eq!(tree.parent_element(li), Some(ul));
        assert_eq!(tree.kind(li), Some(NodeKind::Element));
    }
}

#[test]
fn test_find_helpers() {
    let (tree, ul) = list(3);
    let root = tree.root();
    assert_eq!(by_id(&tree, root, "list"), Some(ul));
    assert_eq!(by_class(&tree, root, "item").len(), 3);

    let texts = find_all(&tree, root, |_, n| n.is_text());
    assert_eq!(texts.len(), 3);
    let first_text = find_first(&tree, root, |_, n| n.is_text()).unwrap();
    assert_eq!(tree.text(first_text), "item 0");
}

#[test]
fn test_collection_iteration_styles() {
    let (tree, ul) = list(3);
    let children: Collection = tree.children(ul);

    let pulled: Vec<NodeId> = children.iter().collect();
    let mut pushed = Vec::new();
    children.for_each(|id, index, all| {
        assert_eq!(all.get(index).unwrap(), id);
        pushed.push(id);
    });
    assert_eq!(pulled, pushed);

    let consumed: Vec<NodeId> = children.clone().into_iter().collect();
    assert_eq!(consumed, pulled);
    assert!(matches!(
        children.get(3),
        Err(DomError::IndexOutOfBounds { index: 3, len: 3 })
    ));
}

// ============================================================================
// MUTATION
// ============================================================================

#[test]
fn test_before_and_after_keep_links() {
    let (mut tree, ul) = list(2);
    let first = tree.first_element_child(ul).unwrap();
    let last = tree.last_element_child(ul).unwrap();

    let head = tree.create_element("li");
    let tail = tree.create_element("li");
    tree.before(first, head).unwrap();
    tree.after(last, tail).unwrap();

    let order = tree.children(ul).into_vec();
    assert_eq!(order, vec![head, first, last, tail]);
    assert_eq!(tree.previous_element_sibling(first), Some(head));
    assert_eq!(tree.next_element_sibling(last), Some(tail));
    assert_eq!(tree.next_element_sibling(tail), None);
}

#[test]
fn test_insert_each_position_into_list() {
    for position in [
        Position::BeforeBegin,
        Position::AfterBegin,
        Position::BeforeEnd,
        Position::AfterEnd,
    ] {
        let (mut tree, ul) = list(3);
        let middle = tree.children(ul).get(1).unwrap();
        let node = tree.create_element("div");
        tree.insert(position, middle, node).unwrap();

        let expected_parent = if position.is_outside() { ul } else { middle };
        assert_eq!(tree.parent(node), Some(expected_parent), "{position}");
    }
}

#[test]
fn test_empty_removes_everything() {
    let (mut tree, ul) = list(50);
    tree.empty(ul).unwrap();
    assert!(!tree.has_child_nodes(ul));
    assert!(tree.children(ul).is_empty());
    assert_eq!(tree.first_element_child(ul), None);
}

#[test]
fn test_replace_text_nodes() {
    let (mut tree, ul) = list(1);
    let li = tree.first_element_child(ul).unwrap();
    let old = tree.child_nodes(li)[0];
    let new = tree.create_text("replaced");

    let snapshot = tree.replace(li, new, old).unwrap();
    assert_eq!(tree.text(li), "replaced");
    assert_eq!(tree.text(snapshot), "item 0");
}

#[test]
fn test_clone_deep_is_independent() {
    let (mut tree, ul) = list(2);
    let copy = tree.clone_deep(ul).unwrap();
    tree.set_attribute(copy, "id", "copy").unwrap();
    let first_copy = tree.first_element_child(copy).unwrap();
    tree.set_text(first_copy, "changed").unwrap();

    assert_eq!(tree.get_attribute(ul, "id"), Some("list"));
    assert_eq!(tree.text(ul), "item 0item 1");
    assert_eq!(tree.text(copy), "changeditem 1");
}

#[test]
fn test_wrap_all_moves_copies() {
    let (mut tree, ul) = list(3);
    let items = tree.children(ul).into_vec();
    let wrapper = tree.create_element("li");
    let inner = tree.create_element("ol");
    tree.append_child(wrapper, inner).unwrap();

    tree.wrap_all(&items[1..], wrapper).unwrap();
    assert_eq!(tree.children(ul).into_vec(), vec![items[0], wrapper]);
    assert_eq!(tree.child_element_count(inner), 2);
    assert_eq!(tree.text(inner), "item 1item 2");
}

#[test]
fn test_mutations_under_subscriber() {
    init_tracing();
    let (mut tree, ul) = list(3);
    let first = tree.first_element_child(ul).unwrap();
    let last = tree.last_element_child(ul).unwrap();
    tree.after(last, first).unwrap();
    tree.empty(ul).unwrap();
    assert!(!tree.has_child_nodes(ul));
}
