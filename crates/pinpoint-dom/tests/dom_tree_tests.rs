//! Tests for DOM tree construction and traversal.

use pinpoint_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and append it to `parent`.
fn append(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, ElementData::new(tag, []))
}

// ========== append_child ==========

#[test]
fn test_append_child_links_siblings() {
    let mut tree = DomTree::new();
    let parent = append(&mut tree, NodeId::ROOT, "div");
    let a = append(&mut tree, parent, "a");
    let b = append(&mut tree, parent, "b");
    let c = append(&mut tree, parent, "c");

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.parent(b), Some(parent));
    assert_eq!(tree.prev_sibling(a), None);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(c), Some(b));
    assert_eq!(tree.next_sibling(c), None);
}

#[test]
fn test_alloc_leaves_node_detached() {
    let mut tree = DomTree::new();
    let orphan = tree.alloc(NodeType::Element(ElementData::new("p", [])));

    assert_eq!(tree.parent(orphan), None);
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.element_index(orphan), None);
}

// ========== element_index ==========

#[test]
fn test_element_index_skips_text_and_comments() {
    let mut tree = DomTree::new();
    let ul = append(&mut tree, NodeId::ROOT, "ul");
    let text = tree.alloc(NodeType::Text("\n  ".to_string()));
    tree.append_child(ul, text);
    let first = append(&mut tree, ul, "li");
    let comment = tree.alloc(NodeType::Comment("gap".to_string()));
    tree.append_child(ul, comment);
    let second = append(&mut tree, ul, "li");

    assert_eq!(tree.element_index(first), Some(1));
    assert_eq!(tree.element_index(second), Some(2));
    assert_eq!(tree.element_index(text), None);
}

#[test]
fn test_document_element_index_is_one() {
    let mut tree = DomTree::new();
    let doctype = tree.alloc(NodeType::Doctype("html".to_string()));
    tree.append_child(NodeId::ROOT, doctype);
    let html = append(&mut tree, NodeId::ROOT, "html");

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.element_index(html), Some(1));
}

// ========== traversal ==========

#[test]
fn test_descendants_are_in_tree_order() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, "div");
    let ul = append(&mut tree, div, "ul");
    let li1 = append(&mut tree, ul, "li");
    let li2 = append(&mut tree, ul, "li");
    let p = append(&mut tree, div, "p");

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![div, ul, li1, li2, p]);

    let inner: Vec<NodeId> = tree.descendants(ul).collect();
    assert_eq!(inner, vec![li1, li2]);
}

#[test]
fn test_ancestors_walk_to_document() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, "div");
    let span = append(&mut tree, div, "span");

    let chain: Vec<NodeId> = tree.ancestors(span).collect();
    assert_eq!(chain, vec![div, NodeId::ROOT]);
    assert!(tree.is_descendant_of(span, NodeId::ROOT));
    assert!(!tree.is_descendant_of(div, span));
}

#[test]
fn test_node_path() {
    let mut tree = DomTree::new();
    let div = append(&mut tree, NodeId::ROOT, "div");
    let _ = append(&mut tree, div, "span");
    let second = append(&mut tree, div, "span");

    assert_eq!(tree.node_path(second), "/div[1]/span[2]");
}

// ========== ElementData ==========

#[test]
fn test_classes_keep_order_and_drop_duplicates() {
    let element = ElementData::new("div", [("class", "  b a\tb  c ")]);
    assert_eq!(element.classes(), vec!["b", "a", "c"]);
    assert!(element.has_class("c"));
    assert!(!element.has_class("d"));
}

#[test]
fn test_attributes_keep_source_order() {
    let element = ElementData::new("INPUT", [("type", "text"), ("name", "q"), ("id", "search")]);
    let names: Vec<&str> = element.attrs.keys().map(String::as_str).collect();
    assert_eq!(element.tag_name, "input");
    assert_eq!(names, vec!["type", "name", "id"]);
    assert_eq!(element.id(), Some("search"));
}
