//! Integration tests for tree construction.

use pinpoint_dom::{DomTree, NodeId, NodeType};
use pinpoint_html::{parse_html, parse_html_with_issues, tree_to_string};

/// First element with `tag`, depth-first.
fn find_element(tree: &DomTree, tag: &str) -> Option<NodeId> {
    tree.elements()
        .find(|&id| tree.as_element(id).is_some_and(|e| e.tag_name == tag))
}

fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.element_children(id)
        .filter_map(|child| tree.as_element(child).map(|e| e.tag_name.clone()))
        .collect()
}

#[test]
fn test_fragment_is_not_wrapped() {
    let tree = parse_html("<ul><li>a</li></ul>");
    let ul = tree.document_element().expect("document element");
    assert_eq!(tree.as_element(ul).map(|e| e.tag_name.as_str()), Some("ul"));
    assert_eq!(tree.parent(ul), Some(NodeId::ROOT));
}

#[test]
fn test_nesting_and_text() {
    let tree = parse_html("<div><p>hello <b>world</b></p></div>");
    let p = find_element(&tree, "p").expect("p");
    let b = find_element(&tree, "b").expect("b");
    assert_eq!(tree.parent(b), Some(p));
    let first = tree.children(p)[0];
    assert_eq!(tree.as_text(first), Some("hello "));
}

#[test]
fn test_void_elements_do_not_nest() {
    let tree = parse_html("<div><br><img src=a><span></span></div>");
    let div = find_element(&tree, "div").expect("div");
    assert_eq!(child_tags(&tree, div), vec!["br", "img", "span"]);
}

#[test]
fn test_implied_list_item_end_tags() {
    let tree = parse_html("<ul><li>one<li>two<li>three</ul>");
    let ul = find_element(&tree, "ul").expect("ul");
    assert_eq!(child_tags(&tree, ul), vec!["li", "li", "li"]);
}

#[test]
fn test_block_start_closes_paragraph() {
    let tree = parse_html("<p>one<div>two</div>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p", "div"]);
}

#[test]
fn test_table_cells_close_each_other() {
    let tree = parse_html("<table><tr><td>a<td>b<tr><td>c</table>");
    let table = find_element(&tree, "table").expect("table");
    assert_eq!(child_tags(&tree, table), vec!["tr", "tr"]);
    let first_row = tree.element_children(table).next().expect("row");
    assert_eq!(child_tags(&tree, first_row), vec!["td", "td"]);
}

#[test]
fn test_self_closing_div_is_closed() {
    let (tree, issues) = parse_html_with_issues("<div/><span></span>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["div", "span"]);
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_stray_end_tag_is_an_issue() {
    let (tree, issues) = parse_html_with_issues("<div></span></div>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["div"]);
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("stray end tag"));
    assert_eq!(issues[0].token_index, 1);
}

#[test]
fn test_unclosed_elements_are_reported() {
    let (_, issues) = parse_html_with_issues("<div><section>");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("div, section"));
}

#[test]
fn test_optional_end_tags_are_not_reported() {
    let (_, issues) = parse_html_with_issues("<ul><li>a<li>b");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("ul"));
    assert!(!issues[0].message.contains("li"));
}

#[test]
fn test_attributes_keep_source_order() {
    let tree = parse_html(r#"<a title="t" href="/x" id="link"></a>"#);
    let a = find_element(&tree, "a").expect("a");
    let names: Vec<&str> = tree
        .as_element(a)
        .map(|e| e.attrs.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["title", "href", "id"]);
}

#[test]
fn test_doctype_and_comment_nodes() {
    let tree = parse_html("<!doctype html><!--c--><p></p>");
    let kinds: Vec<bool> = tree
        .children(NodeId::ROOT)
        .iter()
        .map(|&id| {
            matches!(
                tree.get(id).map(|n| &n.node_type),
                Some(NodeType::Element(_))
            )
        })
        .collect();
    assert_eq!(kinds, vec![false, false, true]);
}

#[test]
fn test_tree_to_string_outline() {
    let tree = parse_html(r#"<ul id="m"><li>a</li></ul>"#);
    let outline = tree_to_string(&tree, NodeId::ROOT);
    assert_eq!(
        outline,
        "#document\n  <ul id=\"m\">\n    <li>\n      \"a\"\n"
    );
}
