//! Integration tests for querying a parsed document.

use pinpoint_css::{query_selector, query_selector_all};
use pinpoint_dom::{DomTree, NodeId};
use pinpoint_html::parse_html;

const PAGE: &str = r#"<div id="app">
  <ul class="menu">
    <li class="item">one</li>
    <li class="item active">two</li>
    <li class="item" data-role="last">three</li>
  </ul>
  <section><p>intro</p><p>more <span>deep</span></p></section>
</div>"#;

fn tags(tree: &DomTree, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| tree.as_element(id).map(|e| e.tag_name.clone()))
        .collect()
}

fn find(tree: &DomTree, selector: &str) -> NodeId {
    query_selector(tree, NodeId::ROOT, selector)
        .expect("selector parses")
        .expect("element exists")
}

#[test]
fn test_query_all_in_document_order() {
    let tree = parse_html(PAGE);
    let found = query_selector_all(&tree, NodeId::ROOT, "li, ul").expect("parse");
    assert_eq!(tags(&tree, &found), vec!["ul", "li", "li", "li"]);
}

#[test]
fn test_class_and_attribute_matching() {
    let tree = parse_html(PAGE);
    let active = query_selector_all(&tree, NodeId::ROOT, ".item.active").expect("parse");
    assert_eq!(active.len(), 1);
    let last = query_selector_all(&tree, NodeId::ROOT, r#"[data-role="last"]"#).expect("parse");
    assert_eq!(last.len(), 1);
    assert_ne!(active, last);
}

#[test]
fn test_nth_child_ignores_text_nodes() {
    let tree = parse_html(PAGE);
    let second = find(&tree, "li:nth-child(2)");
    assert_eq!(second, find(&tree, ".active"));
    let odd = query_selector_all(&tree, NodeId::ROOT, "li:nth-child(odd)").expect("parse");
    assert_eq!(odd.len(), 2);
}

#[test]
fn test_nth_child_extreme_offsets() {
    let tree = parse_html(PAGE);
    let every = query_selector_all(&tree, NodeId::ROOT, "li:nth-child(n-2147483648)")
        .expect("parse");
    assert_eq!(every.len(), 3);
    let up_to_max = query_selector_all(&tree, NodeId::ROOT, "li:nth-child(-n+2147483647)")
        .expect("parse");
    assert_eq!(up_to_max.len(), 3);
    let none = query_selector_all(&tree, NodeId::ROOT, "li:nth-child(-2147483648n+2147483647)")
        .expect("parse");
    assert!(none.is_empty());
}

#[test]
fn test_scope_excludes_itself() {
    let tree = parse_html(PAGE);
    let ul = find(&tree, "ul");
    assert!(query_selector_all(&tree, ul, "ul").expect("parse").is_empty());
    assert_eq!(query_selector_all(&tree, ul, "li").expect("parse").len(), 3);
}

#[test]
fn test_combinators_reach_outside_scope() {
    let tree = parse_html(PAGE);
    let ul = find(&tree, "ul");
    let found = query_selector_all(&tree, ul, "#app li.active").expect("parse");
    assert_eq!(found.len(), 1);
}

#[test]
fn test_descendant_combinator_backtracks() {
    let tree = parse_html(PAGE);
    // The nearest `p` ancestor of the span is not a child of `div`, but
    // `section` is, so `div > section span` still matches.
    let found = query_selector_all(&tree, NodeId::ROOT, "div > section span").expect("parse");
    assert_eq!(tags(&tree, &found), vec!["span"]);
    let none = query_selector_all(&tree, NodeId::ROOT, "div > p span").expect("parse");
    assert!(none.is_empty());
}

#[test]
fn test_sibling_combinators() {
    let tree = parse_html(PAGE);
    let next = query_selector_all(&tree, NodeId::ROOT, ".active + li").expect("parse");
    assert_eq!(next, vec![find(&tree, "[data-role]")]);
    let later = query_selector_all(&tree, NodeId::ROOT, "li:first-child ~ li").expect("parse");
    assert_eq!(later.len(), 2);
}

#[test]
fn test_child_chain_from_root() {
    let tree = parse_html(PAGE);
    let found = query_selector_all(&tree, NodeId::ROOT, "div > ul > li:nth-child(3)").expect("parse");
    assert_eq!(found, vec![find(&tree, "[data-role]")]);
}

#[test]
fn test_root_and_structural_pseudo_classes() {
    let tree = parse_html(PAGE);
    assert_eq!(find(&tree, ":root"), find(&tree, "#app"));
    let last = query_selector_all(&tree, NodeId::ROOT, "p:last-of-type").expect("parse");
    assert_eq!(last.len(), 1);
    let only = query_selector_all(&tree, NodeId::ROOT, "span:only-child").expect("parse");
    assert_eq!(only.len(), 1);
}

#[test]
fn test_invalid_selector_is_an_error() {
    let tree = parse_html(PAGE);
    assert!(query_selector_all(&tree, NodeId::ROOT, "li >").is_err());
    assert!(query_selector(&tree, NodeId::ROOT, "").is_err());
}

#[test]
fn test_query_selector_none_when_absent() {
    let tree = parse_html(PAGE);
    assert_eq!(query_selector(&tree, NodeId::ROOT, "table"), Ok(None));
}
