//! Picking one locally unique fragment per element.

use tracing::{debug, trace, warn};

use crate::candidates::Candidates;
use crate::combinations::{Combinations, MAX_COMBINATION_SIZE};
use crate::host::SelectorHost;
use crate::options::{Options, SelectorType};

/// Fragment used when no family yields anything unique.
pub const WILDCARD: &str = "*";

/// Whether `selector`, run from the parent of `node`, finds `node` and
/// nothing else. A node without a parent is never locally unique.
#[must_use]
pub fn is_locally_unique<H: SelectorHost>(host: &H, node: H::Node, selector: &str) -> bool {
    let Some(parent) = host.parent(node) else {
        return false;
    };
    match host.query_all(parent, selector) {
        Ok(found) => {
            let unique = found == [node];
            trace!(selector, matches = found.len(), unique, "local test");
            unique
        }
        Err(err) => {
            warn!(selector, %err, "host could not evaluate selector");
            false
        }
    }
}

/// The first locally unique combination of `tokens`, trying the bare
/// combinations before the `tag`-prefixed ones.
fn unique_combination<H: SelectorHost>(
    host: &H,
    node: H::Node,
    tokens: &[String],
    tag: Option<&str>,
) -> Option<String> {
    let combinations = Combinations::new(tokens, MAX_COMBINATION_SIZE);
    if let Some(found) = combinations
        .clone()
        .find(|combination| is_locally_unique(host, node, combination))
    {
        return Some(found);
    }
    let tag = tag?;
    combinations
        .map(|combination| format!("{tag}{combination}"))
        .find(|combination| is_locally_unique(host, node, combination))
}

/// Choose the fragment for `node` by trying each family of `order` in turn.
///
/// The tag is available as a prefix for class and attribute combinations
/// only when [`SelectorType::Tag`] is part of `order`. Falls back to
/// [`WILDCARD`].
#[must_use]
pub fn choose_fragment<H: SelectorHost>(
    host: &H,
    node: H::Node,
    options: &Options,
    order: &[SelectorType],
) -> String {
    let Some(mut candidates) = Candidates::extract(host, node, &options.attributes_to_ignore)
    else {
        return WILDCARD.to_string();
    };
    if let Some(pattern) = &options.exclude {
        candidates.exclude(pattern);
    }
    let tag = order
        .contains(&SelectorType::Tag)
        .then_some(candidates.tag.as_str());

    for &family in order {
        let fragment = match family {
            SelectorType::Id => candidates
                .id_selector()
                .filter(|id| is_locally_unique(host, node, id)),
            SelectorType::Tag => {
                is_locally_unique(host, node, &candidates.tag).then(|| candidates.tag.clone())
            }
            SelectorType::Class if !candidates.classes.is_empty() => {
                unique_combination(host, node, &candidates.class_selectors(), tag)
            }
            SelectorType::Attributes if !candidates.attributes.is_empty() => {
                unique_combination(host, node, &candidates.attributes, tag)
            }
            SelectorType::NthChild => candidates.nth_child.clone(),
            SelectorType::Class | SelectorType::Attributes => None,
        };
        if let Some(fragment) = fragment {
            debug!(?node, %family, %fragment, "chose fragment");
            return fragment;
        }
    }

    debug!(?node, "no unique fragment, using wildcard");
    WILDCARD.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpoint_dom::{DomTree, ElementData, NodeId};

    /// `<ul><li class=a b c>` with siblings sharing `a`, `b` and `c` but
    /// never both `a` and `b`.
    fn list() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let ul = tree.append_element(NodeId::ROOT, ElementData::new("ul", []));
        let _ = tree.append_element(ul, ElementData::new("li", [("class", "a c")]));
        let _ = tree.append_element(ul, ElementData::new("li", [("class", "b c")]));
        let target = tree.append_element(ul, ElementData::new("li", [("class", "a b c")]));
        (tree, target)
    }

    #[test]
    fn test_smallest_unique_combination_wins() {
        let (tree, target) = list();
        let options = Options::default();
        let fragment = choose_fragment(&tree, target, &options, &options.selector_order());
        assert_eq!(fragment, ".a.b");
    }

    #[test]
    fn test_tag_prefixed_pass() {
        let mut tree = DomTree::new();
        let div = tree.append_element(NodeId::ROOT, ElementData::new("div", []));
        let _ = tree.append_element(div, ElementData::new("p", [("class", "x")]));
        let target = tree.append_element(div, ElementData::new("span", [("class", "x")]));
        let options =
            Options::default().with_selector_types([SelectorType::Class, SelectorType::Tag]);
        let fragment = choose_fragment(&tree, target, &options, &options.selector_order());
        assert_eq!(fragment, "span.x");
    }

    #[test]
    fn test_no_tag_prefix_without_tag_family() {
        let mut tree = DomTree::new();
        let div = tree.append_element(NodeId::ROOT, ElementData::new("div", []));
        let _ = tree.append_element(div, ElementData::new("p", [("class", "x")]));
        let target = tree.append_element(div, ElementData::new("span", [("class", "x")]));
        let options = Options::default().with_selector_types([SelectorType::Class]);
        let fragment = choose_fragment(&tree, target, &options, &options.selector_order());
        assert_eq!(fragment, WILDCARD);
    }

    #[test]
    fn test_wildcard_without_parent() {
        let mut tree = DomTree::new();
        let orphan = tree.alloc(pinpoint_dom::NodeType::Element(ElementData::new(
            "div",
            [("id", "solo")],
        )));
        let options = Options::default();
        assert!(!is_locally_unique(&tree, orphan, "#solo"));
        let fragment = choose_fragment(&tree, orphan, &options, &options.selector_order());
        assert_eq!(fragment, WILDCARD);
    }

    #[test]
    fn test_invalid_selector_is_not_unique() {
        let (tree, target) = list();
        assert!(!is_locally_unique(&tree, target, "li >"));
    }
}
