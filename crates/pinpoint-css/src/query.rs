//! `querySelectorAll` over a [`DomTree`].
//!
//! [DOM § 4.2.6 Mixin ParentNode](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall)
//!
//! "The querySelectorAll(selectors) method steps are to return the static
//! result of running scope-match a selectors string selectors against this."
//!
//! Only descendants of the scope are candidates, but combinators are matched
//! against the whole tree, so `ul.querySelectorAll("div > li")` can still use
//! an ancestor of `ul` for the `div` part.

use pinpoint_dom::{DomTree, NodeId};

use crate::error::SelectorError;
use crate::selector::{SelectorList, parse_selector};

/// Every element under `scope` (exclusive) matching `selector`, in tree order.
///
/// # Errors
///
/// Returns a [`SelectorError`] if `selector` does not parse.
pub fn query_selector_all(
    tree: &DomTree,
    scope: NodeId,
    selector: &str,
) -> Result<Vec<NodeId>, SelectorError> {
    let list = parse_selector(selector)?;
    Ok(select_all(tree, scope, &list))
}

/// The first element under `scope` matching `selector`, if any.
///
/// # Errors
///
/// Returns a [`SelectorError`] if `selector` does not parse.
pub fn query_selector(
    tree: &DomTree,
    scope: NodeId,
    selector: &str,
) -> Result<Option<NodeId>, SelectorError> {
    let list = parse_selector(selector)?;
    Ok(tree
        .descendants(scope)
        .find(|&id| list.matches_in_tree(tree, id)))
}

/// Run an already parsed selector list under `scope`.
#[must_use]
pub fn select_all(tree: &DomTree, scope: NodeId, list: &SelectorList) -> Vec<NodeId> {
    tree.descendants(scope)
        .filter(|&id| list.matches_in_tree(tree, id))
        .collect()
}
