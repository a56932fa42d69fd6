//! Growing a selector from the target element towards the document.

use pinpoint_dom::{DomTree, NodeId};
use tracing::{debug, warn};

use crate::chooser::choose_fragment;
use crate::host::SelectorHost;
use crate::options::Options;

/// Separator between the fragments of two levels.
pub const CHILD_COMBINATOR: &str = " > ";

/// The target followed by each element ancestor, stopping at the first
/// non-element (normally the document).
#[must_use]
pub fn element_chain<H: SelectorHost>(host: &H, element: H::Node) -> Vec<H::Node> {
    let mut chain = vec![element];
    let mut current = element;
    while let Some(parent) = host.parent(current) {
        if !host.is_element(parent) {
            break;
        }
        chain.push(parent);
        current = parent;
    }
    chain
}

/// Whether `selector`, run from the document, finds `element` and nothing else.
#[must_use]
pub fn is_globally_unique<H: SelectorHost>(host: &H, element: H::Node, selector: &str) -> bool {
    match host.query_all(host.document(), selector) {
        Ok(found) => {
            let unique = found == [element];
            debug!(selector, matches = found.len(), unique, "global test");
            unique
        }
        Err(err) => {
            warn!(selector, %err, "host could not evaluate selector");
            false
        }
    }
}

/// A CSS selector that matches `element` and nothing else in the document.
///
/// One fragment is chosen per level from the element up to the document
/// element. They are then joined with ` > ` starting from the element alone,
/// prepending one ancestor at a time, and the first join that is unique in
/// the whole document is returned. `None` means even the full chain was
/// ambiguous, or `element` is not attached to the document.
///
/// ```
/// use pinpoint_core::{Options, unique};
/// use pinpoint_css::query_selector_all;
/// use pinpoint_dom::NodeId;
/// use pinpoint_html::parse_html;
///
/// let tree = parse_html(r#"<div id="app"><ul><li class="x">A</li><li class="x">B</li></ul></div>"#);
/// let second = query_selector_all(&tree, NodeId::ROOT, "li").unwrap()[1];
///
/// let selector = unique(&tree, second, &Options::default()).unwrap();
/// assert_eq!(selector, "li:nth-child(2)");
/// ```
#[must_use]
pub fn unique<H: SelectorHost>(host: &H, element: H::Node, options: &Options) -> Option<String> {
    if !host.is_element(element) {
        return None;
    }
    let order = options.selector_order();
    let fragments: Vec<String> = element_chain(host, element)
        .into_iter()
        .map(|node| choose_fragment(host, node, options, &order))
        .collect();

    let mut selector = String::new();
    for fragment in &fragments {
        if !selector.is_empty() {
            selector.insert_str(0, CHILD_COMBINATOR);
        }
        selector.insert_str(0, fragment);
        if is_globally_unique(host, element, &selector) {
            return Some(selector);
        }
    }

    debug!(?element, levels = fragments.len(), "no unique selector");
    None
}

/// [`unique`] for a [`DomTree`].
#[must_use]
pub fn unique_selector(tree: &DomTree, element: NodeId, options: &Options) -> Option<String> {
    unique(tree, element, options)
}
