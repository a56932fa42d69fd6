//! The document interface the search runs against.

use std::fmt;

use pinpoint_css::{SelectorError, query_selector_all};
use pinpoint_dom::{DomTree, NodeId};

/// A read-only document the selector search can inspect and query.
///
/// Nodes are small handles (indices, pointers) owned by the host. The search
/// only walks upwards through [`SelectorHost::parent`] and asks the host to
/// run selectors; it never holds on to a node past one invocation.
pub trait SelectorHost {
    /// Handle for one node of the document.
    type Node: Copy + Eq + fmt::Debug;

    /// Why [`SelectorHost::query_all`] could not run a selector.
    type Error: fmt::Display;

    /// The document node, the scope for global uniqueness checks.
    fn document(&self) -> Self::Node;

    /// The parent of `node`, or `None` for the document and detached nodes.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` is an element (not text, comment or the document).
    fn is_element(&self, node: Self::Node) -> bool;

    /// Tag name of an element.
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Value of one attribute of an element.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// All attributes of an element as `(name, value)`, in source order.
    fn attributes(&self, node: Self::Node) -> Vec<(&str, &str)>;

    /// 1-based position of an element among its parent's element children.
    fn element_index(&self, node: Self::Node) -> Option<usize>;

    /// Every element under `scope` (exclusive) matching `selector`, in
    /// document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot evaluate `selector`.
    fn query_all(&self, scope: Self::Node, selector: &str)
    -> Result<Vec<Self::Node>, Self::Error>;
}

impl SelectorHost for DomTree {
    type Node = NodeId;
    type Error = SelectorError;

    fn document(&self) -> NodeId {
        self.root()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn is_element(&self, node: NodeId) -> bool {
        self.as_element(node).is_some()
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|e| e.tag_name.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.as_element(node).and_then(|e| e.attr(name))
    }

    fn attributes(&self, node: NodeId) -> Vec<(&str, &str)> {
        self.as_element(node)
            .map(|e| {
                e.attrs
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn element_index(&self, node: NodeId) -> Option<usize> {
        Self::element_index(self, node)
    }

    fn query_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        query_selector_all(self, scope, selector)
    }
}
