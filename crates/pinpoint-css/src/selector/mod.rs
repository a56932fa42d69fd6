//! CSS Selector representation and matching
//!
//! This module implements selector matching per
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) for the subset of
//! the grammar that generated selectors use, plus the common structural
//! pseudo-classes.

mod parser;

pub use parser::parse_selector;

use pinpoint_dom::{DomTree, ElementData, NodeId, NodeType};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Examples: `div`, `p`, `li`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// Examples: `.highlight`, `.nav-item`
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// Examples: `#main`, `#\31 st`
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal,

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    /// Structural pseudo-class that requires DOM tree context to match.
    PseudoClass(PseudoClass),

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),
}

/// Structural pseudo-classes per [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    /// `:root`: the document element.
    Root,
    /// `:first-child`
    FirstChild,
    /// `:last-child`
    LastChild,
    /// `:only-child`
    OnlyChild,
    /// `:first-of-type`
    FirstOfType,
    /// `:last-of-type`
    LastOfType,
    /// `:empty`: no element children and no non-whitespace text.
    Empty,
    /// [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    NthChild(NthExpr),
    /// [§ 14.4.3 :nth-of-type()](https://www.w3.org/TR/selectors-4/#the-nth-of-type-pseudo)
    NthOfType(NthExpr),
}

/// [§ 14.4 An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Matches 1-based positions `p` for which some `n >= 0` gives `p = a*n + b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpr {
    /// Step.
    pub a: i32,
    /// Offset.
    pub b: i32,
}

impl NthExpr {
    /// An expression matching exactly one position.
    #[must_use]
    pub const fn index(b: i32) -> Self {
        Self { a: 0, b }
    }

    /// Check whether the 1-based `position` is selected.
    #[must_use]
    pub fn matches(self, position: i32) -> bool {
        if self.a == 0 {
            return position == self.b;
        }
        // Widened so extreme offsets such as `n-2147483648` cannot overflow.
        let diff = i64::from(position) - i64::from(self.b);
        let step = i64::from(self.a);
        diff % step == 0 && diff / step >= 0
    }
}

/// Attribute selectors per [§ 6.4](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`
    Exists(String),
    /// `[attr=value]`
    Equals(String, String),
    /// `[attr~=value]`: whitespace-separated word match.
    Includes(String, String),
    /// `[attr|=value]`: exact, or prefix followed by `-`.
    DashMatch(String, String),
    /// `[attr^=value]`
    PrefixMatch(String, String),
    /// `[attr$=value]`
    SuffixMatch(String, String),
    /// `[attr*=value]`
    SubstringMatch(String, String),
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The list of simple selectors that make up this compound selector.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `A B`
    Descendant,
    /// `A > B`
    Child,
    /// `A + B`
    NextSibling,
    /// `A ~ B`
    SubsequentSibling,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// Example: `div.container > ul.nav li`
/// ```text
/// subject: [li]
/// combinators: [(Descendant, ul.nav), (Child, div.container)]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound selector (the subject of the selector).
    pub subject: CompoundSelector,

    /// Chain of (combinator, `compound_selector`) pairs going left from the subject.
    /// The order is right-to-left because matching is done from the subject upward.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// A parsed complex selector ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The complex selector (compound selectors with combinators).
    pub complex: ComplexSelector,
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// A comma-separated list; an element matches if any member matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ParsedSelector>);

impl SelectorList {
    /// Check whether any selector in the list matches the element.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        self.0.iter().any(|s| s.matches_in_tree(tree, node_id))
    }
}

impl ParsedSelector {
    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Match a selector against an element with full DOM tree context.
    /// Combinators may reach outside any query scope, as with `querySelectorAll`.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        compound_matches_in_tree(&self.complex.subject, tree, node_id)
            && self.matches_combinators(tree, node_id, 0)
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// Walk the right-to-left combinator chain starting at `index`, with
    /// `current_id` already matched. Descendant and subsequent-sibling
    /// combinators backtrack over every candidate, so `div > p span` is not
    /// defeated by the nearest `p` having the wrong parent.
    fn matches_combinators(&self, tree: &DomTree, current_id: NodeId, index: usize) -> bool {
        let Some((combinator, compound)) = self.complex.combinators.get(index) else {
            return true;
        };

        match combinator {
            Combinator::Descendant => tree.ancestors(current_id).any(|ancestor_id| {
                compound_matches_in_tree(compound, tree, ancestor_id)
                    && self.matches_combinators(tree, ancestor_id, index + 1)
            }),

            Combinator::Child => tree.parent(current_id).is_some_and(|parent_id| {
                compound_matches_in_tree(compound, tree, parent_id)
                    && self.matches_combinators(tree, parent_id, index + 1)
            }),

            Combinator::NextSibling => tree
                .preceding_siblings(current_id)
                .find(|&sibling_id| tree.as_element(sibling_id).is_some())
                .is_some_and(|prev_id| {
                    compound_matches_in_tree(compound, tree, prev_id)
                        && self.matches_combinators(tree, prev_id, index + 1)
                }),

            Combinator::SubsequentSibling => {
                tree.preceding_siblings(current_id).any(|sibling_id| {
                    compound_matches_in_tree(compound, tree, sibling_id)
                        && self.matches_combinators(tree, sibling_id, index + 1)
                })
            }
        }
    }
}

/// Check if a compound selector matches an element, with tree context
/// for structural pseudo-class matching.
fn compound_matches_in_tree(compound: &CompoundSelector, tree: &DomTree, node_id: NodeId) -> bool {
    let Some(element) = tree.as_element(node_id) else {
        return false;
    };
    compound.simple_selectors.iter().all(|simple| match simple {
        SimpleSelector::PseudoClass(pc) => pseudo_class_matches(*pc, tree, node_id, element),
        _ => simple.matches(element),
    })
}

/// Match a structural pseudo-class against an element with full DOM tree context.
fn pseudo_class_matches(
    pc: PseudoClass,
    tree: &DomTree,
    node_id: NodeId,
    element: &ElementData,
) -> bool {
    let same_type = |id: NodeId| {
        tree.as_element(id)
            .is_some_and(|e| e.tag_name.eq_ignore_ascii_case(&element.tag_name))
    };

    match pc {
        // "In HTML, this is the html element." Here: whatever the document element is.
        PseudoClass::Root => tree.document_element() == Some(node_id),

        PseudoClass::FirstChild => tree
            .parent(node_id)
            .is_some_and(|parent| tree.element_children(parent).next() == Some(node_id)),

        PseudoClass::LastChild => tree
            .parent(node_id)
            .is_some_and(|parent| tree.element_children(parent).last() == Some(node_id)),

        PseudoClass::OnlyChild => tree
            .parent(node_id)
            .is_some_and(|parent| tree.element_children(parent).count() == 1),

        PseudoClass::FirstOfType => tree.parent(node_id).is_some_and(|parent| {
            tree.element_children(parent).find(|&c| same_type(c)) == Some(node_id)
        }),

        PseudoClass::LastOfType => tree.parent(node_id).is_some_and(|parent| {
            tree.element_children(parent).filter(|&c| same_type(c)).last() == Some(node_id)
        }),

        PseudoClass::Empty => {
            tree.children(node_id)
                .iter()
                .all(|&c| match tree.get(c).map(|n| &n.node_type) {
                    Some(NodeType::Text(t)) => t.trim().is_empty(),
                    Some(NodeType::Comment(_)) => true,
                    _ => false,
                })
        }

        PseudoClass::NthChild(expr) => tree
            .element_index(node_id)
            .and_then(|index| i32::try_from(index).ok())
            .is_some_and(|position| expr.matches(position)),

        PseudoClass::NthOfType(expr) => tree.parent(node_id).is_some_and(|parent| {
            tree.element_children(parent)
                .filter(|&c| same_type(c))
                .position(|c| c == node_id)
                .and_then(|pos| i32::try_from(pos + 1).ok())
                .is_some_and(|position| expr.matches(position))
        }),
    }
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element, without tree context.
    ///
    /// Structural pseudo-classes always report `false` here; use
    /// [`ParsedSelector::matches_in_tree`].
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class_name) => element.has_class(class_name),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
            Self::PseudoClass(_) => false,
            Self::Attribute(attr_sel) => attr_sel.matches(element),
        }
    }
}

impl AttributeSelector {
    /// Check the attribute condition against an element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Exists(name) => element.attrs.contains_key(name.as_str()),
            Self::Equals(name, val) => element.attr(name).is_some_and(|v| v == val),
            Self::Includes(name, val) => element
                .attr(name)
                .is_some_and(|v| v.split_ascii_whitespace().any(|w| w == val)),
            Self::DashMatch(name, val) => element.attr(name).is_some_and(|v| {
                v == val || (v.starts_with(val.as_str()) && v[val.len()..].starts_with('-'))
            }),
            // "If 'val' is the empty string then the selector does not represent anything."
            Self::PrefixMatch(name, val) => {
                !val.is_empty() && element.attr(name).is_some_and(|v| v.starts_with(val.as_str()))
            }
            Self::SuffixMatch(name, val) => {
                !val.is_empty() && element.attr(name).is_some_and(|v| v.ends_with(val.as_str()))
            }
            Self::SubstringMatch(name, val) => {
                !val.is_empty() && element.attr(name).is_some_and(|v| v.contains(val.as_str()))
            }
        }
    }
}
