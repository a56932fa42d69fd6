//! Shortest unique CSS selectors for elements of a document.
//!
//! Given an element, [`unique`] returns a selector such as
//! `#app > ul > li:nth-child(2)` that matches that element and nothing
//! else, so it can be found again later.
//!
//! # How the search works
//!
//! - For each element from the target up to the document element, read its
//!   tag, id, classes, attributes and sibling position ([`Candidates`]).
//! - Pick one fragment per element that is unique among its parent's
//!   descendants, trying families in the configured [`SelectorType`] order.
//!   Classes and attributes are tried in combinations of up to
//!   [`MAX_COMBINATION_SIZE`], smallest first ([`Combinations`]).
//! - Join the fragments with ` > `, starting from the target and adding one
//!   ancestor at a time, until the selector is unique in the whole document.
//!
//! The document is reached through the [`SelectorHost`] trait, implemented
//! here for [`pinpoint_dom::DomTree`].

/// Per-element candidate fragments.
pub mod candidates;
/// Choosing one fragment per element.
pub mod chooser;
/// Subset enumeration for classes and attributes.
pub mod combinations;
/// Option validation errors.
pub mod error;
/// The document interface.
pub mod host;
/// Search options and config files.
pub mod options;
/// Assembling the final selector.
pub mod path;

pub use candidates::Candidates;
pub use chooser::{WILDCARD, choose_fragment, is_locally_unique};
pub use combinations::{Combinations, MAX_COMBINATION_SIZE};
pub use error::Error;
pub use host::SelectorHost;
pub use options::{Options, OptionsConfig, SelectorType};
pub use path::{element_chain, is_globally_unique, unique, unique_selector};
