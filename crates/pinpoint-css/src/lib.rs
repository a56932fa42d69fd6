//! CSS selector parsing, matching, and querying over a `pinpoint-dom` tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class, ID, universal and attribute selectors
//!   - Structural pseudo-classes, including `:nth-child(An+B)`
//!   - Complex selectors with combinators (descendant, child, sibling)
//!   - Comma-separated selector lists
//!
//! - **Querying** ([DOM § 4.2.6](https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall))
//!   - `querySelector` / `querySelectorAll` relative to a scope node
//!
//! - **Serialization** ([CSSOM § 2.1](https://drafts.csswg.org/cssom/#common-serializing-idioms))
//!   - Escaping identifiers and strings for embedding in selectors
//!
//! # Not Implemented
//!
//! - Interactive pseudo-classes (`:hover`, `:focus`, ...) and pseudo-elements
//! - Logical combinations (`:not()`, `:is()`, `:has()`)
//! - Namespaces and attribute case-sensitivity flags

/// Selector parse errors.
pub mod error;
/// `querySelector` and `querySelectorAll` over a DOM tree.
pub mod query;
/// Selector representation, parsing and matching.
pub mod selector;
/// Identifier and string serialization.
pub mod serialize;

pub use error::SelectorError;
pub use query::{query_selector, query_selector_all, select_all};
pub use selector::{ParsedSelector, SelectorList, parse_selector};
pub use serialize::{serialize_identifier, serialize_string};
