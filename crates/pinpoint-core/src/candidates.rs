//! Per-element selector fragments, one list per family.

use pinpoint_css::{serialize_identifier, serialize_string};
use regex::Regex;

use crate::host::SelectorHost;

/// The raw material for one element's fragment.
///
/// Ids and class names stay unescaped so the exclusion pattern sees what the
/// author wrote; [`Candidates::id_selector`] and
/// [`Candidates::class_selectors`] escape on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Candidates {
    /// Lowercased tag name, escaped as an identifier.
    pub tag: String,
    /// The `id` attribute, if present and non-empty.
    pub id: Option<String>,
    /// Distinct class names in attribute order.
    pub classes: Vec<String>,
    /// `[name="value"]` tokens in source order, ignored names left out.
    pub attributes: Vec<String>,
    /// `tag:nth-child(k)`, or `None` without a parent.
    pub nth_child: Option<String>,
}

impl Candidates {
    /// Read the candidates of `node`. Returns `None` if it is not an element.
    #[must_use]
    pub fn extract<H: SelectorHost>(
        host: &H,
        node: H::Node,
        attributes_to_ignore: &[String],
    ) -> Option<Self> {
        let tag = serialize_identifier(&host.tag_name(node)?.to_ascii_lowercase());

        let id = host
            .attribute(node, "id")
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        let mut classes: Vec<String> = Vec::new();
        for class in host
            .attribute(node, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
        {
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
        }

        let attributes = host
            .attributes(node)
            .into_iter()
            .filter(|(name, _)| {
                !attributes_to_ignore
                    .iter()
                    .any(|ignored| ignored.as_str() == *name)
            })
            .map(|(name, value)| {
                format!("[{}={}]", serialize_identifier(name), serialize_string(value))
            })
            .collect();

        let nth_child = host
            .parent(node)
            .and_then(|_| host.element_index(node))
            .map(|index| format!("{tag}:nth-child({index})"));

        Some(Self {
            tag,
            id,
            classes,
            attributes,
            nth_child,
        })
    }

    /// Drop an id or class names matching `pattern`.
    pub fn exclude(&mut self, pattern: &Regex) {
        if self.id.as_deref().is_some_and(|id| pattern.is_match(id)) {
            self.id = None;
        }
        self.classes.retain(|class| !pattern.is_match(class));
    }

    /// `#id`, escaped.
    #[must_use]
    pub fn id_selector(&self) -> Option<String> {
        self.id
            .as_deref()
            .map(|id| format!("#{}", serialize_identifier(id)))
    }

    /// `.class` tokens, escaped, in order.
    #[must_use]
    pub fn class_selectors(&self) -> Vec<String> {
        self.classes
            .iter()
            .map(|class| format!(".{}", serialize_identifier(class)))
            .collect()
    }
}
