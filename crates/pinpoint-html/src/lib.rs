//! Lenient HTML reader producing a `pinpoint-dom` tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RAWTEXT and tag states, all attribute quoting styles
//!   - Comments, DOCTYPE, and common character references
//!
//! - **Tree Builder**
//!   - Stack of open elements, void and self-closing elements
//!   - Implied end tags for `li`, `p`, `dt`/`dd`, `option` and table cells
//!
//! # Not Implemented
//!
//! - Insertion modes and implicit `html`/`head`/`body` synthesis
//! - Foster parenting and the adoption agency algorithm
//! - The full named character reference table

/// Token types emitted by the tokenizer.
pub mod token;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;
/// Tree construction from tokens.
pub mod tree_builder;

pub use token::{Attribute, Token};
pub use tokenizer::{HtmlTokenizer, TokenizerState};
pub use tree_builder::{ParseIssue, TreeBuilder};

use std::fmt::Write;

use pinpoint_dom::{DomTree, NodeId, NodeType};

/// Tokenize and build `html` into a [`DomTree`].
#[must_use]
pub fn parse_html(html: &str) -> DomTree {
    parse_html_with_issues(html).0
}

/// Like [`parse_html`], also returning the recoverable issues met on the way.
#[must_use]
pub fn parse_html_with_issues(html: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HtmlTokenizer::new(html);
    tokenizer.run();
    TreeBuilder::new(tokenizer.into_tokens()).run_with_issues()
}

/// Render the subtree at `id` as an indented outline, one node per line.
#[must_use]
pub fn tree_to_string(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_tree(tree, id, 0, &mut out);
    out
}

fn write_tree(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    // Writing into a String cannot fail.
    let _ = match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}#document"),
        NodeType::Doctype(name) => writeln!(out, "{prefix}<!DOCTYPE {name}>"),
        NodeType::Element(data) => {
            let attrs: String = data
                .attrs
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        format!(" {k}")
                    } else {
                        format!(" {k}=\"{v}\"")
                    }
                })
                .collect();
            writeln!(out, "{prefix}<{}{attrs}>", data.tag_name)
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n");
            writeln!(out, "{prefix}\"{display}\"")
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!--{data}-->"),
    };
    for &child_id in tree.children(id) {
        write_tree(tree, child_id, indent + 1, out);
    }
}
