use pinpoint_dom::{DomTree, ElementData, NodeId, NodeType};
use tracing::debug;

use crate::token::Token;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for void elements."
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose start tag closes an open `p` that is the current node.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "div",
    "dl",
    "fieldset",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Elements whose end tag may be omitted without an issue being recorded.
const OPTIONAL_END_TAG: &[&str] = &["li", "p", "td", "th", "tr", "dt", "dd", "option"];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#closing-elements-that-have-implied-end-tags)
///
/// For a start tag, the current-node tags it implicitly closes.
fn implied_end_tags(start_tag: &str) -> &'static [&'static str] {
    match start_tag {
        "li" => &["li"],
        "dt" | "dd" => &["dt", "dd"],
        "option" => &["option"],
        "td" | "th" => &["td", "th"],
        "tr" => &["td", "th", "tr"],
        tag if CLOSES_PARAGRAPH.contains(&tag) => &["p"],
        _ => &[],
    }
}

/// A recoverable problem met while building the tree.
///
/// The builder never fails; malformed markup is repaired and noted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
}

/// Builds a [`DomTree`] from a token stream with a stack of open elements.
///
/// The resulting tree mirrors the markup: no `html`, `head` or `body`
/// elements are synthesized, so a fragment such as `<ul><li>a</li></ul>`
/// produces a document whose only child is the `ul`.
pub struct TreeBuilder {
    tokens: Vec<Token>,
    tree: DomTree,
    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    open_elements: Vec<(NodeId, String)>,
    issues: Vec<ParseIssue>,
    token_index: usize,
}

impl TreeBuilder {
    /// Create a builder over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tree: DomTree::new(),
            open_elements: Vec::new(),
            issues: Vec::new(),
            token_index: 0,
        }
    }

    /// Run the builder and return the DOM tree with any recorded issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            self.process_token(token);
        }
        (self.tree, self.issues)
    }

    fn current_node(&self) -> NodeId {
        self.open_elements
            .last()
            .map_or(NodeId::ROOT, |(id, _)| *id)
    }

    fn current_tag(&self) -> Option<&str> {
        self.open_elements.last().map(|(_, tag)| tag.as_str())
    }

    fn parse_issue(&mut self, message: String) {
        debug!(token_index = self.token_index, "{message}");
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
        });
    }

    fn append(&mut self, node_type: NodeType) -> NodeId {
        let parent = self.current_node();
        let id = self.tree.alloc(node_type);
        self.tree.append_child(parent, id);
        id
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Doctype { name } => {
                let _ = self.append(NodeType::Doctype(name));
            }
            Token::Comment(data) => {
                let _ = self.append(NodeType::Comment(data));
            }
            Token::Text(data) => {
                let _ = self.append(NodeType::Text(data));
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                let closes = implied_end_tags(&name);
                while self.current_tag().is_some_and(|tag| closes.contains(&tag)) {
                    let _ = self.open_elements.pop();
                }

                let element = ElementData {
                    tag_name: name.clone(),
                    attrs: attributes
                        .into_iter()
                        .map(|attr| (attr.name, attr.value))
                        .collect(),
                };
                let id = self.append(NodeType::Element(element));

                let is_void = VOID_ELEMENTS.contains(&name.as_str());
                if self_closing && !is_void {
                    self.parse_issue(format!("self-closing non-void element <{name}/>"));
                }
                if !is_void && !self_closing {
                    self.open_elements.push((id, name));
                }
            }
            Token::EndTag { name } => {
                if VOID_ELEMENTS.contains(&name.as_str()) {
                    self.parse_issue(format!("end tag for void element </{name}>"));
                    return;
                }
                match self.open_elements.iter().rposition(|(_, tag)| *tag == name) {
                    Some(position) => {
                        if position + 1 != self.open_elements.len() {
                            self.parse_issue(format!("</{name}> closes unclosed children"));
                        }
                        self.open_elements.truncate(position);
                    }
                    None => self.parse_issue(format!("stray end tag </{name}>")),
                }
            }
            Token::EndOfFile => {
                let unclosed: Vec<String> = self
                    .open_elements
                    .drain(..)
                    .map(|(_, tag)| tag)
                    .filter(|tag| !OPTIONAL_END_TAG.contains(&tag.as_str()))
                    .collect();
                if !unclosed.is_empty() {
                    self.parse_issue(format!(
                        "unclosed elements at end of input: {}",
                        unclosed.join(", ")
                    ));
                }
            }
        }
    }
}
