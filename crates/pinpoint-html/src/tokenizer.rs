use strum_macros::Display;
use tracing::trace;

use crate::token::{Attribute, Token};

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// The named character references the reader resolves.
///
/// [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
/// lists more than two thousand; these cover what hand-written markup uses.
const NAMED_CHARACTER_REFERENCES: &[(&str, &str)] = &[
    ("amp", "&"),
    ("lt", "<"),
    ("gt", ">"),
    ("quot", "\""),
    ("apos", "'"),
    ("nbsp", "\u{a0}"),
    ("copy", "\u{a9}"),
    ("reg", "\u{ae}"),
    ("trade", "\u{2122}"),
    ("hellip", "\u{2026}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("laquo", "\u{ab}"),
    ("raquo", "\u{bb}"),
    ("middot", "\u{b7}"),
    ("times", "\u{d7}"),
    ("euro", "\u{20ac}"),
];

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// A reduced tokenizer state machine. States keep the names of the
/// corresponding sections in § 13.2.5; script-data and DOCTYPE identifier
/// states are folded into their simpler neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RawText,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    Doctype,
}

/// A tag token under construction.
#[derive(Debug, Default)]
struct PendingTag {
    name: String,
    is_end: bool,
    self_closing: bool,
    attributes: Vec<Attribute>,
    /// The attribute currently being read, committed by `finish_attribute`.
    attribute: Option<Attribute>,
}

/// HTML tokenizer producing a flat token stream.
pub struct HtmlTokenizer {
    input: Vec<char>,
    pos: usize,
    state: TokenizerState,
    tokens: Vec<Token>,
    text: String,
    comment: String,
    tag: PendingTag,
    /// Tag name that ends the current RAWTEXT section.
    raw_text_end: Option<String>,
}

impl HtmlTokenizer {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            state: TokenizerState::Data,
            tokens: Vec::new(),
            text: String::new(),
            comment: String::new(),
            tag: PendingTag::default(),
            raw_text_end: None,
        }
    }

    /// Consume the tokenizer and return its tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    const fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Step back one character so the next state sees it again.
    const fn reconsume_in(&mut self, state: TokenizerState) {
        self.pos -= 1;
        self.state = state;
    }

    fn next_few_characters_are(&self, target: &str, case_insensitive: bool) -> bool {
        let mut offset = self.pos;
        for expected in target.chars() {
            let Some(&actual) = self.input.get(offset) else {
                return false;
            };
            let same = if case_insensitive {
                actual.eq_ignore_ascii_case(&expected)
            } else {
                actual == expected
            };
            if !same {
                return false;
            }
            offset += 1;
        }
        true
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// Run the state machine to the end of the input.
    pub fn run(&mut self) {
        loop {
            trace!(state = %self.state, pos = self.pos, "tokenizer step");
            match self.state {
                TokenizerState::Data => match self.consume() {
                    Some('<') => self.switch_to(TokenizerState::TagOpen),
                    Some('&') => {
                        let resolved = self.consume_character_reference(false);
                        self.text.push_str(&resolved);
                    }
                    Some(c) => self.text.push(c),
                    None => break,
                },

                TokenizerState::RawText => self.step_raw_text(),

                TokenizerState::TagOpen => match self.consume() {
                    Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
                    Some('/') => self.switch_to(TokenizerState::EndTagOpen),
                    Some(c) if c.is_ascii_alphabetic() => {
                        self.tag = PendingTag::default();
                        self.reconsume_in(TokenizerState::TagName);
                    }
                    Some('?') => {
                        self.comment.clear();
                        self.reconsume_in(TokenizerState::BogusComment);
                    }
                    Some(_) => {
                        self.text.push('<');
                        self.reconsume_in(TokenizerState::Data);
                    }
                    None => {
                        self.text.push('<');
                        break;
                    }
                },

                TokenizerState::EndTagOpen => match self.consume() {
                    Some(c) if c.is_ascii_alphabetic() => {
                        self.tag = PendingTag {
                            is_end: true,
                            ..PendingTag::default()
                        };
                        self.reconsume_in(TokenizerState::TagName);
                    }
                    // "This is a missing-end-tag-name parse error."
                    Some('>') => self.switch_to(TokenizerState::Data),
                    Some(_) => {
                        self.comment.clear();
                        self.reconsume_in(TokenizerState::BogusComment);
                    }
                    None => {
                        self.text.push_str("</");
                        break;
                    }
                },

                TokenizerState::TagName => match self.consume() {
                    Some(c) if c.is_ascii_whitespace() => {
                        self.switch_to(TokenizerState::BeforeAttributeName);
                    }
                    Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
                    Some('>') => self.emit_tag(),
                    Some(c) => self.tag.name.push(c.to_ascii_lowercase()),
                    None => break,
                },

                TokenizerState::BeforeAttributeName => match self.consume() {
                    Some(c) if c.is_ascii_whitespace() => {}
                    Some('/' | '>') => self.reconsume_in(TokenizerState::AfterAttributeName),
                    None => break,
                    Some(_) => {
                        self.tag.attribute = Some(Attribute {
                            name: String::new(),
                            value: String::new(),
                        });
                        self.reconsume_in(TokenizerState::AttributeName);
                    }
                },

                TokenizerState::AttributeName => match self.consume() {
                    Some(c) if c.is_ascii_whitespace() || c == '/' || c == '>' => {
                        self.reconsume_in(TokenizerState::AfterAttributeName);
                    }
                    Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
                    Some(c) => {
                        if let Some(attr) = self.tag.attribute.as_mut() {
                            attr.name.push(c.to_ascii_lowercase());
                        }
                    }
                    None => break,
                },

                TokenizerState::AfterAttributeName => match self.consume() {
                    Some(c) if c.is_ascii_whitespace() => {}
                    Some('/') => {
                        self.finish_attribute();
                        self.switch_to(TokenizerState::SelfClosingStartTag);
                    }
                    Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
                    Some('>') => self.emit_tag(),
                    Some(_) => {
                        self.finish_attribute();
                        self.tag.attribute = Some(Attribute {
                            name: String::new(),
                            value: String::new(),
                        });
                        self.reconsume_in(TokenizerState::AttributeName);
                    }
                    None => break,
                },

                TokenizerState::BeforeAttributeValue => match self.consume() {
                    Some(c) if c.is_ascii_whitespace() => {}
                    Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
                    Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
                    // "This is a missing-attribute-value parse error."
                    Some('>') => self.emit_tag(),
                    Some(_) => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
                    None => break,
                },

                TokenizerState::AttributeValueDoubleQuoted => {
                    if !self.step_quoted_value('"') {
                        break;
                    }
                }

                TokenizerState::AttributeValueSingleQuoted => {
                    if !self.step_quoted_value('\'') {
                        break;
                    }
                }

                TokenizerState::AttributeValueUnquoted => match self.consume() {
                    Some(c) if c.is_ascii_whitespace() => {
                        self.finish_attribute();
                        self.switch_to(TokenizerState::BeforeAttributeName);
                    }
                    Some('&') => {
                        let resolved = self.consume_character_reference(true);
                        self.push_attribute_value(&resolved);
                    }
                    Some('>') => self.emit_tag(),
                    Some(c) => self.push_attribute_value(&c.to_string()),
                    None => break,
                },

                TokenizerState::SelfClosingStartTag => match self.consume() {
                    Some('>') => {
                        self.tag.self_closing = true;
                        self.emit_tag();
                    }
                    // "This is an unexpected-solidus-in-tag parse error."
                    Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
                    None => break,
                },

                TokenizerState::MarkupDeclarationOpen => {
                    self.comment.clear();
                    if self.next_few_characters_are("--", false) {
                        self.pos += 2;
                        self.switch_to(TokenizerState::Comment);
                    } else if self.next_few_characters_are("DOCTYPE", true) {
                        self.pos += "DOCTYPE".len();
                        self.switch_to(TokenizerState::Doctype);
                    } else {
                        self.switch_to(TokenizerState::BogusComment);
                    }
                }

                TokenizerState::Comment => {
                    if self.next_few_characters_are("-->", false) {
                        self.pos += 3;
                        self.emit_comment();
                        self.switch_to(TokenizerState::Data);
                    } else if let Some(c) = self.consume() {
                        self.comment.push(c);
                    } else {
                        self.emit_comment();
                        break;
                    }
                }

                TokenizerState::BogusComment => match self.consume() {
                    Some('>') => {
                        self.emit_comment();
                        self.switch_to(TokenizerState::Data);
                    }
                    Some(c) => self.comment.push(c),
                    None => {
                        self.emit_comment();
                        break;
                    }
                },

                TokenizerState::Doctype => {
                    let mut body = String::new();
                    while let Some(c) = self.consume() {
                        if c == '>' {
                            break;
                        }
                        body.push(c);
                    }
                    let name = body
                        .split_ascii_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_ascii_lowercase();
                    self.emit(Token::Doctype { name });
                    self.switch_to(TokenizerState::Data);
                }
            }
        }

        self.flush_text();
        self.tokens.push(Token::EndOfFile);
    }

    /// One step of a quoted attribute value. Returns false at end of input.
    fn step_quoted_value(&mut self, quote: char) -> bool {
        match self.consume() {
            Some(c) if c == quote => {
                self.finish_attribute();
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                let resolved = self.consume_character_reference(true);
                self.push_attribute_value(&resolved);
            }
            Some(c) => self.push_attribute_value(&c.to_string()),
            None => return false,
        }
        true
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    ///
    /// Text runs until `</name` followed by whitespace, `/` or `>`.
    fn step_raw_text(&mut self) {
        let end_tag = self
            .raw_text_end
            .as_ref()
            .map(|name| format!("</{name}"));
        if let Some(end_tag) = end_tag {
            let after = self.input.get(self.pos + end_tag.len()).copied();
            if self.next_few_characters_are(&end_tag, true)
                && after.is_none_or(|c| c.is_ascii_whitespace() || c == '/' || c == '>')
            {
                self.raw_text_end = None;
                self.pos += 1;
                self.switch_to(TokenizerState::TagOpen);
                return;
            }
        }
        match self.consume() {
            Some(c) => self.text.push(c),
            None => self.switch_to(TokenizerState::Data),
        }
    }

    fn push_attribute_value(&mut self, value: &str) {
        if let Some(attr) = self.tag.attribute.as_mut() {
            attr.value.push_str(value);
        }
    }

    /// Commit the attribute in progress.
    ///
    /// "If there is already an attribute on the token with the exact same name,
    /// then this is a duplicate-attribute parse error and the new attribute
    /// must be removed from the token."
    fn finish_attribute(&mut self) {
        let Some(attr) = self.tag.attribute.take() else {
            return;
        };
        if attr.name.is_empty() {
            return;
        }
        if self.tag.attributes.iter().any(|a| a.name == attr.name) {
            trace!(name = %attr.name, "dropping duplicate attribute");
            return;
        }
        self.tag.attributes.push(attr);
    }

    fn emit_tag(&mut self) {
        self.finish_attribute();
        let tag = std::mem::take(&mut self.tag);
        if tag.is_end {
            self.emit(Token::EndTag { name: tag.name });
            self.switch_to(TokenizerState::Data);
            return;
        }

        let enters_raw_text = !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str());
        if enters_raw_text {
            self.raw_text_end = Some(tag.name.clone());
        }
        self.emit(Token::StartTag {
            name: tag.name,
            self_closing: tag.self_closing,
            attributes: tag.attributes,
        });
        self.switch_to(if enters_raw_text {
            TokenizerState::RawText
        } else {
            TokenizerState::Data
        });
    }

    fn emit_comment(&mut self) {
        let data = std::mem::take(&mut self.comment);
        self.emit(Token::Comment(data));
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.tokens.push(Token::Text(text));
        }
    }

    /// Emit a non-text token, flushing any pending text first.
    fn emit(&mut self, token: Token) {
        self.flush_text();
        self.tokens.push(token);
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Called with the `&` already consumed. Returns the replacement text, or
    /// `&` itself (with the input position untouched) when nothing matches.
    fn consume_character_reference(&mut self, in_attribute: bool) -> String {
        let start = self.pos;

        if self.peek() == Some('#') {
            self.pos += 1;
            let hex = matches!(self.peek(), Some('x' | 'X'));
            if hex {
                self.pos += 1;
            }
            let radix = if hex { 16 } else { 10 };
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_digit(radix)) {
                self.pos += 1;
            }
            if self.pos == digits_start {
                // "absence-of-digits-in-numeric-character-reference"
                self.pos = start;
                return "&".to_string();
            }
            let digits: String = self.input[digits_start..self.pos].iter().collect();
            if self.peek() == Some(';') {
                self.pos += 1;
            }
            // "If the number is 0x00 ... greater than 0x10FFFF ... or a surrogate,
            // set the character reference code to 0xFFFD."
            let resolved = u32::from_str_radix(&digits, radix)
                .ok()
                .filter(|&code| code != 0)
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return resolved.to_string();
        }

        let mut end = self.pos;
        while self
            .input
            .get(end)
            .is_some_and(char::is_ascii_alphanumeric)
        {
            end += 1;
        }
        let name: String = self.input[self.pos..end].iter().collect();
        let terminated = self.input.get(end) == Some(&';');

        // Historical references without `;` are only honoured outside attributes.
        if !terminated && in_attribute {
            return "&".to_string();
        }

        match NAMED_CHARACTER_REFERENCES
            .iter()
            .find(|(entity, _)| *entity == name)
        {
            Some((_, replacement)) => {
                self.pos = if terminated { end + 1 } else { end };
                (*replacement).to_string()
            }
            None => "&".to_string(),
        }
    }
}
