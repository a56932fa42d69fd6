//! Selector parsing.
//!
//! [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)

use super::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, NthExpr, ParsedSelector,
    PseudoClass, SelectorList, SimpleSelector,
};
use crate::error::SelectorError;

/// Parse a raw selector string into a [`SelectorList`].
///
/// Supports:
/// - Type and universal selectors: `div`, `*`
/// - Class and ID selectors, with CSS escapes: `.a`, `#\31 st`
/// - Attribute selectors: `[href]`, `[type="text"]`, `[lang|=en]`, ...
/// - Structural pseudo-classes, including `:nth-child(An+B)`
/// - Combinators: `div p`, `ul > li`, `h1 + p`, `h1 ~ p`
/// - Selector lists: `h1, h2`
///
/// # Errors
///
/// Returns a [`SelectorError`] for syntax the matcher cannot represent.
pub fn parse_selector(raw: &str) -> Result<SelectorList, SelectorError> {
    SelectorParser::new(raw).parse_list()
}

struct SelectorParser {
    chars: Vec<char>,
    pos: usize,
}

impl SelectorParser {
    fn new(raw: &str) -> Self {
        Self {
            chars: raw.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Returns true if any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => SelectorError::UnexpectedEnd {
                expected: "more selector input",
            },
        }
    }

    /// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let _ = self.skip_whitespace();
        if self.peek().is_none() {
            return Err(SelectorError::Empty);
        }

        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_complex()?);
            let _ = self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => {
                    let offset = self.pos;
                    self.pos += 1;
                    let _ = self.skip_whitespace();
                    if self.peek().is_none() {
                        return Err(SelectorError::DanglingCombinator { offset });
                    }
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
        Ok(SelectorList(selectors))
    }

    /// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    ///
    /// Compounds are collected left-to-right and then reversed so the subject
    /// is first in line for right-to-left matching.
    fn parse_complex(&mut self) -> Result<ParsedSelector, SelectorError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators_between = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };

            if combinator != Combinator::Descendant {
                let offset = self.pos;
                self.pos += 1;
                let _ = self.skip_whitespace();
                if matches!(self.peek(), None | Some(',' | '>' | '+' | '~')) {
                    return Err(SelectorError::DanglingCombinator { offset });
                }
            }

            combinators_between.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        let Some(subject) = compounds.pop() else {
            return Err(SelectorError::Empty);
        };

        // For "A > B C": compounds [A, B], combinators [Child, Descendant]
        // become [(Descendant, B), (Child, A)].
        let combinators = compounds
            .into_iter()
            .zip(combinators_between)
            .rev()
            .map(|(compound, combinator)| (combinator, compound))
            .collect();

        Ok(ParsedSelector {
            complex: ComplexSelector {
                subject,
                combinators,
            },
        })
    }

    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut simple_selectors = Vec::new();

        if self.peek() == Some('*') {
            self.pos += 1;
            simple_selectors.push(SimpleSelector::Universal);
        } else if self.would_start_ident() {
            simple_selectors.push(SimpleSelector::Type(self.consume_ident()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.require_ident("an identifier after '#'")?;
                    simple_selectors.push(SimpleSelector::Id(id));
                }
                Some('.') => {
                    self.pos += 1;
                    let class = self.require_ident("a class name after '.'")?;
                    simple_selectors.push(SimpleSelector::Class(class));
                }
                Some('[') => {
                    self.pos += 1;
                    simple_selectors.push(SimpleSelector::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    simple_selectors.push(SimpleSelector::PseudoClass(self.parse_pseudo_class()?));
                }
                _ => break,
            }
        }

        if simple_selectors.is_empty() {
            return Err(match self.peek() {
                Some(',' | '>' | '+' | '~') => SelectorError::DanglingCombinator { offset: self.pos },
                _ => self.unexpected(),
            });
        }

        Ok(CompoundSelector { simple_selectors })
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Called with the opening `[` already consumed.
    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        let _ = self.skip_whitespace();
        let name = self.require_ident("an attribute name")?;
        let _ = self.skip_whitespace();

        let operator = match self.bump() {
            Some(']') => return Ok(AttributeSelector::Exists(name)),
            Some('=') => '=',
            Some(op @ ('~' | '|' | '^' | '$' | '*')) => {
                if self.peek() != Some('=') {
                    return Err(self.unexpected());
                }
                self.pos += 1;
                op
            }
            Some(_) => {
                self.pos -= 1;
                return Err(self.unexpected());
            }
            None => {
                return Err(SelectorError::UnexpectedEnd {
                    expected: "']' or an attribute operator",
                });
            }
        };

        let _ = self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.consume_string(quote)?
            }
            _ => self.require_ident("an attribute value")?,
        };
        let _ = self.skip_whitespace();
        if self.peek() != Some(']') {
            return Err(self.unexpected());
        }
        self.pos += 1;

        Ok(match operator {
            '~' => AttributeSelector::Includes(name, value),
            '|' => AttributeSelector::DashMatch(name, value),
            '^' => AttributeSelector::PrefixMatch(name, value),
            '$' => AttributeSelector::SuffixMatch(name, value),
            '*' => AttributeSelector::SubstringMatch(name, value),
            _ => AttributeSelector::Equals(name, value),
        })
    }

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Called with the leading `:` already consumed.
    fn parse_pseudo_class(&mut self) -> Result<PseudoClass, SelectorError> {
        if self.peek() == Some(':') {
            self.pos += 1;
            let name = self.require_ident("a pseudo-element name")?;
            return Err(SelectorError::UnsupportedPseudoClass(format!(":{name}")));
        }

        let name = self.require_ident("a pseudo-class name")?.to_ascii_lowercase();

        let argument = if self.peek() == Some('(') {
            self.pos += 1;
            let mut argument = String::new();
            loop {
                match self.bump() {
                    Some(')') => break,
                    Some(c) => argument.push(c),
                    None => return Err(SelectorError::UnexpectedEnd { expected: "')'" }),
                }
            }
            Some(argument)
        } else {
            None
        };

        match (name.as_str(), argument) {
            ("root", None) => Ok(PseudoClass::Root),
            ("first-child", None) => Ok(PseudoClass::FirstChild),
            ("last-child", None) => Ok(PseudoClass::LastChild),
            ("only-child", None) => Ok(PseudoClass::OnlyChild),
            ("first-of-type", None) => Ok(PseudoClass::FirstOfType),
            ("last-of-type", None) => Ok(PseudoClass::LastOfType),
            ("empty", None) => Ok(PseudoClass::Empty),
            ("nth-child", Some(arg)) => parse_nth(&arg).map(PseudoClass::NthChild),
            ("nth-of-type", Some(arg)) => parse_nth(&arg).map(PseudoClass::NthOfType),
            _ => Err(SelectorError::UnsupportedPseudoClass(name)),
        }
    }

    /// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
    fn would_start_ident(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_at(1) {
                Some('-') => true,
                Some('\\') => self.peek_at(2).is_some_and(|c| c != '\n'),
                Some(c) => is_ident_start_char(c),
                None => false,
            },
            Some('\\') => self.peek_at(1).is_some_and(|c| c != '\n'),
            Some(c) => is_ident_start_char(c),
            None => false,
        }
    }

    fn require_ident(&mut self, expected: &'static str) -> Result<String, SelectorError> {
        if !self.would_start_ident() {
            return Err(match self.peek() {
                Some(found) => SelectorError::UnexpectedChar {
                    found,
                    offset: self.pos,
                },
                None => SelectorError::UnexpectedEnd { expected },
            });
        }
        Ok(self.consume_ident())
    }

    /// [§ 4.3.11 Consume an ident sequence](https://www.w3.org/TR/css-syntax-3/#consume-name)
    fn consume_ident(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                ident.push(c);
                self.pos += 1;
            } else if c == '\\' && self.peek_at(1).is_some_and(|next| next != '\n') {
                self.pos += 1;
                ident.push(self.consume_escape());
            } else {
                break;
            }
        }
        ident
    }

    /// [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
    ///
    /// Called with the backslash already consumed.
    fn consume_escape(&mut self) -> char {
        let Some(first) = self.bump() else {
            return char::REPLACEMENT_CHARACTER;
        };
        if !first.is_ascii_hexdigit() {
            return first;
        }

        let mut hex = String::from(first);
        while hex.len() < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            hex.push(self.chars[self.pos]);
            self.pos += 1;
        }
        if self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&code| code != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Called with the opening quote already consumed.
    fn consume_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(SelectorError::UnexpectedEnd {
                        expected: "a closing quote",
                    });
                }
                Some(c) if c == quote => return Ok(value),
                Some('\n') => {
                    self.pos -= 1;
                    return Err(self.unexpected());
                }
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => self.pos += 1,
                    Some(_) => value.push(self.consume_escape()),
                },
                Some(c) => value.push(c),
            }
        }
    }
}

/// [§ 14.4 An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
///
/// Accepts `odd`, `even`, `B`, `An`, `An+B` and the signed/omitted forms
/// (`n`, `-n+3`, `+2n-1`). Whitespace around the sign is tolerated.
fn parse_nth(raw: &str) -> Result<NthExpr, SelectorError> {
    let invalid = || SelectorError::InvalidNth(raw.to_string());
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match compact.as_str() {
        "odd" => return Ok(NthExpr { a: 2, b: 1 }),
        "even" => return Ok(NthExpr { a: 2, b: 0 }),
        "" => return Err(invalid()),
        _ => {}
    }

    let Some((a_part, b_part)) = compact.split_once('n') else {
        return compact.parse().map(NthExpr::index).map_err(|_| invalid());
    };

    let a = match a_part {
        "" | "+" => 1,
        "-" => -1,
        digits => digits.parse().map_err(|_| invalid())?,
    };
    let b = if b_part.is_empty() {
        0
    } else if b_part.starts_with(['+', '-']) {
        b_part.parse().map_err(|_| invalid())?
    } else {
        return Err(invalid());
    };

    Ok(NthExpr { a, b })
}

/// [§ 4.2 whitespace](https://www.w3.org/TR/css-syntax-3/#whitespace)
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// [§ 4.2 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// [§ 4.2 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}
