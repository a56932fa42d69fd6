//! CSSOM serialization of identifiers and strings.
//!
//! [§ 2.1 Common Serializing Idioms](https://drafts.csswg.org/cssom/#common-serializing-idioms)
//!
//! Generated selectors embed raw attribute data (ids, class names, attribute
//! values). These helpers make any such value safe to splice into a selector
//! so that [`crate::parse_selector`] reads back the original text.

use std::fmt::Write;

/// "To serialize an identifier means to create a string represented by the
/// concatenation of, for each character of the identifier: ..."
///
/// ```
/// use pinpoint_css::serialize_identifier;
///
/// assert_eq!(serialize_identifier("main"), "main");
/// assert_eq!(serialize_identifier("1st"), "\\31 st");
/// assert_eq!(serialize_identifier("a:b"), "a\\:b");
/// assert_eq!(serialize_identifier("-"), "\\-");
/// ```
#[must_use]
pub fn serialize_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let first = ident.chars().next();

    for (i, c) in ident.chars().enumerate() {
        match c {
            // "If the character is NULL (U+0000), then the REPLACEMENT CHARACTER (U+FFFD)."
            '\0' => out.push(char::REPLACEMENT_CHARACTER),
            // "If the character is in the range [\1-\1f] (U+0001 to U+001F) or is U+007F,
            // then the character escaped as code point."
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point_escape(&mut out, c),
            // "If the character is the first character and is in the range [0-9],
            // then the character escaped as code point."
            '0'..='9' if i == 0 => push_code_point_escape(&mut out, c),
            // "If the character is the second character and is in the range [0-9]
            // and the first character is a "-", then the character escaped as code point."
            '0'..='9' if i == 1 && first == Some('-') => push_code_point_escape(&mut out, c),
            // "If the character is the first character and is a "-", and there is
            // no second character, then the escaped character."
            '-' if i == 0 && ident.len() == 1 => out.push_str("\\-"),
            // "If the character is not handled by one of the above rules and is greater
            // than or equal to U+0080, is "-", "_", or in one of the ranges [0-9],
            // [A-Z], or [a-z], then the character itself."
            c if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() => out.push(c),
            // "Otherwise, the escaped character."
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

/// "To serialize a string means to create a string represented by '"'
/// (U+0022), followed by the result of applying the rules below to each
/// character of the given string, followed by '"' (U+0022)."
///
/// ```
/// use pinpoint_css::serialize_string;
///
/// assert_eq!(serialize_string("text"), "\"text\"");
/// assert_eq!(serialize_string("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
#[must_use]
pub fn serialize_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\0' => out.push(char::REPLACEMENT_CHARACTER),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point_escape(&mut out, c),
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// "To escape a character as code point means to create a string of
/// "\" (U+005C), followed by the Unicode code point as the smallest possible
/// number of hexadecimal digits in the range 0-9 a-f (U+0030 to U+0039 and
/// U+0061 to U+0066) to represent the code point in base 16, followed by a
/// single SPACE (U+0020)."
fn push_code_point_escape(out: &mut String, c: char) {
    // Writing into a String cannot fail.
    let _ = write!(out, "\\{:x} ", u32::from(c));
}
