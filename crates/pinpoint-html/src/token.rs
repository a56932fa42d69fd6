use core::fmt;

/// An attribute on a start tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer emits tokens of these types to the tree builder.
/// Consecutive characters are batched into one [`Token::Text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<!DOCTYPE name>`
    Doctype {
        /// Lowercased doctype name, empty when missing.
        name: String,
    },

    /// A start tag such as `<li class="x">`.
    StartTag {
        /// Lowercased tag name.
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// Attributes in source order; later duplicates are already dropped.
        attributes: Vec<Attribute>,
    },

    /// An end tag such as `</li>`.
    EndTag {
        /// Lowercased tag name.
        name: String,
    },

    /// `<!-- data -->`
    Comment(String),

    /// A run of text with character references resolved.
    Text(String),

    /// End of input.
    EndOfFile,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype { name } => write!(f, "<!DOCTYPE {name}>"),
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment(data) => write!(f, "<!--{data}-->"),
            Self::Text(data) => write!(f, "{data:?}"),
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
