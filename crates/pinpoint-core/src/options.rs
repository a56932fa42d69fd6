//! Search options and their on-disk form.
//!
//! [`Options`] is what the search consumes. [`OptionsConfig`] is the same
//! information as plain strings, read from TOML and validated once by
//! [`OptionsConfig::into_options`].
//!
//! ```toml
//! selector_types = ["ID", "Class", "Attributes", "NthChild"]
//! attributes_to_ignore = ["id", "class", "length", "style"]
//! exclude_regex = "^tmp-"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::Error;

/// A family of selector fragments the chooser may try for one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum SelectorType {
    /// `#id`
    #[strum(serialize = "ID")]
    Id,
    /// `.a`, `.a.b`, then `tag.a` and so on
    Class,
    /// `li`
    Tag,
    /// `li:nth-child(2)`
    NthChild,
    /// `[name="q"]`, then `input[name="q"]` and so on
    Attributes,
}

/// Options for [`crate::unique`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Families to try at each level, in priority order.
    pub selector_types: Vec<SelectorType>,
    /// Attribute names never turned into `[name="value"]` fragments.
    pub attributes_to_ignore: Vec<String>,
    /// Ids and class names matching this are never used.
    pub exclude: Option<Regex>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selector_types: default_selector_types(),
            attributes_to_ignore: default_attributes_to_ignore(),
            exclude: None,
        }
    }
}

impl Options {
    /// Replace the family order. Repeated families keep their first position.
    #[must_use]
    pub fn with_selector_types(mut self, types: impl IntoIterator<Item = SelectorType>) -> Self {
        self.selector_types = dedup_types(types);
        self
    }

    /// Replace the ignored attribute names.
    #[must_use]
    pub fn with_attributes_to_ignore<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.attributes_to_ignore = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the exclusion pattern.
    #[must_use]
    pub fn with_exclude(mut self, exclude: Regex) -> Self {
        self.exclude = Some(exclude);
        self
    }

    /// The family order with repeats removed.
    #[must_use]
    pub fn selector_order(&self) -> Vec<SelectorType> {
        dedup_types(self.selector_types.iter().copied())
    }
}

fn dedup_types(types: impl IntoIterator<Item = SelectorType>) -> Vec<SelectorType> {
    let mut order = Vec::new();
    for family in types {
        if !order.contains(&family) {
            order.push(family);
        }
    }
    order
}

fn default_selector_types() -> Vec<SelectorType> {
    vec![
        SelectorType::Id,
        SelectorType::Class,
        SelectorType::Tag,
        SelectorType::NthChild,
    ]
}

fn default_attributes_to_ignore() -> Vec<String> {
    Vec::from(["id", "class", "length"].map(String::from))
}

/// Options as written in a config file.
///
/// Every field is optional and falls back to the [`Options`] default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    /// Family names, e.g. `["ID", "Class", "Tag", "NthChild"]`.
    #[serde(default = "default_selector_type_names")]
    pub selector_types: Vec<String>,

    /// Attribute names to leave out of `[name="value"]` fragments.
    #[serde(default = "default_attributes_to_ignore")]
    pub attributes_to_ignore: Vec<String>,

    /// Regular expression for ids and class names to avoid.
    #[serde(default)]
    pub exclude_regex: Option<String>,
}

fn default_selector_type_names() -> Vec<String> {
    default_selector_types()
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            selector_types: default_selector_type_names(),
            attributes_to_ignore: default_attributes_to_ignore(),
            exclude_regex: None,
        }
    }
}

impl OptionsConfig {
    /// `~/.config/pinpoint/config.toml`, if a home directory is known.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pinpoint");
            path.push("config.toml");
            path
        })
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Toml`] for invalid TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, Error> {
        Ok(toml::from_str(contents)?)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Toml`]
    /// if it does not parse.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Validate into [`Options`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSelectorType`] for a family name that is not
    /// recognised, or [`Error::InvalidExclude`] if the pattern does not compile.
    pub fn into_options(self) -> Result<Options, Error> {
        let selector_types = self
            .selector_types
            .iter()
            .map(|name| {
                SelectorType::from_str(name.trim())
                    .map_err(|_| Error::UnknownSelectorType(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude = self
            .exclude_regex
            .map(|pattern| {
                Regex::new(&pattern).map_err(|source| Error::InvalidExclude { pattern, source })
            })
            .transpose()?;

        Ok(Options {
            selector_types: dedup_types(selector_types),
            attributes_to_ignore: self.attributes_to_ignore,
            exclude,
        })
    }
}
