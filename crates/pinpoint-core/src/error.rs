//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Why a set of options was rejected.
///
/// The search itself never fails; these only arise when turning user input
/// into [`crate::Options`].
#[derive(Debug, Error)]
pub enum Error {
    /// A selector family name that is not one of `ID`, `Class`, `Tag`,
    /// `NthChild` or `Attributes`.
    #[error("unknown selector type {0:?} (expected one of ID, Class, Tag, NthChild, Attributes)")]
    UnknownSelectorType(String),

    /// The exclusion pattern does not compile.
    #[error("invalid exclude pattern {pattern:?}")]
    InvalidExclude {
        /// The pattern as written.
        pattern: String,
        /// The compiler's complaint.
        #[source]
        source: regex::Error,
    },

    /// A config file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML for [`crate::OptionsConfig`].
    #[error("malformed config")]
    Toml(#[from] toml::de::Error),
}
