use thiserror::Error;

/// Failure of the strict version grammar
///
/// Every variant carries the original input so callers can report or fall
/// back on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Cannot parse version: {input}")]
    Unparsable { input: String },

    #[error("Invalid prerelease '{prerelease}' in version: {input}")]
    InvalidPrerelease { input: String, prerelease: String },

    #[error("Invalid revision '{revision}' in version: {input}")]
    InvalidRevision { input: String, revision: String },

    #[error("Version component '{component}' out of range: {input}")]
    OutOfRange { input: String, component: String },
}

impl VersionError {
    /// The offending input string
    pub fn input(&self) -> &str {
        match self {
            VersionError::Unparsable { input }
            | VersionError::InvalidPrerelease { input, .. }
            | VersionError::InvalidRevision { input, .. }
            | VersionError::OutOfRange { input, .. } => input,
        }
    }
}

/// Failure to build a parser from grammar options
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Invalid grammar: {0}")]
    Regex(#[from] regex::Error),
}
