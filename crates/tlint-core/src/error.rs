//! Error types for the tlint core.

use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by the core.
///
/// Classification and codemods never fail; these cover setup (bad globs,
/// bad configuration), the convenience parser, and failures raised by check
/// callbacks, which are passed through untouched.
#[derive(Error, Debug, Diagnostic)]
pub enum LintError {
    /// A path glob could not be compiled
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    #[diagnostic(code(tlint::core::invalid_glob))]
    InvalidGlob { pattern: String, reason: String },

    /// Configuration was rejected
    #[error(transparent)]
    #[diagnostic(code(tlint::core::config))]
    Config(#[from] tlint_config::ConfigError),

    /// Source text could not be parsed
    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(code(tlint::core::parse_failed))]
    ParseFailed { path: String, reason: String },

    /// A check callback failed
    #[error("Check '{check}' failed: {message}")]
    #[diagnostic(code(tlint::core::check_failed))]
    CheckFailed { check: String, message: String },
}

impl LintError {
    /// Create an InvalidGlob error
    pub fn invalid_glob(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGlob {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create a CheckFailed error
    pub fn check_failed(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckFailed {
            check: check.into(),
            message: message.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, LintError>;
