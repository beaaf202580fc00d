// ABOUTME: Error types for BEM collection building and bulk state operations.
// ABOUTME: Provides the BemError enum and the crate-wide Result alias.

use thiserror::Error;

/// Errors raised by construction-time checks and invalid bulk requests.
///
/// Name resolution never fails with an error; it returns `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BemError {
    /// A node collection was built with `must_include` keys that were not found.
    #[error("not all required elements were found in the DOM: missing {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    /// Global traversal was requested with neither a target nor a block name.
    #[error("global traversal requires a target or an explicit block name")]
    GlobalWithoutIdentity,

    /// A bulk operation received an argument combination that does nothing.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A selector string could not be compiled.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

impl BemError {
    /// Creates an InvalidArgument error with a custom message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        BemError::InvalidArgument(msg.into())
    }

    /// Returns true if this is a MissingKeys error.
    pub fn is_missing_keys(&self) -> bool {
        matches!(self, BemError::MissingKeys(_))
    }

    /// Returns true if this is an InvalidArgument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BemError::InvalidArgument(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BemError>;
