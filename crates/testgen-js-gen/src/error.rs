//! Error types for `testgen-js-gen`.

use thiserror::Error;

/// Result type alias for js-gen operations.
pub type Result<T> = std::result::Result<T, JsGenError>;

/// Errors that can occur while assembling a JavaScript module.
///
/// Printing a well-formed HIR never fails; every error is raised while the
/// HIR is being built.
#[derive(Debug, Error)]
pub enum JsGenError {
    /// Invalid identifier name (reserved word, invalid characters, etc.)
    #[error("Invalid identifier '{name}': {reason}")]
    InvalidIdentifier {
        /// The invalid identifier
        name: String,
        /// Why it's invalid
        reason: String,
    },

    /// Two class members share a name
    #[error("Duplicate member '{member}' in class '{class}'")]
    DuplicateMember {
        /// Class being built
        class: String,
        /// Member declared twice
        member: String,
    },
}
