//! Result and error types for testgen.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for testgen operations
pub type TestgenResult<T> = Result<T, TestgenError>;

/// Errors that can occur while classifying features or generating code
#[derive(Debug, Error)]
pub enum TestgenError {
    /// Input file does not exist
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },

    /// Input file name lacks the expected suffix
    #[error("Unsupported input {}: expected a *{expected} file", path.display())]
    UnsupportedInput {
        /// Offending path
        path: PathBuf,
        /// Required file-name suffix
        expected: &'static str,
    },

    /// Feature source could not be parsed as Gherkin
    #[error("Malformed feature {}: {message}", path.display())]
    MalformedFeature {
        /// Feature file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Two scenarios in one feature share a name
    #[error("Duplicate scenario '{scenario}' in {}", path.display())]
    DuplicateScenario {
        /// Feature file
        path: PathBuf,
        /// Repeated scenario name
        scenario: String,
    },

    /// Persisted StepMap is not valid JSON of the expected shape
    #[error("Malformed step map {}: {source}", path.display())]
    MalformedStepMap {
        /// StepMap file
        path: PathBuf,
        /// Decoder error
        #[source]
        source: serde_json::Error,
    },

    /// Selector configuration file is invalid
    #[error("Invalid selector configuration {}: {message}", path.display())]
    InvalidConfig {
        /// Configuration file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Generated output could not be assembled
    #[error("Code generation failed: {0}")]
    CodeGen(#[from] testgen_js_gen::JsGenError),

    /// File watcher error
    #[error("Watch error: {message}")]
    Watch {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
