//! Error types for keyset-paginate
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::CursorKind;
use thiserror::Error;

/// The main error type for keyset-paginate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Argument Errors
    // ============================================================================
    /// A request or builder argument is invalid
    #[error("{message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// A config field holds an unusable value
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Offending field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// Config YAML didn't parse
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Config or request JSON didn't parse
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Cursor Errors
    // ============================================================================
    /// Token isn't valid URL-safe base64
    #[error("illegal base64 data at input byte {offset}")]
    Base64 {
        /// Position of the first bad byte, or the token length
        offset: usize,
    },

    /// Token bytes aren't a BSON document
    #[error("invalid cursor document: {message}")]
    CursorDocument {
        /// Error message
        message: String,
    },

    /// Token holds the wrong number of values for the request
    #[error("{message}")]
    MalformedCursor {
        /// Error message
        message: String,
    },

    /// A next or previous token failed to parse
    #[error("{kind} cursor parse failed: {source}")]
    CursorParse {
        /// Which token failed
        kind: CursorKind,
        /// Underlying cursor error
        source: Box<Error>,
    },

    /// Cursor values couldn't be serialized
    #[error("failed to encode cursor using {data}: {message}")]
    Encode {
        /// Cursor data being encoded
        data: String,
        /// Serializer message
        message: String,
    },

    /// An edge record lacks the sort or identifier field
    #[error("the specified result has no field declared as '{field}'")]
    MissingField {
        /// External field name
        field: String,
    },

    // ============================================================================
    // Query Errors
    // ============================================================================
    /// Range filter got the wrong number of cursor values
    #[error("wrong number of cursor field values specified")]
    Arity {
        /// Values the filter needs
        expected: usize,
        /// Values supplied
        actual: usize,
    },

    /// Filter uses an operator the in-memory store can't evaluate
    #[error("Unsupported query operator: {operator}")]
    UnsupportedOperator {
        /// Operator name, including the `$`
        operator: String,
    },

    /// `$regex` pattern doesn't compile
    #[error("Invalid regular expression '{pattern}': {message}")]
    Regex {
        /// Pattern as given
        pattern: String,
        /// Compiler message
        message: String,
    },

    // ============================================================================
    // Store Errors
    // ============================================================================
    /// A fetch or count collaborator failed
    #[error("Store error: {message}")]
    Store {
        /// Error message
        message: String,
    },

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Error with added context
    #[error("{0}")]
    Other(String),

    /// Error from a collaborator built on `anyhow`
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_config_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a malformed cursor error
    pub fn malformed_cursor(message: impl Into<String>) -> Self {
        Self::MalformedCursor {
            message: message.into(),
        }
    }

    /// Create a cursor document error
    pub fn cursor_document(message: impl Into<String>) -> Self {
        Self::CursorDocument {
            message: message.into(),
        }
    }

    /// Wrap a cursor failure with the cursor it came from
    pub fn cursor_parse(kind: CursorKind, source: Error) -> Self {
        Self::CursorParse {
            kind,
            source: Box::new(source),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an unsupported operator error
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Check if this error means the cursor token is corrupt or was issued
    /// for a different sort configuration
    pub fn is_cursor_error(&self) -> bool {
        match self {
            Error::Base64 { .. }
            | Error::CursorDocument { .. }
            | Error::MalformedCursor { .. }
            | Error::CursorParse { .. }
            | Error::Arity { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for keyset-paginate
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
