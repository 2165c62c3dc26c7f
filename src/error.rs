//! Unified error handling for the hashpulse crate
//!
//! The analytics functions themselves never fail: short windows and zero
//! denominators resolve to defined fallback values. Errors only arise at the
//! edges, when a stored hashtag cannot be found, input is rejected, or the store and
//! serialization layers fail.
//!
//! # Architecture
//!
//! - [`HashpulseErrorTrait`] - Common interface for classifying errors
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum
//!
//! # Usage
//!
//! ```rust,ignore
//! use hashpulse::error::{Error, ErrorCategory, HashpulseErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     match err.category() {
//!         ErrorCategory::NotFound => println!("no such hashtag"),
//!         _ if err.is_recoverable() => println!("retrying: {err}"),
//!         _ => eprintln!("fatal: {err}"),
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

use crate::models::Platform;

/// Common trait for hashpulse error types
pub trait HashpulseErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Requested hashtag does not exist
    NotFound,
    /// Caller supplied bad input
    Validation,
    /// Storage and I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Short description for log lines and API messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::Validation => "invalid input",
            Self::Storage => "storage error",
            Self::Other => "other error",
        }
    }
}

/// Unified error type for the hashpulse crate
#[derive(Error, Debug)]
pub enum Error {
    /// No stored hashtag matches the lookup
    #[error("Hashtag not found: #{hashtag}{}", platform.map(|p| format!(" on {p}")).unwrap_or_default())]
    NotFound {
        hashtag: String,
        platform: Option<Platform>,
    },

    /// Caller-supplied value rejected before reaching the store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// A store lock was poisoned by a panicking writer
    #[error("Lock poisoned: {0}")]
    LockPoisoned(&'static str),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl HashpulseErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::NotFound { .. } => false,
            Self::InvalidInput(_) => false,
            Self::Database(e) => matches!(
                e.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            Self::LockPoisoned(_) => false,
            Self::Io(_) => true, // I/O errors are often transient
            Self::Json(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidInput(_) | Self::Json(_) => ErrorCategory::Validation,
            Self::Database(_) | Self::LockPoisoned(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a not-found error for a hashtag lookup
    pub fn not_found(hashtag: impl Into<String>, platform: Option<Platform>) -> Self {
        Self::NotFound {
            hashtag: hashtag.into(),
            platform,
        }
    }

    /// Create an invalid input error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Conversion from rusqlite::Error
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
