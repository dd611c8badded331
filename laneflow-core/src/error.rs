// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the laneflow operators
//!
//! Three kinds of failure reach a consumer of a laneflow stream:
//!
//! - **invocation failures**: a mapping function or predicate returned `Err`
//!   (wrapped in [`LaneflowError::UserError`]);
//! - **source failures**: the upstream sequence failed
//!   ([`LaneflowError::SourceError`]);
//! - **misuse**: an operator was configured with an invalid argument
//!   ([`LaneflowError::InvalidConcurrency`]), reported before any work starts.
//!
//! # Examples
//!
//! ```
//! use laneflow_core::{LaneflowError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(LaneflowError::source_error("connection reset"))
//! }
//!
//! assert!(load().unwrap_err().is_permanent());
//! ```

/// Root error type for all laneflow operations
#[derive(Debug, thiserror::Error)]
pub enum LaneflowError {
    /// Stream processing encountered an error
    ///
    /// General error for stream operations that don't fit the other categories.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong during stream processing
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors returned by mapping functions and predicates.
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The upstream sequence failed
    #[error("Source error: {context}")]
    SourceError {
        /// Description of the upstream failure
        context: String,
    },

    /// A value was pushed into a push source after it ended
    #[error("Source closed: cannot push after end")]
    SourceClosed,

    /// A concurrency limit that is neither positive nor unbounded
    #[error("Invalid concurrency limit: {limit} (must be positive or unbounded)")]
    InvalidConcurrency {
        /// The rejected limit
        limit: usize,
    },
}

impl LaneflowError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Create a source error with the given context
    pub fn source_error(context: impl Into<String>) -> Self {
        Self::SourceError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Create an invalid concurrency error for the rejected limit
    #[must_use]
    pub const fn invalid_concurrency(limit: usize) -> Self {
        Self::InvalidConcurrency { limit }
    }

    /// Check if this is a recoverable error
    ///
    /// Pushing into a closed source is the only failure that leaves the
    /// pipeline itself intact.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SourceClosed)
    }

    /// Check if this error indicates a permanent failure
    ///
    /// Every error delivered through a stream terminates it.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::StreamProcessingError { .. } | Self::UserError(_) | Self::SourceError { .. }
        )
    }
}

/// Specialized Result type for laneflow operations
///
/// # Examples
///
/// ```
/// use laneflow_core::Result;
///
/// fn process() -> Result<String> {
///     Ok("processed".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, LaneflowError>;

/// Extension trait for converting errors into `LaneflowError`
///
/// Implemented for every `std::error::Error + Send + Sync + 'static`.
pub trait IntoLaneflowError {
    /// Convert this error into a `LaneflowError` with additional context
    fn into_laneflow_error(self, context: &str) -> LaneflowError;

    /// Convert this error into a `LaneflowError` without additional context
    fn into_laneflow(self) -> LaneflowError
    where
        Self: Sized,
    {
        self.into_laneflow_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoLaneflowError for E {
    fn into_laneflow_error(self, context: &str) -> LaneflowError {
        if context.is_empty() {
            LaneflowError::user_error(self)
        } else {
            LaneflowError::StreamProcessingError {
                context: format!("{context}: {self}"),
            }
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(LaneflowError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(LaneflowError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LaneflowError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.with_context(|| context.into())
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| match e.into() {
            LaneflowError::UserError(inner) => LaneflowError::StreamProcessingError {
                context: format!("{}: {inner}", f()),
            },
            other => other,
        })
    }
}

impl Clone for LaneflowError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // The boxed user error can't be cloned, keep its rendering
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::SourceError { context } => Self::SourceError {
                context: context.clone(),
            },
            Self::SourceClosed => Self::SourceClosed,
            Self::InvalidConcurrency { limit } => Self::InvalidConcurrency { limit: *limit },
        }
    }
}
