//! Unified error types for connectivity-planner.
//!
//! Scoring, distance and classification are infallible and clamp-protected.
//! Errors only arise at the edges: decoding records, loading configuration,
//! and clustering over feature matrices that contain non-finite values.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for connectivity-planner operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlannerError {
    /// Errors during clustering
    #[error("Clustering failed: {context}")]
    Clustering {
        context: String,
        #[source]
        source: ClusterErrorKind,
    },

    /// Errors during forecasting
    #[error("Forecast failed: {context}")]
    Forecast {
        context: String,
        #[source]
        source: ForecastErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Record decoding errors
    #[error("Failed to decode records: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific clustering error kinds
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ClusterErrorKind {
    #[error("Non-finite feature value at row {row}, column {column}")]
    NonFiniteFeature { row: usize, column: usize },

    #[error("Feature extractor produced no columns")]
    EmptyFeatureSet,

    #[error("Row {row} has {found} features, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Specific forecast error kinds
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ForecastErrorKind {
    #[error("Refinement target unavailable: {0}")]
    RefinementUnavailable(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for connectivity-planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl PlannerError {
    /// Create a clustering error with context
    pub fn clustering(context: impl Into<String>, source: ClusterErrorKind) -> Self {
        Self::Clustering {
            context: context.into(),
            source,
        }
    }

    /// Create a forecast error with context
    pub fn forecast(context: impl Into<String>, source: ForecastErrorKind) -> Self {
        Self::Forecast {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// ```ignore
/// use connectivity_planner::error::ErrorContext;
///
/// let zones = clusterer
///     .expansion_zones(&points)
///     .context("building expansion zones")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error, prepended to any existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<PlannerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: PlannerError, new_ctx: &str) -> PlannerError {
    match err {
        PlannerError::Clustering {
            context: existing,
            source,
        } => PlannerError::Clustering {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PlannerError::Forecast {
            context: existing,
            source,
        } => PlannerError::Forecast {
            context: chain_context(new_ctx, &existing),
            source,
        },
        PlannerError::Io {
            path,
            message,
            source,
        } => PlannerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        PlannerError::Parse(msg) => PlannerError::Parse(chain_context(new_ctx, &msg)),
        PlannerError::Config(msg) => PlannerError::Config(chain_context(new_ctx, &msg)),
        PlannerError::Validation(msg) => PlannerError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns "`new`: `existing`", or just `new` when nothing existed yet.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| PlannerError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| PlannerError::Validation(f().into()))
    }
}
