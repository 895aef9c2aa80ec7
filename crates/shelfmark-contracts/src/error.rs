//! Error types for the shelfmark dispatcher.
//!
//! Per-item denials are never errors; they are recorded in the
//! `DispatchOutcome`. Only failures that abort a whole invocation show up
//! here.

use thiserror::Error;

/// The unified error type for shelfmark crates.
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    /// No action with this name is registered.
    #[error("unknown bulk action '{name}'")]
    UnknownAction { name: String },

    /// The action is registered but has no bulk mutation behind it.
    #[error("bulk action '{name}' cannot be dispatched")]
    UnsupportedAction { name: String },

    /// The caller's action parameters were rejected before any check ran.
    #[error("invalid parameters for '{action}': {reason}")]
    InvalidParams { action: String, reason: String },

    /// The selection or an item/collection lookup failed upstream.
    #[error("resolver failed: {reason}")]
    ResolverFailed { reason: String },

    /// The bulk mutation itself failed. Fatal for the whole invocation.
    #[error("bulk mutation for '{action}' failed: {reason}")]
    MutationFailed { action: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the shelfmark crates.
pub type ShelfmarkResult<T> = Result<T, ShelfmarkError>;
