//! Preference storage error types.

use thiserror::Error;

/// Errors that can occur while loading or saving preferences.
#[derive(Debug, Error)]
pub enum PrefError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("unsupported preferences schema version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Convenience alias for preference results.
pub type PrefResult<T> = Result<T, PrefError>;
