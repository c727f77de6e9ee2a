//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]` where they need to surface it.

use thiserror::Error;

/// The top-level error type for `cb-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown behavioral state tag {0}")]
    UnknownState(u8),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `cb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
