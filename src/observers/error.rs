//! Unified error type for all observers.
//!
//! # Example
//!
//! ```rust,ignore
//! use cachelayout::observers::{Result, ObserverError};
//!
//! fn export_counts() -> Result<()> {
//!     // Works with any observer - same error type!
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Unified error type for all observer operations.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// Error from the JSON observer.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing rendered output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for observer operations.
pub type Result<T> = std::result::Result<T, ObserverError>;
