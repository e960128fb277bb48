//! Errors raised while preparing user data.
//!
//! The aggregation itself cannot fail; only building inputs can.

use thiserror::Error;

/// Error type for generator and configuration operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Users were requested but there is no country to assign them to.
    #[error("cannot generate {size} users without any country")]
    NoCountries {
        /// Number of users requested.
        size: usize,
    },
}

/// Result type for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
