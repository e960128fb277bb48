//! Observer implementations for reporting aggregation results.
//!
//! - [`table`] - Pretty-print counts and layouts as tables using the `tabled` crate
//! - [`json`] - Serialize counts and layouts to JSON
//!
//! # Unified Error Handling
//!
//! All observers use a unified [`ObserverError`] type, allowing you to switch
//! between observers without changing error handling code.
//!
//! # Feature Flags
//!
//! - `table` - Enables the [`table`] module
//! - `json` - Enables the [`json`] module
//! - `full` - Enables all observer modules
//!
//! # Example
//!
//! ```rust,ignore
//! use cachelayout::count::CountMap;
//! use cachelayout::observers::Result;
//!
//! fn export(counts: &CountMap) -> Result<()> {
//!     #[cfg(feature = "table")]
//!     {
//!         use cachelayout::observers::table::TableObserver;
//!         TableObserver::new().write_to(counts, std::io::stdout())?;
//!     }
//!
//!     #[cfg(feature = "json")]
//!     {
//!         use cachelayout::observers::json::JsonObserver;
//!         JsonObserver::new().pretty(true).write_to(counts, std::io::stdout())?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod error;

pub use error::{ObserverError, Result};

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;
