//! Synthetic user populations.
//!
//! Builds the fixture used throughout the crate's benchmarks: `size` users
//! cycling through a fixed list of countries, with every `inactive_every`-th
//! user (starting at index 0) marked inactive.
//!
//! # Examples
//!
//! ```rust
//! use cachelayout::count::country_count;
//! use cachelayout::generator::{generate, expected_counts, GeneratorConfig};
//! use cachelayout::user::HeapUser;
//!
//! let config = GeneratorConfig::default();
//! let users: Vec<HeapUser> = generate(&config).unwrap();
//!
//! assert_eq!(users.len(), 10_000);
//! assert_eq!(country_count(&users), expected_counts(&config).unwrap());
//! ```

use log::debug;

use crate::count::CountMap;
use crate::error::{LayoutError, Result};
use crate::image::Image;
use crate::user::User;

/// Byte used to populate icons when [`GeneratorConfig::with_icons`] is set.
const ICON_FILL: u8 = 0x7f;

/// Configuration for [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Number of users to create.
    pub size: usize,
    /// Countries assigned round-robin by index.
    pub countries: Vec<String>,
    /// User `i` is inactive when `i % inactive_every == 0`; 0 keeps everyone active.
    pub inactive_every: usize,
    /// Allocate and fill every icon instead of leaving it blank.
    pub with_icons: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 10_000,
            countries: ["AD", "BB", "CA", "DK"].map(String::from).to_vec(),
            inactive_every: 5,
            with_icons: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of users.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Replaces the country list.
    pub fn with_countries<S: Into<String>>(
        mut self,
        countries: impl IntoIterator<Item = S>,
    ) -> Self {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inactive period.
    pub fn with_inactive_every(mut self, every: usize) -> Self {
        self.inactive_every = every;
        self
    }

    /// Enables or disables icon allocation.
    pub fn with_icons(mut self, enabled: bool) -> Self {
        self.with_icons = enabled;
        self
    }

    /// Checks that the configuration can produce `size` users.
    pub fn validate(&self) -> Result<()> {
        if self.size > 0 && self.countries.is_empty() {
            return Err(LayoutError::NoCountries { size: self.size });
        }
        Ok(())
    }

    #[inline]
    fn is_active(&self, index: usize) -> bool {
        self.inactive_every == 0 || index % self.inactive_every > 0
    }
}

/// Builds `config.size` users with icons of layout `I`.
///
/// # Errors
///
/// Returns [`LayoutError::NoCountries`] if users are requested with an empty
/// country list.
pub fn generate<I: Image>(config: &GeneratorConfig) -> Result<Vec<User<I>>> {
    config.validate()?;
    debug!(
        "generating {} {} users over {} countries (icons: {})",
        config.size,
        I::KIND,
        config.countries.len(),
        config.with_icons
    );

    let users = (0..config.size)
        .map(|i| {
            let country = &config.countries[i % config.countries.len()];
            let user =
                User::new(format!("user{}", i), country.as_str()).with_active(config.is_active(i));
            if config.with_icons {
                user.with_icon(I::filled(ICON_FILL))
            } else {
                user
            }
        })
        .collect();
    Ok(users)
}

/// Computes what [`country_count`](crate::count::country_count) returns for
/// the population described by `config`, without building it.
pub fn expected_counts(config: &GeneratorConfig) -> Result<CountMap> {
    config.validate()?;
    let n = config.countries.len();
    Ok((0..config.size)
        .filter(|&i| config.is_active(i))
        .map(|i| (config.countries[i % n].as_str(), 1u64))
        .collect())
}
