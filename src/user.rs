//! The user record, generic over its icon layout.

use crate::image::{HeapImage, Image, InlineImage};

/// Read access to the two fields the aggregation depends on.
///
/// [`country_count`](crate::count::country_count) only sees records through
/// this trait, so its result cannot depend on anything else a record carries.
pub trait Activity {
    /// Returns `true` if the record counts towards its country.
    fn is_active(&self) -> bool;

    /// Returns the country label of the record.
    fn country(&self) -> &str;
}

/// One user: a login, an icon, an activity flag and a country code.
///
/// The icon layout is chosen by `I`. See [`InlineUser`] and [`HeapUser`].
///
/// # Examples
///
/// ```rust
/// use cachelayout::image::Image;
/// use cachelayout::user::{Activity, HeapUser};
///
/// let user = HeapUser::new("joe", "CA").with_active(true);
/// assert!(user.is_active());
/// assert_eq!(user.country(), "CA");
/// assert!(user.icon().as_bytes().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct User<I: Image> {
    /// Login name; never read by the aggregation.
    pub login: String,
    /// The 128×128 icon, inline or behind a heap handle.
    pub icon: I,
    /// Whether the user counts towards its country.
    pub active: bool,
    /// Country label, any string including the empty one.
    pub country: String,
}

/// A user whose icon is stored inline (~16 KiB per record).
pub type InlineUser = User<InlineImage>;

/// A user whose icon lives in a separate allocation (a few dozen bytes per record).
pub type HeapUser = User<HeapImage>;

impl<I: Image> User<I> {
    /// Creates an inactive user with a blank icon.
    pub fn new(login: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            icon: I::blank(),
            active: false,
            country: country.into(),
        }
    }

    /// Sets the activity flag, returning `self` for method chaining.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Replaces the icon, returning `self` for method chaining.
    pub fn with_icon(mut self, icon: I) -> Self {
        self.icon = icon;
        self
    }

    /// Returns the login.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Returns the icon.
    pub fn icon(&self) -> &I {
        &self.icon
    }

    /// Converts the user to another icon layout.
    ///
    /// Pixel data is not carried over: the new icon is blank if the old one
    /// was unallocated and zero-filled otherwise.
    pub fn into_layout<J: Image>(self) -> User<J> {
        let icon = if self.icon.is_allocated() {
            J::filled(0)
        } else {
            J::blank()
        };
        User {
            login: self.login,
            icon,
            active: self.active,
            country: self.country,
        }
    }
}

impl<I: Image> Activity for User<I> {
    #[inline]
    fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    fn country(&self) -> &str {
        &self.country
    }
}

impl<T: Activity + ?Sized> Activity for &T {
    #[inline]
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    #[inline]
    fn country(&self) -> &str {
        (**self).country()
    }
}
