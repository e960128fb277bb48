//! Image buffer representations.
//!
//! Every [`User`](crate::user::User) carries a 128×128 byte icon. Where those
//! 16 KiB live decides how much memory a linear scan over users has to pull
//! through the cache, so the representation is a type parameter:
//!
//! | Type | Storage | `size_of` on 64-bit |
//! |------|---------|---------------------|
//! | [`InlineImage`] | `[u8; 16384]` inside the record | 16,384 bytes |
//! | [`HeapImage`] | `Vec<u8>` handle to a separate allocation | 24 bytes |
//!
//! ```text
//!   InlineUser                                 HeapUser
//!   ┌───────┬────────────────────────┬──┬──┐   ┌───────┬────────┬──┬──┐
//!   │ login │ icon (16 KiB inline)   │ac│co│   │ login │ ptr/len│ac│co│
//!   └───────┴────────────────────────┴──┴──┘   └───────┴───┬────┴──┴──┘
//!                                                          ▼
//!                                                 [16 KiB heap block]
//! ```

use bytemuck::{Pod, Zeroable};
use std::fmt::{self, Debug};

/// Width and height of an icon, in pixels (one byte per pixel).
pub const IMAGE_SIDE: usize = 128;

/// Number of bytes in a populated icon.
pub const IMAGE_SIZE: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Which representation an [`Image`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LayoutKind {
    /// Bytes stored directly in the record.
    Inline,
    /// Bytes stored in a separate heap allocation.
    Indirect,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Inline => f.write_str("inline"),
            LayoutKind::Indirect => f.write_str("indirect"),
        }
    }
}

/// An icon buffer, in one of the two supported layouts.
///
/// The aggregation never looks at the icon: implementors only differ in how
/// many bytes they contribute to `size_of::<User<Self>>()`.
pub trait Image: Debug + Clone {
    /// The representation implemented by this type.
    const KIND: LayoutKind;

    /// Returns the cheapest valid image for this layout.
    ///
    /// Inline images are always fully present (zeroed); heap images start
    /// unallocated.
    fn blank() -> Self;

    /// Returns a fully populated image with every byte set to `byte`.
    fn filled(byte: u8) -> Self;

    /// Returns the image contents; empty when nothing is allocated.
    fn as_bytes(&self) -> &[u8];

    /// Returns `true` when the image owns its [`IMAGE_SIZE`] bytes.
    fn is_allocated(&self) -> bool {
        !self.as_bytes().is_empty()
    }
}

/// A 16 KiB icon stored inline.
#[derive(Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct InlineImage([u8; IMAGE_SIZE]);

impl InlineImage {
    /// Wraps raw pixel data.
    pub const fn from_pixels(pixels: [u8; IMAGE_SIZE]) -> Self {
        Self(pixels)
    }
}

impl Default for InlineImage {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InlineImage[{} bytes]", IMAGE_SIZE)
    }
}

impl Image for InlineImage {
    const KIND: LayoutKind = LayoutKind::Inline;

    fn blank() -> Self {
        Self::zeroed()
    }

    fn filled(byte: u8) -> Self {
        Self([byte; IMAGE_SIZE])
    }

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// An icon stored behind a heap handle.
///
/// The length is not checked: any `Vec<u8>` is accepted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HeapImage(Vec<u8>);

impl HeapImage {
    /// Returns the number of bytes currently held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for HeapImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Debug for HeapImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapImage[{} bytes]", self.0.len())
    }
}

impl Image for HeapImage {
    const KIND: LayoutKind = LayoutKind::Indirect;

    fn blank() -> Self {
        Self(Vec::new())
    }

    fn filled(byte: u8) -> Self {
        Self(vec![byte; IMAGE_SIZE])
    }

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
