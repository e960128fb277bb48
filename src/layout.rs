//! Memory layout of user records and what a linear scan costs.
//!
//! The aggregation reads two fields per user, but the CPU fetches whole
//! cache lines. With [`InlineUser`] every record spans ~257 lines of 64
//! bytes, so walking 10,000 users drags ~160 MiB through the cache to read
//! a few hundred KiB of useful data. [`HeapUser`] keeps the icon behind a
//! pointer and packs several records per line.
//!
//! ```text
//!   InlineUser (one record)                        HeapUser (several per line)
//!   ┌──────────────────── 64 B ───────────────┐     ┌──────────────── 64 B ──────────────┐
//!   │ login │ icon[0..]                       │     │ user 0 .......... │ user 1 ...     │
//!   │ icon[...]                               │     └────────────────────────────────────┘
//!   │ ... 256 more lines ...                  │
//!   │ icon[..16384] │ active │ country        │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! The cache line size is taken from [`crossbeam_utils::CachePadded`], which
//! aligns to the line size of the target architecture.

use std::mem::{align_of, size_of};

use crossbeam_utils::CachePadded;

use crate::image::LayoutKind;
use crate::user::{HeapUser, InlineUser};

/// Returns the cache line size assumed for the target, in bytes.
#[inline]
pub fn cache_line_size() -> usize {
    align_of::<CachePadded<u8>>()
}

/// Number of cache lines needed to hold `bytes` contiguous bytes
/// (starting at a line boundary).
#[inline]
pub fn cache_lines(bytes: usize) -> usize {
    bytes.div_ceil(cache_line_size())
}

/// Size and alignment of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeLayout {
    /// Type name, as reported by [`std::any::type_name`] or a custom label.
    pub name: String,
    /// `size_of::<T>()`.
    pub size: usize,
    /// `align_of::<T>()`.
    pub align: usize,
    /// Cache lines spanned by one value.
    pub cache_lines: usize,
}

impl TypeLayout {
    /// Measures `T`.
    pub fn of<T>() -> Self {
        Self::named::<T>(std::any::type_name::<T>())
    }

    /// Measures `T` under a custom label.
    pub fn named<T>(name: impl Into<String>) -> Self {
        let size = size_of::<T>();
        Self {
            name: name.into(),
            size,
            align: align_of::<T>(),
            cache_lines: cache_lines(size),
        }
    }
}

/// Memory streamed by one linear pass over a slice of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanFootprint {
    /// Number of records scanned.
    pub records: usize,
    /// Bytes occupied by the records themselves.
    pub bytes: usize,
    /// Cache lines touched by the pass.
    pub cache_lines: usize,
}

impl ScanFootprint {
    /// Footprint of scanning `records` contiguous values of `T`.
    ///
    /// Heap data owned by the records is not included: the aggregation never
    /// follows the icon pointer.
    pub fn of<T>(records: usize) -> Self {
        let bytes = size_of::<T>().saturating_mul(records);
        Self {
            records,
            bytes,
            cache_lines: cache_lines(bytes),
        }
    }
}

/// One user layout in a [`LayoutReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutEntry {
    /// Representation of the icon.
    pub kind: LayoutKind,
    /// Layout of the user record.
    pub layout: TypeLayout,
    /// Cost of scanning the configured number of records, if any.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub scan: Option<ScanFootprint>,
}

/// Side-by-side layout of [`InlineUser`] and [`HeapUser`].
///
/// # Examples
///
/// ```rust
/// use cachelayout::layout::LayoutReport;
/// use cachelayout::image::LayoutKind;
///
/// let report = LayoutReport::for_records(10_000);
/// let inline = report.get(LayoutKind::Inline).unwrap();
/// let heap = report.get(LayoutKind::Indirect).unwrap();
///
/// assert!(inline.layout.size > 100 * heap.layout.size);
/// assert!(report.scan_ratio().unwrap() > 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutReport {
    /// Cache line size used for the computation.
    pub cache_line: usize,
    /// One entry per layout, inline first.
    pub entries: Vec<LayoutEntry>,
}

impl LayoutReport {
    /// Compares the two record layouts without scan figures.
    pub fn compare() -> Self {
        Self {
            cache_line: cache_line_size(),
            entries: vec![
                LayoutEntry {
                    kind: LayoutKind::Inline,
                    layout: TypeLayout::named::<InlineUser>("InlineUser"),
                    scan: None,
                },
                LayoutEntry {
                    kind: LayoutKind::Indirect,
                    layout: TypeLayout::named::<HeapUser>("HeapUser"),
                    scan: None,
                },
            ],
        }
    }

    /// Compares the two record layouts, including the cost of scanning
    /// `records` users of each.
    pub fn for_records(records: usize) -> Self {
        let mut report = Self::compare();
        for entry in &mut report.entries {
            entry.scan = Some(match entry.kind {
                LayoutKind::Inline => ScanFootprint::of::<InlineUser>(records),
                LayoutKind::Indirect => ScanFootprint::of::<HeapUser>(records),
            });
        }
        report
    }

    /// Returns the entry for `kind`.
    pub fn get(&self, kind: LayoutKind) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Ratio of cache lines touched by the inline scan over the heap scan.
    ///
    /// `None` without scan figures or when the heap scan touches nothing.
    pub fn scan_ratio(&self) -> Option<f64> {
        let inline = self.get(LayoutKind::Inline)?.scan?;
        let heap = self.get(LayoutKind::Indirect)?.scan?;
        if heap.cache_lines == 0 {
            return None;
        }
        Some(inline.cache_lines as f64 / heap.cache_lines as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::IMAGE_SIZE;

    #[test]
    fn test_cache_line_size() {
        let line = cache_line_size();
        assert!(line.is_power_of_two());
        assert!(line >= 32);
    }

    #[test]
    fn test_cache_lines() {
        let line = cache_line_size();
        assert_eq!(cache_lines(0), 0);
        assert_eq!(cache_lines(1), 1);
        assert_eq!(cache_lines(line), 1);
        assert_eq!(cache_lines(line + 1), 2);
    }

    #[test]
    fn test_type_layout() {
        let layout = TypeLayout::of::<u64>();
        assert_eq!(layout.size, 8);
        assert_eq!(layout.align, align_of::<u64>());
        assert_eq!(layout.cache_lines, 1);
        assert!(layout.name.contains("u64"));
    }

    #[test]
    fn test_inline_user_spans_many_lines() {
        let layout = TypeLayout::of::<InlineUser>();
        assert!(layout.size > IMAGE_SIZE);
        assert!(layout.cache_lines > IMAGE_SIZE / cache_line_size());
    }

    #[test]
    fn test_scan_footprint() {
        let scan = ScanFootprint::of::<HeapUser>(100);
        assert_eq!(scan.records, 100);
        assert_eq!(scan.bytes, 100 * size_of::<HeapUser>());
        assert_eq!(scan.cache_lines, cache_lines(scan.bytes));

        let empty = ScanFootprint::of::<InlineUser>(0);
        assert_eq!(empty.bytes, 0);
        assert_eq!(empty.cache_lines, 0);
    }

    #[test]
    fn test_compare_has_no_scan() {
        let report = LayoutReport::compare();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].kind, LayoutKind::Inline);
        assert_eq!(report.entries[0].layout.name, "InlineUser");
        assert!(report.entries.iter().all(|e| e.scan.is_none()));
        assert_eq!(report.scan_ratio(), None);
    }

    #[test]
    fn test_for_records() {
        let report = LayoutReport::for_records(10_000);
        let inline = report.get(LayoutKind::Inline).unwrap().scan.unwrap();
        let heap = report.get(LayoutKind::Indirect).unwrap().scan.unwrap();
        assert!(inline.bytes >= 10_000 * IMAGE_SIZE);
        assert!(heap.bytes < 10_000 * 128);
        assert!(report.scan_ratio().unwrap() > 100.0);
    }

    #[test]
    fn test_scan_ratio_zero_records() {
        assert_eq!(LayoutReport::for_records(0).scan_ratio(), None);
    }
}
