//! Counting active users per country.
//!
//! [`country_count`] is the single aggregation this crate is built around:
//! one linear pass, skip inactive records, bump a hash map entry for the
//! rest. Its cost is dominated by how many bytes the pass has to stream
//! through the cache to read two fields per record, which is why the record
//! layout matters far more than the loop itself.

use std::collections::hash_map::{self, HashMap};

use log::trace;

use crate::user::Activity;

/// Number of active users per country.
///
/// Countries with no active user are never stored, so `len()` is the number
/// of distinct countries seen among active records. Iteration order is
/// unspecified; use [`CountMap::sorted`] for a stable listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap {
    counts: HashMap<String, u64>,
}

impl CountMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for `country`, or 0 if no active user has it.
    pub fn get(&self, country: &str) -> u64 {
        self.counts.get(country).copied().unwrap_or(0)
    }

    /// Returns `true` if at least one active user has `country`.
    pub fn contains(&self, country: &str) -> bool {
        self.counts.contains_key(country)
    }

    /// Returns the number of distinct countries.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no active user was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the total number of active users.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(country, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns the entries sorted by country.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    #[inline]
    fn increment(&mut self, country: &str) {
        // avoid allocating a key for countries already present
        match self.counts.get_mut(country) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(country.to_owned(), 1);
            }
        }
    }
}

impl FromIterator<(String, u64)> for CountMap {
    /// Builds a map from pairs, summing duplicates and dropping zero counts.
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut counts = HashMap::new();
        for (country, count) in iter {
            if count > 0 {
                *counts.entry(country).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}

impl<'a> FromIterator<(&'a str, u64)> for CountMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, u64)>>(iter: T) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
    }
}

impl IntoIterator for CountMap {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl From<CountMap> for HashMap<String, u64> {
    fn from(map: CountMap) -> Self {
        map.counts
    }
}

/// Returns the number of active users per country.
///
/// The result is always a valid map, empty when `users` is empty or has no
/// active user. The input is only read.
///
/// # Examples
///
/// ```rust
/// use cachelayout::count::country_count;
/// use cachelayout::user::HeapUser;
///
/// let users = vec![
///     HeapUser::new("u0", "AD").with_active(true),
///     HeapUser::new("u1", "BB").with_active(false),
///     HeapUser::new("u2", "AD").with_active(true),
/// ];
///
/// let counts = country_count(&users);
/// assert_eq!(counts.get("AD"), 2);
/// assert!(!counts.contains("BB"));
/// ```
pub fn country_count<R: Activity>(users: &[R]) -> CountMap {
    country_count_iter(users)
}

/// Same as [`country_count`], for any iterator over records.
pub fn country_count_iter<'a, R, It>(users: It) -> CountMap
where
    R: Activity + 'a,
    It: IntoIterator<Item = &'a R>,
{
    let mut counts = CountMap::new();
    for user in users {
        if !user.is_active() {
            continue;
        }
        counts.increment(user.country());
    }

    trace!(
        "country_count: {} active users across {} countries",
        counts.total(),
        counts.len()
    );
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{HeapImage, Image, InlineImage};
    use crate::user::{HeapUser, InlineUser};

    const COUNTRIES: [&str; 4] = ["AD", "BB", "CA", "DK"];

    fn users_from(countries: &[&str], active: &[bool]) -> Vec<HeapUser> {
        countries
            .iter()
            .zip(active)
            .enumerate()
            .map(|(i, (c, a))| HeapUser::new(format!("u{}", i), *c).with_active(*a))
            .collect()
    }

    #[test]
    fn test_small_scenario() {
        let users = users_from(
            &["AD", "BB", "CA", "DK", "AD"],
            &[true, false, true, true, true],
        );
        let counts = country_count(&users);

        let expected: CountMap = [("AD", 2u64), ("CA", 1), ("DK", 1)].into_iter().collect();
        assert_eq!(counts, expected);
        assert!(!counts.contains("BB"));
        assert_eq!(counts.get("BB"), 0);
    }

    #[test]
    fn test_bench_fixture_scenario() {
        let users: Vec<HeapUser> = (0..10_000)
            .map(|i| HeapUser::new(format!("u{}", i), COUNTRIES[i % 4]).with_active(i % 5 > 0))
            .collect();
        let counts = country_count(&users);

        assert_eq!(counts.len(), 4);
        for country in COUNTRIES {
            assert_eq!(counts.get(country), 2000);
        }
        assert_eq!(counts.total(), 8000);
    }

    #[test]
    fn test_empty_input() {
        let users: Vec<HeapUser> = Vec::new();
        let counts = country_count(&users);
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts, CountMap::new());
    }

    #[test]
    fn test_all_inactive() {
        let users = users_from(&["AD", "BB"], &[false, false]);
        assert!(country_count(&users).is_empty());
    }

    #[test]
    fn test_empty_country_is_a_valid_key() {
        let users = users_from(&["", "", "AD"], &[true, true, false]);
        let counts = country_count(&users);
        assert_eq!(counts.get(""), 2);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_input_not_mutated() {
        let users = users_from(&["AD", "BB"], &[true, false]);
        let before = users.clone();
        let _ = country_count(&users);
        assert_eq!(users, before);
    }

    #[test]
    fn test_order_independent() {
        let mut users = users_from(
            &["AD", "BB", "CA", "DK", "AD", "CA"],
            &[true, true, false, true, true, true],
        );
        let forward = country_count(&users);
        users.reverse();
        assert_eq!(country_count(&users), forward);
        users.rotate_left(2);
        assert_eq!(country_count(&users), forward);
    }

    #[test]
    fn test_layout_does_not_matter() {
        let heap = users_from(
            &["AD", "BB", "CA", "DK", "AD"],
            &[true, true, false, true, true],
        );
        let filled: Vec<HeapUser> = heap
            .iter()
            .cloned()
            .map(|u| u.with_icon(HeapImage::filled(0xab)))
            .collect();
        let inline: Vec<InlineUser> = heap.iter().cloned().map(|u| u.into_layout()).collect();
        let inline_filled: Vec<InlineUser> = inline
            .iter()
            .cloned()
            .map(|u| u.with_icon(InlineImage::filled(0xcd)))
            .collect();

        let expected = country_count(&heap);
        assert_eq!(country_count(&filled), expected);
        assert_eq!(country_count(&inline), expected);
        assert_eq!(country_count(&inline_filled), expected);
    }

    #[test]
    fn test_iter_variant_over_references() {
        let users = users_from(&["AD", "BB", "AD"], &[true, true, true]);
        let refs: Vec<&HeapUser> = users.iter().collect();
        let counts = country_count_iter(refs.iter().copied());
        assert_eq!(counts, country_count(&users));
        // slice of references goes through the blanket Activity impl
        assert_eq!(country_count(&refs), country_count(&users));
    }

    #[test]
    fn test_sorted() {
        let counts: CountMap = [("DK", 1u64), ("AD", 3), ("CA", 2)].into_iter().collect();
        assert_eq!(counts.sorted(), vec![("AD", 3), ("CA", 2), ("DK", 1)]);
    }

    #[test]
    fn test_from_iter_drops_zero_and_merges() {
        let counts: CountMap = [("AD", 0u64), ("BB", 1), ("BB", 2)].into_iter().collect();
        assert!(!counts.contains("AD"));
        assert_eq!(counts.get("BB"), 3);
    }

    #[test]
    fn test_into_hash_map() {
        let counts: CountMap = [("AD", 1u64)].into_iter().collect();
        let map: HashMap<String, u64> = counts.into();
        assert_eq!(map.get("AD"), Some(&1));
    }
}
