use cachelayout::count::{country_count, country_count_iter};
use cachelayout::image::{HeapImage, Image, InlineImage};
use cachelayout::user::{HeapUser, InlineUser};
use proptest::prelude::*;

fn users_strategy(max_len: usize) -> impl Strategy<Value = Vec<(bool, String)>> {
    prop::collection::vec((any::<bool>(), "[A-D]{0,2}"), 0..max_len)
}

fn build(pairs: &[(bool, String)]) -> Vec<HeapUser> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, (active, country))| {
            HeapUser::new(format!("u{}", i), country.as_str()).with_active(*active)
        })
        .collect()
}

proptest! {
    #[test]
    fn total_equals_active_records(pairs in users_strategy(200)) {
        let users = build(&pairs);
        let counts = country_count(&users);
        let active = pairs.iter().filter(|(a, _)| *a).count() as u64;
        prop_assert_eq!(counts.total(), active);
    }

    #[test]
    fn each_count_is_exact(pairs in users_strategy(200)) {
        let users = build(&pairs);
        let counts = country_count(&users);

        for (_, country) in &pairs {
            let expected = pairs.iter().filter(|(a, c)| *a && c == country).count() as u64;
            prop_assert_eq!(counts.get(country), expected);
            prop_assert_eq!(counts.contains(country), expected > 0);
        }
        for (country, count) in counts.iter() {
            prop_assert!(count > 0);
            prop_assert!(pairs.iter().any(|(a, c)| *a && c == country));
        }
    }

    #[test]
    fn permutation_does_not_change_counts(
        pairs in users_strategy(100).prop_flat_map(|p| (Just(p.clone()), Just(p).prop_shuffle()))
    ) {
        let (original, shuffled) = pairs;
        prop_assert_eq!(country_count(&build(&original)), country_count(&build(&shuffled)));
    }

    #[test]
    fn layout_does_not_change_counts(
        pairs in users_strategy(32),
        fill in any::<bool>(),
        byte in any::<u8>(),
    ) {
        let heap = build(&pairs);
        let filled: Vec<HeapUser> = heap
            .iter()
            .cloned()
            .map(|u| if fill { u.with_icon(HeapImage::filled(byte)) } else { u })
            .collect();
        let inline: Vec<InlineUser> = heap
            .iter()
            .cloned()
            .map(|u| u.into_layout().with_icon(InlineImage::filled(byte)))
            .collect();

        let expected = country_count(&heap);
        prop_assert_eq!(&country_count(&filled), &expected);
        prop_assert_eq!(&country_count(&inline), &expected);
        prop_assert_eq!(&country_count_iter(heap.iter()), &expected);
    }
}

#[test]
fn empty_input_gives_empty_map() {
    let users: Vec<InlineUser> = Vec::new();
    let counts = country_count(&users);
    assert!(counts.is_empty());
    assert_eq!(counts.len(), 0);
}
