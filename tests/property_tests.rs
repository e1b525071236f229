use crossforge::hash::{answer_hash, canonical_answer_string, natural_clue_order};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn clue_key() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,2}[AD]"
}

fn answer_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map(clue_key(), "[A-Z]{2,10}", 1..12)
}

proptest! {
    #[test]
    fn natural_order_is_antisymmetric(a in clue_key(), b in clue_key()) {
        prop_assert_eq!(natural_clue_order(&a, &b), natural_clue_order(&b, &a).reverse());
    }

    #[test]
    fn natural_order_agrees_with_numeric_prefix(a in clue_key(), b in clue_key()) {
        let num = |s: &str| s[..s.len() - 1].parse::<u32>().unwrap();
        if num(&a) != num(&b) {
            prop_assert_eq!(natural_clue_order(&a, &b), num(&a).cmp(&num(&b)));
        }
    }

    #[test]
    fn canonical_string_has_one_part_per_answer(
        map in answer_map(),
        id in "[a-f0-9]{8}",
        version in 1u32..5,
    ) {
        let canonical = canonical_answer_string(&id, version, &map);
        prop_assert_eq!(canonical.split(':').count(), map.len() + 2);
        let prefix = format!("{}:{}:", id, version);
        prop_assert!(canonical.starts_with(&prefix));
    }

    #[test]
    fn hash_is_a_pure_function(map in answer_map(), id in "[a-f0-9]{8}", version in 1u32..5) {
        prop_assert_eq!(
            answer_hash(&id, version, &map),
            answer_hash(&id, version, &map)
        );
    }

    #[test]
    fn hash_changes_when_any_answer_changes(
        map in answer_map(),
        id in "[a-f0-9]{8}",
        idx in any::<prop::sample::Index>(),
    ) {
        let base = answer_hash(&id, 1, &map);

        let mut mutated = map.clone();
        let keys: Vec<String> = mutated.keys().cloned().collect();
        let key = idx.get(&keys).clone();
        if let Some(answer) = mutated.get_mut(&key) {
            answer.push('X');
        }

        prop_assert_ne!(base, answer_hash(&id, 1, &mutated));
    }

    #[test]
    fn ordering_vs_sort_is_consistent(map in answer_map()) {
        // Sorting twice with the comparator is idempotent; BTreeMap insertion
        // order never leaks into the canonical string.
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort_by(|a, b| natural_clue_order(a, b));
        let once = keys.clone();
        keys.sort_by(|a, b| natural_clue_order(a, b));
        prop_assert_eq!(once, keys);
    }
}
