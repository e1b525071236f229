use crossforge::hash::{
    answer_hash, canonical_answer_string, natural_clue_order, solution_hash, turkish_upper,
    LEVEL_VERSION, PLACEHOLDER_LEVEL_ID,
};
use rstest::rstest;
use std::cmp::Ordering;
use std::collections::BTreeMap;

fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|&(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[rstest]
#[case("1A", "1D", Ordering::Less)]
#[case("1D", "2A", Ordering::Less)]
#[case("2A", "10A", Ordering::Less)]
#[case("10A", "10D", Ordering::Less)]
#[case("9D", "10A", Ordering::Less)]
#[case("3A", "3A", Ordering::Equal)]
fn natural_order_cases(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
    assert_eq!(natural_clue_order(a, b), expected);
    assert_eq!(natural_clue_order(b, a), expected.reverse());
}

#[test]
fn canonical_string_sorts_naturally_not_lexically() {
    let map = answers(&[("10A", "ORMAN"), ("2D", "MASA"), ("1A", "KALEM")]);
    assert_eq!(
        canonical_answer_string("lvl", 1, &map),
        "lvl:1:KALEM:MASA:ORMAN"
    );
}

#[test]
fn canonical_string_trims_and_uppercases() {
    let map = answers(&[("1A", "  kalem "), ("1D", "Masa")]);
    assert_eq!(canonical_answer_string("lvl", 2, &map), "lvl:2:KALEM:MASA");
}

#[rstest]
#[case("istasyon", "İSTASYON")]
#[case("ışık", "IŞIK")]
#[case("İSTASYON", "İSTASYON")]
#[case("kalem", "KALEM")]
fn turkish_dotted_and_dotless_i_uppercase_correctly(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(turkish_upper(input), expected);
}

#[test]
fn lowercase_and_turkish_uppercase_answers_hash_identically() {
    // A verifier submitting proper Turkish uppercase must match a level
    // whose answers were loaded from lowercase input.
    let lower = answers(&[("1A", "istasyon"), ("1D", "ışık")]);
    let upper = answers(&[("1A", "İSTASYON"), ("1D", "IŞIK")]);
    assert_eq!(
        answer_hash("level-1", 1, &lower),
        answer_hash("level-1", 1, &upper)
    );
}

#[test]
fn answer_hash_is_deterministic() {
    let map = answers(&[("1A", "KALEM"), ("1D", "KAPI"), ("2D", "MASA")]);
    let h1 = answer_hash(PLACEHOLDER_LEVEL_ID, LEVEL_VERSION, &map);
    let h2 = answer_hash(PLACEHOLDER_LEVEL_ID, LEVEL_VERSION, &map);
    assert_eq!(h1, h2);
    assert_eq!(h1.len(), 64);
    assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn answer_hash_is_sensitive_to_every_input() {
    let map = answers(&[("1A", "KALEM"), ("1D", "KAPI")]);
    let base = answer_hash("level-1", 1, &map);

    // Single answer character changed.
    let changed = answers(&[("1A", "KALEN"), ("1D", "KAPI")]);
    assert_ne!(base, answer_hash("level-1", 1, &changed));

    // Level id changed.
    assert_ne!(base, answer_hash("level-2", 1, &map));

    // Version changed.
    assert_ne!(base, answer_hash("level-1", 2, &map));
}

#[test]
fn solution_hash_ignores_id_order() {
    let a = vec!["w3".to_string(), "w1".to_string(), "w2".to_string()];
    let b = vec!["w1".to_string(), "w2".to_string(), "w3".to_string()];
    assert_eq!(solution_hash(&a), solution_hash(&b));

    let c = vec!["w1".to_string(), "w2".to_string(), "w4".to_string()];
    assert_ne!(solution_hash(&a), solution_hash(&c));
}
