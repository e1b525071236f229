//! Canonical answer hashing, shared bit-for-bit between generation and
//! submission-time verification. Any divergence between the two call sites
//! makes verification silently fail forever, so everything lives here and
//! nowhere else.

use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Level id used for dry-run hashes, before a real id has been allocated.
pub const PLACEHOLDER_LEVEL_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Current level schema version baked into the canonical string.
pub const LEVEL_VERSION: u32 = 1;

/// Turkish-aware uppercasing: dotted `i` maps to `İ` and dotless `ı` to
/// `I` before the Unicode default mapping runs. Both the pool loader and
/// the canonical answer string go through this, so a lowercase word and
/// its proper Turkish uppercase hash identically.
pub fn turkish_upper(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Natural order for clue keys like `"1A"`, `"10D"`, `"2A"`: numeric prefix
/// first, then direction with `A` before `D`.
pub fn natural_clue_order(a: &str, b: &str) -> Ordering {
    fn leading_number(s: &str) -> u32 {
        let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }
    leading_number(a)
        .cmp(&leading_number(b))
        .then_with(|| a.chars().last().cmp(&b.chars().last()))
}

/// `"<levelId>:<version>:<ans1>:<ans2>:…"` with answers sorted by natural
/// clue order, uppercased, and trimmed.
pub fn canonical_answer_string(
    level_id: &str,
    version: u32,
    answers: &BTreeMap<String, String>,
) -> String {
    let mut keys: Vec<&String> = answers.keys().collect();
    keys.sort_by(|a, b| natural_clue_order(a, b));

    let mut parts = Vec::with_capacity(keys.len() + 2);
    parts.push(level_id.to_string());
    parts.push(version.to_string());
    for key in keys {
        if let Some(answer) = answers.get(key) {
            parts.push(turkish_upper(answer.trim()));
        }
    }
    parts.join(":")
}

/// Hex SHA-256 over the canonical answer string. A pure function of
/// (level id, version, answers): identical inputs always yield the identical
/// hash.
pub fn answer_hash(level_id: &str, version: u32, answers: &BTreeMap<String, String>) -> String {
    sha256_hex(&canonical_answer_string(level_id, version, answers))
}

/// Hash over the sorted word ids of a layout, identifying the word set
/// independently of positions.
pub fn solution_hash(word_ids: &[String]) -> String {
    let mut sorted = word_ids.to_vec();
    sorted.sort();
    sha256_hex(&sorted.join("|"))
}
