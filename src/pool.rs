use crate::config::{Difficulty, DifficultyProfile, SearchParams};
use crate::error::CfResult;
use crate::store::WordUsage;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// One eligible word, immutable once loaded and scoped to a single
/// generation attempt.
#[derive(Debug, Clone)]
pub struct WordCandidate {
    pub id: String,
    /// Uppercase, as it will appear in the grid.
    pub word: String,
    pub difficulty: Difficulty,
    /// Length in characters, not bytes.
    pub length: usize,
    /// Corpus frequency score in [0, 1].
    pub freq_score: f64,
    pub definition: Option<String>,
    pub used_count: u32,
    pub last_used_at: Option<NaiveDate>,
}

pub type TierPools = HashMap<Difficulty, Vec<WordCandidate>>;

/// Loads the raw word list from CSV: `id,language,word,difficulty,freq_score,definition`.
/// Rows with a missing id/word, an unknown difficulty, or no usable frequency
/// score are skipped rather than failing the whole load.
pub fn load_words<R: Read>(reader: R, language: &str) -> CfResult<Vec<WordCandidate>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut words = Vec::new();
    for record in rdr.records().flatten() {
        if record.len() < 5 {
            continue;
        }
        let id = record[0].trim();
        let lang = record[1].trim();
        let word = crate::hash::turkish_upper(record[2].trim());
        if id.is_empty() || word.is_empty() || lang != language {
            continue;
        }
        let Ok(difficulty) = Difficulty::from_str(record[3].trim()) else {
            continue;
        };
        let Ok(freq_score) = record[4].trim().parse::<f64>() else {
            continue;
        };
        if !freq_score.is_finite() || !(0.0..=1.0).contains(&freq_score) {
            continue;
        }
        let definition = record
            .get(5)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let length = word.chars().count();
        words.push(WordCandidate {
            id: id.to_string(),
            word,
            difficulty,
            length,
            freq_score,
            definition,
            used_count: 0,
            last_used_at: None,
        });
    }

    info!(count = words.len(), language, "word list loaded");
    Ok(words)
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P, language: &str) -> CfResult<Vec<WordCandidate>> {
    let file = File::open(path)?;
    load_words(file, language)
}

/// Applies the candidate-pool query contract for one profile: per tier, keep
/// words with a workable length, not locked, and outside their cooldown
/// window; prefer least-used then least-recently-used then highest-frequency
/// words; cap each tier at the configured candidate limit.
pub fn eligible_by_tier(
    words: &[WordCandidate],
    usage: &BTreeMap<String, WordUsage>,
    profile: &DifficultyProfile,
    params: &SearchParams,
    today: NaiveDate,
) -> TierPools {
    let mut pools: TierPools = HashMap::new();

    for word in words {
        if word.length < params.min_word_length || word.length > profile.grid_max {
            continue;
        }
        let mut candidate = word.clone();
        if let Some(state) = usage.get(&word.id) {
            if state.locked {
                continue;
            }
            if let Some(until) = state.cooldown_until {
                if until > today {
                    continue;
                }
            }
            candidate.used_count = state.used_count;
            candidate.last_used_at = state.last_used_at;
        }
        pools.entry(candidate.difficulty).or_default().push(candidate);
    }

    for (tier, pool) in pools.iter_mut() {
        pool.sort_by(|a, b| {
            a.used_count
                .cmp(&b.used_count)
                .then_with(|| a.last_used_at.cmp(&b.last_used_at))
                .then_with(|| b.freq_score.total_cmp(&a.freq_score))
        });
        pool.truncate(params.max_candidates_per_difficulty);
        debug!(%tier, eligible = pool.len(), "tier pool ready");
    }

    pools
}

pub fn total_eligible(pools: &TierPools) -> usize {
    Difficulty::ALL
        .iter()
        .map(|d| pools.get(d).map_or(0, Vec::len))
        .sum()
}
