//! Curation heuristics over a finished layout. These never gate acceptance;
//! the search already accepted the placement set before this runs.

use crate::config::DifficultyProfile;
use crate::engine::Placement;
use crate::grid::Direction;

const WEIGHT_COMPLETION: f64 = 45.0;
const WEIGHT_FILL: f64 = 20.0;
const WEIGHT_INTERSECTIONS: f64 = 20.0;
const WEIGHT_FREQUENCY: f64 = 10.0;
const WEIGHT_BALANCE: f64 = 5.0;

/// Letter density a well-packed grid converges to; fill contribution is
/// capped once it is reached.
const IDEAL_FILL_RATIO: f64 = 0.7;

/// 0–100 structural quality of a finished layout, floored at the profile's
/// quality threshold.
pub fn quality_score(
    grid_size: usize,
    placements: &[Placement],
    profile: &DifficultyProfile,
    target_words: usize,
) -> u32 {
    let n = placements.len().max(1) as f64;
    let intersection_count: usize = placements.iter().map(|p| p.intersections).sum();
    let letters_placed: usize = placements.iter().map(|p| p.word.chars().count()).sum();
    let fill_ratio = letters_placed as f64 / (grid_size * grid_size) as f64;
    let avg_freq = placements.iter().map(|p| p.freq_score).sum::<f64>() / n;
    let across = placements
        .iter()
        .filter(|p| p.direction == Direction::Across)
        .count() as f64;
    let down = placements.len() as f64 - across;
    let direction_balance = 1.0 - (across - down).abs() / n;
    let completion_ratio = placements.len() as f64 / target_words.max(1) as f64;

    let raw = completion_ratio * WEIGHT_COMPLETION
        + (fill_ratio / IDEAL_FILL_RATIO).min(1.0) * WEIGHT_FILL
        + (intersection_count as f64 / n).min(1.0) * WEIGHT_INTERSECTIONS
        + avg_freq * WEIGHT_FREQUENCY
        + direction_balance * WEIGHT_BALANCE;

    // Not clamp: a profile threshold above 100 must cap, not panic.
    (raw.round() as u32).max(profile.quality_threshold).min(100)
}

/// Mean per-tier difficulty value (easy=25 … expert=100) of the words that
/// actually landed, rounded to two decimals. Independent of, and allowed to
/// diverge from, the targeted tier.
pub fn computed_difficulty(placements: &[Placement]) -> f64 {
    let n = placements.len().max(1) as f64;
    let sum: f64 = placements.iter().map(|p| p.difficulty.tier_score()).sum();
    (sum / n * 100.0).round() / 100.0
}
