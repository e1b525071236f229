use crate::config::{Config, Difficulty, DifficultyProfile, ScoringWeights};
use crate::error::{CfResult, CrossForgeError};
use crate::grid::{centrality, Direction, Grid};
use crate::pool::{total_eligible, TierPools, WordCandidate};
use fastrand::Rng;
use std::collections::HashSet;
use tracing::{debug, info};

/// A word bound to an accepted grid position. Immutable after the search
/// accepts it.
#[derive(Debug, Clone)]
pub struct Placement {
    pub word_id: String,
    pub word: String,
    pub definition: Option<String>,
    pub difficulty: Difficulty,
    pub freq_score: f64,
    pub direction: Direction,
    pub row: usize,
    pub col: usize,
    /// Letters shared with previously placed words.
    pub intersections: usize,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub grid_size: usize,
    pub placements: Vec<Placement>,
    pub target_words: usize,
}

struct Spot {
    row: isize,
    col: isize,
    direction: Direction,
    intersections: usize,
    score: f64,
}

/// Runs the full placement search: grid sizes in randomized order, a bounded
/// number of attempts per size, first accepted attempt wins. Exhausting the
/// whole budget is a generation failure, never a degraded result.
pub fn build_layout(
    profile: &DifficultyProfile,
    pools: &TierPools,
    cfg: &Config,
    rng: &mut Rng,
) -> CfResult<SearchOutcome> {
    let found = total_eligible(pools);
    if found < profile.min_words {
        return Err(CrossForgeError::InsufficientWords {
            difficulty: profile.name,
            found,
            need: profile.min_words,
        });
    }

    let mut grid_sizes: Vec<usize> = (profile.grid_min..=profile.grid_max).collect();
    rng.shuffle(&mut grid_sizes);

    for grid_size in grid_sizes {
        for attempt in 0..cfg.search.max_attempts_per_grid {
            if let Some(outcome) = attempt_build(profile, pools, &cfg.weights, grid_size, rng) {
                info!(
                    difficulty = %profile.name,
                    grid_size,
                    attempt,
                    words = outcome.placements.len(),
                    "layout accepted"
                );
                return Ok(outcome);
            }
        }
        debug!(grid_size, "attempt budget exhausted for grid size");
    }

    Err(CrossForgeError::Exhausted(profile.name))
}

/// One attempt on one grid size. Returns `None` when the attempt must be
/// discarded: not enough words chosen, seed did not fit, too few placements,
/// or a single-direction layout.
fn attempt_build(
    profile: &DifficultyProfile,
    pools: &TierPools,
    weights: &ScoringWeights,
    grid_size: usize,
    rng: &mut Rng,
) -> Option<SearchOutcome> {
    let target_words = pick_target_word_count(profile, rng);
    let desired = desired_counts(profile, target_words);
    let mut chosen = choose_words(pools, &desired, profile.min_words, grid_size, rng);
    if chosen.len() < profile.min_words {
        return None;
    }

    // Seed: the longest chosen word, tie-broken by frequency, anchored at
    // the grid center in a random orientation.
    chosen.sort_by(|a, b| {
        b.length
            .cmp(&a.length)
            .then_with(|| b.freq_score.total_cmp(&a.freq_score))
    });
    let seed = &chosen[0];
    let seed_chars: Vec<char> = seed.word.chars().collect();
    let seed_dir = if rng.bool() {
        Direction::Across
    } else {
        Direction::Down
    };
    let center = grid_size / 2;
    let offset = center.saturating_sub(seed.length / 2);
    let (seed_row, seed_col) = match seed_dir {
        Direction::Across => (center, offset),
        Direction::Down => (offset, center),
    };

    let mut grid = Grid::new(grid_size);
    // Checked even though word lengths were filtered to fit: a seed that
    // cannot land abandons the attempt instead of panicking.
    grid.can_place(&seed_chars, seed_row as isize, seed_col as isize, seed_dir, false)?;
    grid.place(&seed_chars, seed_row, seed_col, seed_dir);

    let mut placements = vec![Placement {
        word_id: seed.id.clone(),
        word: seed.word.clone(),
        definition: seed.definition.clone(),
        difficulty: seed.difficulty,
        freq_score: seed.freq_score,
        direction: seed_dir,
        row: seed_row,
        col: seed_col,
        intersections: 0,
    }];

    let mut queue: Vec<&WordCandidate> = chosen[1..].iter().collect();
    rng.shuffle(&mut queue);

    for word in queue {
        let Some(spot) = best_placement(&grid, word, &placements, weights) else {
            continue;
        };
        let chars: Vec<char> = word.word.chars().collect();
        grid.place(&chars, spot.row as usize, spot.col as usize, spot.direction);
        placements.push(Placement {
            word_id: word.id.clone(),
            word: word.word.clone(),
            definition: word.definition.clone(),
            difficulty: word.difficulty,
            freq_score: word.freq_score,
            direction: spot.direction,
            row: spot.row as usize,
            col: spot.col as usize,
            intersections: spot.intersections,
        });
        if placements.len() >= target_words {
            break;
        }
    }

    if placements.len() >= profile.min_words && has_both_directions(&placements) {
        Some(SearchOutcome {
            grid_size,
            placements,
            target_words,
        })
    } else {
        None
    }
}

fn pick_target_word_count(profile: &DifficultyProfile, rng: &mut Rng) -> usize {
    if profile.min_words >= profile.max_words {
        return profile.min_words;
    }
    rng.usize(profile.min_words..=profile.max_words)
}

/// Largest-remainder apportionment of the target count across tiers, so the
/// per-tier counts always sum to exactly `target_words`.
fn desired_counts(profile: &DifficultyProfile, target_words: usize) -> Vec<(Difficulty, usize)> {
    let ratios = profile.ratios.normalized();
    let mut floored: Vec<(Difficulty, usize, f64)> = Difficulty::ALL
        .iter()
        .map(|&d| {
            let exact = ratios.get(d) * target_words as f64;
            (d, exact.floor() as usize, exact.fract())
        })
        .collect();

    let used: usize = floored.iter().map(|&(_, n, _)| n).sum();
    let mut remaining = target_words.saturating_sub(used);

    let mut by_remainder = floored.clone();
    by_remainder.sort_by(|a, b| b.2.total_cmp(&a.2));
    let mut idx = 0;
    while remaining > 0 {
        let tier = by_remainder[idx % by_remainder.len()].0;
        if let Some(entry) = floored.iter_mut().find(|e| e.0 == tier) {
            entry.1 += 1;
        }
        idx += 1;
        remaining -= 1;
    }

    floored.into_iter().map(|(d, n, _)| (d, n)).collect()
}

/// Draws words per tier up to the desired counts, then tops up from any tier
/// until the profile minimum is met. Words longer than the candidate grid
/// size are filtered out before the attempt begins.
fn choose_words(
    pools: &TierPools,
    desired: &[(Difficulty, usize)],
    min_words: usize,
    grid_size: usize,
    rng: &mut Rng,
) -> Vec<WordCandidate> {
    let mut chosen: Vec<WordCandidate> = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();

    for &(tier, want) in desired {
        let mut pool: Vec<&WordCandidate> = pools
            .get(&tier)
            .map(|p| p.iter().filter(|w| w.length <= grid_size).collect())
            .unwrap_or_default();
        rng.shuffle(&mut pool);
        for word in pool.into_iter().take(want) {
            if used.insert(&word.id) {
                chosen.push(word.clone());
            }
        }
    }

    if chosen.len() < min_words {
        let mut top_up: Vec<&WordCandidate> = Difficulty::ALL
            .iter()
            .flat_map(|d| pools.get(d).into_iter().flatten())
            .filter(|w| w.length <= grid_size && !used.contains(w.id.as_str()))
            .collect();
        rng.shuffle(&mut top_up);
        for word in top_up {
            chosen.push(word.clone());
            if chosen.len() >= min_words {
                break;
            }
        }
    }

    chosen
}

/// Exhaustive scan over letter-position buckets: every matching letter of the
/// candidate against every placed occurrence of that letter, both
/// orientations. The highest composite score wins; ties keep the first found.
fn best_placement(
    grid: &Grid,
    word: &WordCandidate,
    placements: &[Placement],
    weights: &ScoringWeights,
) -> Option<Spot> {
    let letter_positions = grid.letter_positions();
    let across = placements
        .iter()
        .filter(|p| p.direction == Direction::Across)
        .count() as f64;
    let down = placements.len() as f64 - across;
    let chars: Vec<char> = word.word.chars().collect();
    let mut best: Option<Spot> = None;

    for direction in Direction::BOTH {
        let (dr, dc) = direction.delta();
        let balance_boost = match direction {
            Direction::Across => (down - across) * weights.balance_weight,
            Direction::Down => (across - down) * weights.balance_weight,
        };

        for (i, ch) in chars.iter().enumerate() {
            let Some(targets) = letter_positions.get(ch) else {
                continue;
            };
            for &(tr, tc) in targets {
                let row = tr as isize - dr * i as isize;
                let col = tc as isize - dc * i as isize;
                let Some(intersections) = grid.can_place(&chars, row, col, direction, true) else {
                    continue;
                };
                let score = intersections as f64 * weights.intersection_bonus
                    + centrality(grid.size(), row, col, direction, chars.len())
                        * weights.centrality_weight
                    + word.freq_score * weights.frequency_weight
                    + balance_boost;
                if best.as_ref().map_or(true, |b| score > b.score) {
                    best = Some(Spot {
                        row,
                        col,
                        direction,
                        intersections,
                        score,
                    });
                }
            }
        }
    }

    best
}

pub fn has_both_directions(placements: &[Placement]) -> bool {
    placements
        .iter()
        .any(|p| p.direction == Direction::Across)
        && placements.iter().any(|p| p.direction == Direction::Down)
}
