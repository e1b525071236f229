use crossforge::config::{Config, Difficulty, DifficultyProfile, RatioMix};
use crossforge::engine::{self, Placement};
use crossforge::error::CrossForgeError;
use crossforge::grid::Direction;
use crossforge::level;
use crossforge::pool::{TierPools, WordCandidate};
use std::collections::{HashMap, HashSet};

fn word(id: &str, text: &str, difficulty: Difficulty, freq: f64) -> WordCandidate {
    WordCandidate {
        id: id.to_string(),
        word: text.to_string(),
        difficulty,
        length: text.chars().count(),
        freq_score: freq,
        definition: None,
        used_count: 0,
        last_used_at: None,
    }
}

fn easy_profile(min_words: usize, max_words: usize) -> DifficultyProfile {
    DifficultyProfile {
        name: Difficulty::Easy,
        ratios: RatioMix {
            easy: 1.0,
            ..RatioMix::default()
        },
        grid_min: 7,
        grid_max: 9,
        min_words,
        max_words,
        cooldown_days: 7,
        quality_threshold: 60,
    }
}

/// Well-connected easy words: every word shares at least one letter with
/// every other, so the search has intersections to work with.
fn easy_pool() -> TierPools {
    let mut pools: TierPools = HashMap::new();
    pools.insert(
        Difficulty::Easy,
        vec![
            word("w1", "KALEM", Difficulty::Easy, 0.9),
            word("w2", "MASA", Difficulty::Easy, 0.8),
            word("w3", "ELMA", Difficulty::Easy, 0.7),
            word("w4", "KAPI", Difficulty::Easy, 0.6),
        ],
    );
    pools
}

fn cells_of(p: &Placement) -> Vec<(usize, usize)> {
    let (dr, dc) = p.direction.delta();
    (0..p.word.chars().count())
        .map(|i| {
            (
                p.row + (dr as usize) * i,
                p.col + (dc as usize) * i,
            )
        })
        .collect()
}

#[test]
fn accepted_layout_has_both_directions() {
    let profile = easy_profile(4, 4);
    let mut rng = fastrand::Rng::with_seed(7);
    let outcome = engine::build_layout(&profile, &easy_pool(), &Config::default(), &mut rng)
        .expect("layout should build from a connectable pool");

    assert!(outcome
        .placements
        .iter()
        .any(|p| p.direction == Direction::Across));
    assert!(outcome
        .placements
        .iter()
        .any(|p| p.direction == Direction::Down));
    assert!(outcome.grid_size >= profile.grid_min && outcome.grid_size <= profile.grid_max);
}

#[test]
fn overlapping_placements_agree_on_letters() {
    let profile = easy_profile(4, 4);
    let mut rng = fastrand::Rng::with_seed(11);
    let outcome =
        engine::build_layout(&profile, &easy_pool(), &Config::default(), &mut rng).unwrap();

    let mut letters: HashMap<(usize, usize), char> = HashMap::new();
    for p in &outcome.placements {
        for (cell, ch) in cells_of(p).into_iter().zip(p.word.chars()) {
            if let Some(&existing) = letters.get(&cell) {
                assert_eq!(existing, ch, "conflicting letters at {:?}", cell);
            } else {
                letters.insert(cell, ch);
            }
        }
    }
}

#[test]
fn every_word_connects_back_to_the_seed() {
    let profile = easy_profile(4, 4);
    let mut rng = fastrand::Rng::with_seed(13);
    let outcome =
        engine::build_layout(&profile, &easy_pool(), &Config::default(), &mut rng).unwrap();

    let covered: Vec<HashSet<(usize, usize)>> = outcome
        .placements
        .iter()
        .map(|p| cells_of(p).into_iter().collect())
        .collect();

    // Flood fill over the "shares a cell" relation, starting from the seed.
    let mut reachable = vec![false; covered.len()];
    reachable[0] = true;
    let mut frontier = vec![0usize];
    while let Some(i) = frontier.pop() {
        for j in 0..covered.len() {
            if !reachable[j] && !covered[i].is_disjoint(&covered[j]) {
                reachable[j] = true;
                frontier.push(j);
            }
        }
    }
    assert!(
        reachable.iter().all(|&r| r),
        "isolated word island in accepted layout"
    );

    // Every non-seed placement reports at least one intersection.
    for p in &outcome.placements[1..] {
        assert!(p.intersections >= 1, "floating placement {:?}", p.word);
    }
}

#[test]
fn tiny_pool_uses_exactly_the_easy_words() {
    let profile = easy_profile(4, 4);
    let mut rng = fastrand::Rng::with_seed(17);
    let result = level::generate(&profile, &easy_pool(), &Config::default(), &mut rng)
        .expect("tiny pool should still build");

    assert_eq!(result.words_breakdown.easy, 4);
    assert_eq!(result.words_breakdown.medium, 0);
    assert_eq!(result.words_breakdown.hard, 0);
    assert_eq!(result.words_breakdown.expert, 0);

    let mut used: Vec<&str> = result.placements.iter().map(|p| p.word.as_str()).collect();
    used.sort();
    assert_eq!(used, vec!["ELMA", "KALEM", "KAPI", "MASA"]);
}

#[test]
fn insufficient_pool_fails_before_any_placement() {
    let profile = easy_profile(4, 4);
    let mut pools: TierPools = HashMap::new();
    pools.insert(
        Difficulty::Easy,
        vec![
            word("w1", "KALEM", Difficulty::Easy, 0.9),
            word("w2", "MASA", Difficulty::Easy, 0.8),
        ],
    );

    let mut rng = fastrand::Rng::with_seed(19);
    let err = engine::build_layout(&profile, &pools, &Config::default(), &mut rng)
        .expect_err("two words cannot satisfy a four-word minimum");

    match err {
        CrossForgeError::InsufficientWords { found, need, .. } => {
            assert_eq!(found, 2);
            assert_eq!(need, 4);
        }
        other => panic!("expected InsufficientWords, got {:?}", other),
    }
    let message = format!(
        "{}",
        CrossForgeError::InsufficientWords {
            difficulty: Difficulty::Easy,
            found: 2,
            need: 4
        }
    );
    assert!(message.contains("found 2"));
    assert!(message.contains("need at least 4"));
}

#[test]
fn oversized_words_never_enter_the_grid() {
    let mut profile = easy_profile(4, 5);
    profile.grid_min = 7;
    profile.grid_max = 7;

    let mut pools = easy_pool();
    pools
        .get_mut(&Difficulty::Easy)
        .unwrap()
        .push(word("w9", "ABCDEFGHIJKL", Difficulty::Easy, 0.99));

    let mut rng = fastrand::Rng::with_seed(23);
    let outcome =
        engine::build_layout(&profile, &pools, &Config::default(), &mut rng).unwrap();
    assert!(outcome
        .placements
        .iter()
        .all(|p| p.word.chars().count() <= 7));
}

#[test]
fn same_seed_reproduces_the_same_layout() {
    let profile = easy_profile(4, 4);
    let cfg = Config::default();

    let mut rng_a = fastrand::Rng::with_seed(42);
    let mut rng_b = fastrand::Rng::with_seed(42);
    let a = engine::build_layout(&profile, &easy_pool(), &cfg, &mut rng_a).unwrap();
    let b = engine::build_layout(&profile, &easy_pool(), &cfg, &mut rng_b).unwrap();

    assert_eq!(a.grid_size, b.grid_size);
    assert_eq!(a.target_words, b.target_words);
    assert_eq!(a.placements.len(), b.placements.len());
    for (pa, pb) in a.placements.iter().zip(&b.placements) {
        assert_eq!(pa.word_id, pb.word_id);
        assert_eq!(pa.direction, pb.direction);
        assert_eq!((pa.row, pa.col), (pb.row, pb.col));
        assert_eq!(pa.intersections, pb.intersections);
    }
}
