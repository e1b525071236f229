use crate::config::{Config, Difficulty, DifficultyProfile};
use crate::engine::{self, Placement, SearchOutcome};
use crate::error::CfResult;
use crate::finalize::{finalize_level, FinalizedLevel};
use crate::hash;
use crate::pool::TierPools;
use crate::scorer;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Per-tier count of the words that actually landed in the layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsBreakdown {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub expert: u32,
}

impl WordsBreakdown {
    pub fn bump(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
            Difficulty::Expert => self.expert += 1,
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }
}

/// Everything one generation run produces. The caller either persists it or,
/// on a dry run, consumes it in memory.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub target_difficulty: Difficulty,
    pub grid_size: usize,
    pub placements: Vec<Placement>,
    pub quality_score: u32,
    pub computed_difficulty_score: f64,
    pub words_breakdown: WordsBreakdown,
    pub solution_hash: String,
    /// Hashed against the placeholder level id; the store recomputes it with
    /// the real id at commit time.
    pub answer_hash: String,
    pub finalized: FinalizedLevel,
}

/// Runs the placement search for one profile and assembles the full result:
/// finalized grid, clue lists, scores, and hashes.
pub fn generate(
    profile: &DifficultyProfile,
    pools: &TierPools,
    cfg: &Config,
    rng: &mut Rng,
) -> CfResult<GenerationResult> {
    let outcome = engine::build_layout(profile, pools, cfg, rng)?;
    let result = assemble(profile, outcome);
    info!(
        difficulty = %result.target_difficulty,
        grid = result.grid_size,
        words = result.placements.len(),
        quality = result.quality_score,
        computed = result.computed_difficulty_score,
        "generation complete"
    );
    Ok(result)
}

pub fn assemble(profile: &DifficultyProfile, outcome: SearchOutcome) -> GenerationResult {
    let SearchOutcome {
        grid_size,
        placements,
        target_words,
    } = outcome;

    let finalized = finalize_level(grid_size, &placements);

    let mut words_breakdown = WordsBreakdown::default();
    for p in &placements {
        words_breakdown.bump(p.difficulty);
    }

    let word_ids: Vec<String> = placements.iter().map(|p| p.word_id.clone()).collect();
    let solution_hash = hash::solution_hash(&word_ids);
    let answer_hash = hash::answer_hash(
        hash::PLACEHOLDER_LEVEL_ID,
        hash::LEVEL_VERSION,
        &finalized.answer_map,
    );

    let quality_score = scorer::quality_score(grid_size, &placements, profile, target_words);
    let computed_difficulty_score = scorer::computed_difficulty(&placements);

    GenerationResult {
        target_difficulty: profile.name,
        grid_size,
        placements,
        quality_score,
        computed_difficulty_score,
        words_breakdown,
        solution_hash,
        answer_hash,
        finalized,
    }
}
