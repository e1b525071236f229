use crate::error::{CfResult, CrossForgeError};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use strum_macros::{Display, EnumString};

/// Tag written into every persisted level so regenerated puzzles can be told
/// apart from levels built by older engine revisions.
pub const GENERATOR_VERSION: &str = "crossforge-v1";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Numeric value used when averaging placed words into a continuous
    /// difficulty score.
    pub fn tier_score(self) -> f64 {
        match self {
            Difficulty::Easy => 25.0,
            Difficulty::Medium => 50.0,
            Difficulty::Hard => 75.0,
            Difficulty::Expert => 100.0,
        }
    }

    /// Score multiplier recorded on the level row for downstream scoring.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
            Difficulty::Expert => 2.5,
        }
    }
}

/// Per-tier word-mix ratios. Missing tiers default to 0.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioMix {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub expert: f64,
}

impl RatioMix {
    pub fn get(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }

    /// Clamps negatives to zero and rescales to sum 1.0. A degenerate mix
    /// (all zero or negative) falls back to a uniform split.
    pub fn normalized(&self) -> RatioMix {
        let easy = self.easy.max(0.0);
        let medium = self.medium.max(0.0);
        let hard = self.hard.max(0.0);
        let expert = self.expert.max(0.0);
        let sum = easy + medium + hard + expert;
        if sum <= 0.0 {
            return RatioMix {
                easy: 0.25,
                medium: 0.25,
                hard: 0.25,
                expert: 0.25,
            };
        }
        RatioMix {
            easy: easy / sum,
            medium: medium / sum,
            hard: hard / sum,
            expert: expert / sum,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyProfile {
    pub name: Difficulty,
    #[serde(default)]
    pub ratios: RatioMix,
    pub grid_min: usize,
    pub grid_max: usize,
    pub min_words: usize,
    pub max_words: usize,
    pub cooldown_days: u32,
    pub quality_threshold: u32,
}

/// One validated profile per difficulty tier. A missing tier is a fatal
/// configuration error detected at load time, before any candidate query.
#[derive(Debug, Clone)]
pub struct ProfileSet {
    easy: DifficultyProfile,
    medium: DifficultyProfile,
    hard: DifficultyProfile,
    expert: DifficultyProfile,
}

impl ProfileSet {
    pub fn from_profiles(profiles: Vec<DifficultyProfile>) -> CfResult<Self> {
        let mut slots: [Option<DifficultyProfile>; 4] = [None, None, None, None];
        for profile in profiles {
            let idx = Difficulty::ALL
                .iter()
                .position(|&d| d == profile.name)
                .unwrap_or(0);
            slots[idx] = Some(profile);
        }
        let mut take = |d: Difficulty| {
            let idx = Difficulty::ALL.iter().position(|&x| x == d).unwrap_or(0);
            slots[idx]
                .take()
                .ok_or_else(|| CrossForgeError::Config(format!("Missing difficulty profile: {}", d)))
        };
        Ok(Self {
            easy: take(Difficulty::Easy)?,
            medium: take(Difficulty::Medium)?,
            hard: take(Difficulty::Hard)?,
            expert: take(Difficulty::Expert)?,
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let content = fs::read_to_string(path)?;
        let profiles: Vec<DifficultyProfile> = serde_json::from_str(&content)?;
        Self::from_profiles(profiles)
    }

    pub fn get(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Expert => &self.expert,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            weights: ScoringWeights::default(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Retry budget per candidate grid size.
    #[arg(long, default_value_t = 24)]
    pub max_attempts_per_grid: usize,

    /// Cap on eligible candidates loaded per difficulty tier.
    #[arg(long, default_value_t = 700)]
    pub max_candidates_per_difficulty: usize,

    #[arg(long, default_value_t = 3)]
    pub min_word_length: usize,

    #[arg(long, default_value = "tr")]
    pub language: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_attempts_per_grid: 24,
            max_candidates_per_difficulty: 700,
            min_word_length: 3,
            language: "tr".to_string(),
        }
    }
}

/// All placement-scoring constants in one struct so tests can perturb
/// weights without touching engine internals.
#[derive(Args, Debug, Clone)]
pub struct ScoringWeights {
    /// Reward per letter shared with an already-placed word.
    #[arg(long, default_value_t = 80.0)]
    pub intersection_bonus: f64,

    /// Weight on the negated Manhattan distance from grid center.
    #[arg(long, default_value_t = 8.0)]
    pub centrality_weight: f64,

    /// Weight on the candidate word's corpus frequency score.
    #[arg(long, default_value_t = 15.0)]
    pub frequency_weight: f64,

    /// Nudge toward the under-represented direction.
    #[arg(long, default_value_t = 9.0)]
    pub balance_weight: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            intersection_bonus: 80.0,
            centrality_weight: 8.0,
            frequency_weight: 15.0,
            balance_weight: 9.0,
        }
    }
}
