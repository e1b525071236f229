//! File-backed persistence adapter. The whole store is one JSON snapshot
//! rewritten atomically per commit: either every record of a generation run
//! lands (level, per-word rows, usage counters, optional daily assignment)
//! or the previous file stays untouched.

use crate::config::{Difficulty, DifficultyProfile, GENERATOR_VERSION};
use crate::error::{CfResult, CrossForgeError};
use crate::finalize::{CluesJson, GridJson};
use crate::grid::Direction;
use crate::hash;
use crate::level::{GenerationResult, WordsBreakdown};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordUsage {
    pub used_count: u32,
    pub last_used_at: Option<NaiveDate>,
    pub cooldown_until: Option<NaiveDate>,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    pub id: String,
    pub version: u32,
    pub difficulty: Difficulty,
    pub target_difficulty: Difficulty,
    pub computed_difficulty_score: f64,
    pub language: String,
    pub grid_size: usize,
    pub word_count: usize,
    pub words_breakdown: WordsBreakdown,
    pub quality_score: u32,
    pub grid_json: GridJson,
    pub clues_json: CluesJson,
    pub answer_hash: String,
    pub solution_hash: String,
    pub auto_generated: bool,
    pub review_status: String,
    pub generator_version: String,
    pub is_premium: bool,
    pub difficulty_multiplier: f64,
    pub created_at: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelWordRow {
    pub level_id: String,
    pub word_id: String,
    pub direction: Direction,
    pub start_x: usize,
    pub start_y: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyChallenge {
    pub id: String,
    pub level_id: String,
    pub leaderboard_enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreState {
    pub levels: Vec<LevelRecord>,
    pub level_words: Vec<LevelWordRow>,
    pub word_usage: BTreeMap<String, WordUsage>,
    pub daily_challenges: BTreeMap<NaiveDate, DailyChallenge>,
}

#[derive(Debug, Clone)]
pub struct PersistedLevel {
    pub level_id: String,
    pub answer_hash: String,
    pub solution_hash: String,
}

pub struct Store {
    path: PathBuf,
    state: StoreState,
}

impl Store {
    /// Opens an existing store file, or starts empty when none exists yet.
    /// Nothing touches the filesystem until the first commit.
    pub fn open<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let file = File::open(&path)?;
            serde_json::from_reader(BufReader::new(file))?
        } else {
            StoreState::default()
        };
        Ok(Self { path, state })
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn usage(&self) -> &BTreeMap<String, WordUsage> {
        &self.state.word_usage
    }

    pub fn find_level(&self, level_id: &str) -> Option<&LevelRecord> {
        self.state.levels.iter().find(|l| l.id == level_id)
    }

    /// Commits one generation result: level row, per-word placement rows,
    /// usage/cooldown upserts, and the optional daily-challenge assignment
    /// (idempotent on date, last write wins). The in-memory state only
    /// advances after the snapshot hits disk, so a failed write leaves the
    /// store exactly as it was.
    pub fn persist_level(
        &mut self,
        generated: &GenerationResult,
        profile: &DifficultyProfile,
        language: &str,
        daily_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> CfResult<PersistedLevel> {
        let level_id = Uuid::new_v4().to_string();
        // The stored hash binds the real level id, not the dry-run
        // placeholder the in-memory result carries.
        let answer_hash = hash::answer_hash(
            &level_id,
            hash::LEVEL_VERSION,
            &generated.finalized.answer_map,
        );

        let mut next = self.state.clone();

        next.levels.push(LevelRecord {
            id: level_id.clone(),
            version: hash::LEVEL_VERSION,
            difficulty: generated.target_difficulty,
            target_difficulty: generated.target_difficulty,
            computed_difficulty_score: generated.computed_difficulty_score,
            language: language.to_string(),
            grid_size: generated.grid_size,
            word_count: generated.placements.len(),
            words_breakdown: generated.words_breakdown,
            quality_score: generated.quality_score,
            grid_json: generated.finalized.grid_json.clone(),
            clues_json: generated.finalized.clues_json.clone(),
            answer_hash: answer_hash.clone(),
            solution_hash: generated.solution_hash.clone(),
            auto_generated: true,
            review_status: "pending".to_string(),
            generator_version: GENERATOR_VERSION.to_string(),
            is_premium: false,
            difficulty_multiplier: generated.target_difficulty.multiplier(),
            created_at: today,
        });

        for p in &generated.placements {
            next.level_words.push(LevelWordRow {
                level_id: level_id.clone(),
                word_id: p.word_id.clone(),
                direction: p.direction,
                start_x: p.col,
                start_y: p.row,
                length: p.word.chars().count(),
            });
        }

        let cooldown_until = today + chrono::Days::new(u64::from(profile.cooldown_days));
        for p in &generated.placements {
            let entry = next.word_usage.entry(p.word_id.clone()).or_default();
            entry.used_count += 1;
            entry.last_used_at = Some(today);
            entry.cooldown_until = Some(cooldown_until);
        }

        if let Some(date) = daily_date {
            next.daily_challenges.insert(
                date,
                DailyChallenge {
                    id: Uuid::new_v4().to_string(),
                    level_id: level_id.clone(),
                    leaderboard_enabled: true,
                },
            );
        }

        self.write_atomic(&next)?;
        self.state = next;

        info!(level_id = %level_id, daily = daily_date.is_some(), "level committed");
        Ok(PersistedLevel {
            level_id,
            answer_hash,
            solution_hash: generated.solution_hash.clone(),
        })
    }

    fn write_atomic(&self, state: &StoreState) -> CfResult<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let tmp = NamedTempFile::new_in(parent)?;
        let mut writer = BufWriter::new(&tmp);
        serde_json::to_writer_pretty(&mut writer, state)?;
        writer.flush()?;
        drop(writer);
        tmp.persist(&self.path)
            .map_err(|e| CrossForgeError::Store(e.to_string()))?;
        Ok(())
    }
}
