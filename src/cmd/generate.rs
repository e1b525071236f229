use crate::cmd::DataPaths;
use crate::reports;
use chrono::{Days, Local};
use clap::Args;
use crossforge::config::{Config, Difficulty, ProfileSet};
use crossforge::error::CfResult;
use crossforge::level::{self, GenerationResult};
use crossforge::pool;
use crossforge::store::{PersistedLevel, Store};
use std::path::Path;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Target difficulty tier; omitted means a random tier per puzzle.
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Additionally assign each result as a dated daily challenge.
    #[arg(long, default_value_t = false)]
    pub daily: bool,

    /// Run the full search and scoring but skip persistence.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Number of independent puzzles to generate. Must be at least 1, so
    /// --json mode always has one result line to emit.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub count: u64,

    /// Suppress human-readable output; emit one final JSON line.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Seed for reproducible runs.
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

struct RunRecord {
    generated: GenerationResult,
    persisted: Option<PersistedLevel>,
}

pub fn run(args: GenerateArgs, paths: &DataPaths) -> i32 {
    match execute(&args, paths) {
        Ok(runs) => {
            if args.json {
                if let Some(last) = runs.last() {
                    let mut out = serde_json::json!({
                        "success": true,
                        "difficulty": last.generated.target_difficulty,
                        "level_id": last.persisted.as_ref().map(|p| p.level_id.clone()),
                    });
                    if args.dry_run {
                        out["dry_run"] = serde_json::Value::Bool(true);
                    }
                    println!("{}", out);
                }
            }
            0
        }
        Err(e) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "success": false, "error": e.to_string() })
                );
            } else {
                eprintln!("Crossword generation failed: {}", e);
            }
            1
        }
    }
}

fn execute(args: &GenerateArgs, paths: &DataPaths) -> CfResult<Vec<RunRecord>> {
    let verbose = !args.json;
    if verbose {
        println!(
            "crossforge generate -> difficulty:{} daily:{} dry_run:{} count:{}",
            args.difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "random".to_string()),
            args.daily,
            args.dry_run,
            args.count,
        );
    }

    let profiles = ProfileSet::load_from_file(&paths.profiles)?;
    let words = pool::load_words_from_file(&paths.words, &args.config.search.language)?;
    let mut store = Store::open(Path::new(&paths.store))?;

    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let today = Local::now().date_naive();

    let mut runs = Vec::with_capacity(args.count as usize);
    for i in 0..args.count {
        let target = args
            .difficulty
            .unwrap_or_else(|| Difficulty::ALL[rng.usize(0..Difficulty::ALL.len())]);
        let profile = profiles.get(target);

        // A fresh eligibility snapshot per puzzle, so a word placed by run
        // N is already cooling down when run N+1 queries.
        let pools = pool::eligible_by_tier(
            &words,
            store.usage(),
            profile,
            &args.config.search,
            today,
        );

        let generated = level::generate(profile, &pools, &args.config, &mut rng)?;
        let daily_date = args.daily.then(|| today + Days::new(i));
        let persisted = if args.dry_run {
            None
        } else {
            Some(store.persist_level(
                &generated,
                profile,
                &args.config.search.language,
                daily_date,
                today,
            )?)
        };

        if verbose {
            reports::print_run(i as usize + 1, &generated, persisted.as_ref(), daily_date);
        }
        runs.push(RunRecord { generated, persisted });
    }

    Ok(runs)
}
