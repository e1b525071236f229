use crate::cmd::DataPaths;
use clap::Args;
use crossforge::error::{CfResult, CrossForgeError};
use crossforge::hash;
use crossforge::store::Store;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// Submission-time hash check: recompute the canonical answer hash from
/// supplied answers and compare it against the one stored at generation
/// time. This is the anti-cheat consumer of the shared hash module.
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Level id to verify against.
    #[arg(short, long)]
    pub level: String,

    /// Answers as repeated `NUM<A|D>=WORD` pairs (e.g. `--answer 1A=KALEM`).
    #[arg(long = "answer", value_name = "KEY=WORD")]
    pub answers: Vec<String>,

    /// JSON file holding an answer map, merged under the --answer pairs.
    #[arg(long)]
    pub answers_file: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: VerifyArgs, paths: &DataPaths) -> i32 {
    match execute(&args, paths) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "success": false, "error": e.to_string() })
                );
            } else {
                eprintln!("Verification failed: {}", e);
            }
            2
        }
    }
}

fn execute(args: &VerifyArgs, paths: &DataPaths) -> CfResult<bool> {
    let store = Store::open(Path::new(&paths.store))?;
    let record = store.find_level(&args.level).ok_or_else(|| {
        CrossForgeError::Store(format!("level {} not found in store", args.level))
    })?;

    let mut answers: BTreeMap<String, String> = BTreeMap::new();
    if let Some(path) = &args.answers_file {
        let file = File::open(path)?;
        let from_file: BTreeMap<String, String> = serde_json::from_reader(BufReader::new(file))?;
        answers.extend(from_file);
    }
    for pair in &args.answers {
        let Some((key, word)) = pair.split_once('=') else {
            return Err(CrossForgeError::Config(format!(
                "--answer expects KEY=WORD, got '{}'",
                pair
            )));
        };
        answers.insert(key.trim().to_string(), word.trim().to_string());
    }
    if answers.is_empty() {
        return Err(CrossForgeError::Config(
            "no answers supplied; use --answer or --answers-file".to_string(),
        ));
    }

    let computed = hash::answer_hash(&record.id, record.version, &answers);
    let valid = computed == record.answer_hash;

    if !valid {
        warn!(level_id = %record.id, "answer hash mismatch");
    }
    if args.json {
        println!(
            "{}",
            serde_json::json!({ "success": true, "level_id": record.id, "valid": valid })
        );
    } else if valid {
        println!("OK: answers match level {}", record.id);
    } else {
        println!("MISMATCH: answers do not match level {}", record.id);
    }

    Ok(valid)
}
