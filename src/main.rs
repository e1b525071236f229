use clap::{Parser, Subcommand};
use std::process;
use tracing::Level;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word candidate list (CSV: id,language,word,difficulty,freq_score,definition).
    #[arg(global = true, short, long, default_value = "data/words.csv")]
    words: String,

    /// Difficulty profiles (JSON array, one entry per tier).
    #[arg(global = true, short, long, default_value = "data/profiles.json")]
    profiles: String,

    /// Level store snapshot.
    #[arg(global = true, short, long, default_value = "data/store.json")]
    store: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one or more crossword levels.
    Generate(cmd::generate::GenerateArgs),
    /// Recompute and check a stored level's canonical answer hash.
    Verify(cmd::verify::VerifyArgs),
}

fn main() {
    let cli = Cli::parse();

    // In --json mode stdout carries exactly one machine-readable line, so
    // tracing goes to stderr and drops below warn level.
    let json_mode = match &cli.command {
        Commands::Generate(args) => args.json,
        Commands::Verify(args) => args.json,
    };
    let level = if cli.debug {
        Level::DEBUG
    } else if json_mode {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let paths = cmd::DataPaths {
        words: cli.words,
        profiles: cli.profiles,
        store: cli.store,
    };

    let code = match cli.command {
        Commands::Generate(args) => cmd::generate::run(args, &paths),
        Commands::Verify(args) => cmd::verify::run(args, &paths),
    };
    process::exit(code);
}
