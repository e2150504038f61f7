//! Terminal front end for Quicx Knight: The Astral Oath.

mod commands;
mod outfit;
mod prompt;
mod render;
mod story;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use qk_store::StoreConfig;

#[derive(Parser)]
#[command(
    name = "quicx",
    about = "Quicx Knight: The Astral Oath, a trivia battle RPG",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding saves, questions.json and leaderboard.json
    #[arg(short, long, global = true, default_value = ".")]
    data_dir: PathBuf,

    /// RNG seed for reproducible battles
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load or create a knight and enter the game menu
    Play {
        /// Knight name; also the save file name
        name: String,
    },

    /// Show the top scores
    Leaderboard,

    /// Show question counts by difficulty
    Questions,

    /// Overwrite questions.json with the built-in sample questions
    Samples,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .parse_env("RUST_LOG");
    let _ = builder.try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = StoreConfig::new(cli.data_dir);

    let result = match cli.command {
        Commands::Play { name } => commands::play::run(&store, &name, cli.seed),
        Commands::Leaderboard => commands::leaderboard::run(&store),
        Commands::Questions => commands::questions::run(&store),
        Commands::Samples => commands::samples::run(&store),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
