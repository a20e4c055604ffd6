//! Terminal front end for the Reaxion reaction-time game.

mod commands;
mod screen;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rx",
    about = "Reaxion: guess how long the signal was live",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds interactively: watch the signal, then type your guess in ms
    Play {
        /// Difficulty: easy, medium, hard
        #[arg(short, long, default_value = "easy")]
        difficulty: String,

        /// Player name recorded on the game
        #[arg(short, long, default_value = "anonymous")]
        user: String,

        /// Number of reactions to complete before the game ends
        #[arg(short, long, default_value = "3")]
        rounds: u32,

        /// RNG seed for reproducible durations
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the countdown and signal delays
        #[arg(long)]
        no_wait: bool,

        /// Write the finished game as JSON to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Let a seeded bot play and print the results
    Bot {
        /// Difficulty: easy, medium, hard
        #[arg(short, long, default_value = "easy")]
        difficulty: String,

        /// Number of reactions the bot completes
        #[arg(short, long, default_value = "5")]
        rounds: u32,

        /// RNG seed for durations and the bot's guesses
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Largest error (ms) of the bot's first guess
        #[arg(long, default_value = "400")]
        skill: u32,

        /// Print every broadcast event
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the built-in difficulty profiles
    Difficulties,

    /// Rank exported games by score
    Leaderboard {
        /// Game files written by `play --export`
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Only rank games on this difficulty
        #[arg(short, long)]
        difficulty: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            difficulty,
            user,
            rounds,
            seed,
            no_wait,
            export,
        } => commands::play::run(commands::play::PlayOptions {
            difficulty,
            user,
            rounds,
            seed,
            no_wait,
            export,
        }),
        Commands::Bot {
            difficulty,
            rounds,
            seed,
            skill,
            verbose,
        } => commands::bot::run(&difficulty, rounds, seed, skill, verbose),
        Commands::Difficulties => commands::difficulties::run(),
        Commands::Leaderboard { files, difficulty } => {
            commands::leaderboard::run(&files, difficulty.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
