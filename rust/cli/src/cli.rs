//! Command-line argument types.

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "flip7",
    version,
    about = "Flip 7 press-your-luck card game: play at the terminal or simulate policies"
)]
pub struct Flip7Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one game with human and computer seats
    Play(PlayArgs),
    /// Run many computer-only games and report win rates
    Sim(SimArgs),
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// List the computer policies accepted by --ai
    Policies,
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Name of a human seat (repeatable)
    #[arg(long = "human", value_name = "NAME")]
    pub humans: Vec<String>,
    /// Policy spec of a computer seat (repeatable), e.g. score:25 or ev
    #[arg(long = "ai", value_name = "SPEC")]
    pub ai: Vec<String>,
    /// Seed for the deck and computer decisions
    #[arg(long)]
    pub seed: Option<u64>,
    /// Total score that ends the game
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub target: Option<u32>,
    /// Append one JSON line per round to this file
    #[arg(long, value_name = "PATH")]
    pub log: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SimArgs {
    /// Number of games to run
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub games: u32,
    /// Policy spec of a computer seat (repeatable)
    #[arg(long = "ai", value_name = "SPEC")]
    pub ai: Vec<String>,
    /// Base seed; game i uses seed + i
    #[arg(long)]
    pub seed: Option<u64>,
    /// Total score that ends each game
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub target: Option<u32>,
}
