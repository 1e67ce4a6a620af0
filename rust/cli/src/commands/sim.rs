//! Batch simulation: many complete computer-only games, one after another.
//!
//! Every game gets a fresh [`Game`] seeded with `seed + game index`; the
//! policy specs are re-parsed per game so no state carries over. Seat names
//! stay fixed so wins can be attributed.

use std::io::Write;

use flip7_ai::create_policy;
use flip7_engine::engine::{Game, GameConfig};
use flip7_engine::strategy::{Seat, Strategy};
use tracing::{debug, info};

use crate::cli::SimArgs;
use crate::commands::computer_specs;
use crate::config;
use crate::error::CliError;
use crate::formatters::performance_label;
use crate::names::NamePool;
use crate::ui;

/// Wins of one seat across the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatStats {
    pub name: String,
    pub wins: u32,
    /// Percentage of games won
    pub rate: f64,
}

/// Runs the batch and returns per-seat results sorted by wins, most first.
/// Equal win counts keep seat order.
pub fn run_simulation(
    specs: &[String],
    games: u32,
    seed: u64,
    target_score: u32,
) -> Result<Vec<SeatStats>, CliError> {
    let mut pool = NamePool::new(seed);
    let mut names = Vec::with_capacity(specs.len());
    for spec in specs {
        names.push(pool.computer(create_policy(spec)?.name()));
    }

    let mut wins = vec![0u32; specs.len()];
    for i in 0..games {
        let seats = specs
            .iter()
            .zip(&names)
            .map(|(spec, name)| -> Result<Seat, CliError> {
                Ok(Seat::new(name.clone(), Box::new(create_policy(spec)?)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let config = GameConfig {
            target_score,
            seed: Some(seed.wrapping_add(u64::from(i))),
        };
        let outcome = Game::new(seats, config)?.play_to_completion()?;
        debug!(game = i, winner = outcome.winner, rounds = outcome.rounds, "simulated game");
        wins[outcome.winner] += 1;
    }

    let mut stats: Vec<SeatStats> = names
        .into_iter()
        .zip(wins)
        .map(|(name, wins)| SeatStats {
            name,
            wins,
            rate: f64::from(wins) / f64::from(games) * 100.0,
        })
        .collect();
    stats.sort_by(|a, b| b.wins.cmp(&a.wins));
    Ok(stats)
}

/// Handle the sim command and print the result table.
pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let target_score = args.target.unwrap_or(cfg.target_score);
    let specs = computer_specs(&args.ai, &cfg);

    writeln!(
        out,
        "Running {} games with {} players (target {}, seed {})",
        args.games,
        specs.len(),
        target_score,
        seed
    )?;
    let stats = match run_simulation(&specs, args.games, seed, target_score) {
        Ok(s) => s,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e);
        }
    };
    info!(games = args.games, "simulation finished");

    writeln!(out, "{}", ui::rule(60))?;
    writeln!(
        out,
        "{:<24} {:>8} {:>10} {:>12}",
        "PLAYER", "WINS", "WIN RATE", "PERFORMANCE"
    )?;
    writeln!(out, "{}", "-".repeat(60))?;
    for s in &stats {
        writeln!(
            out,
            "{:<24} {:>8} {:>9.1}% {:>12}",
            s.name,
            s.wins,
            s.rate,
            performance_label(s.rate)
        )?;
    }
    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "Total Games: {}", args.games)?;
    if let [first, second, ..] = stats.as_slice() {
        writeln!(
            out,
            "Victory Margin: {:.1}% ({} vs {})",
            first.rate - second.rate,
            first.name,
            second.name
        )?;
    }
    writeln!(out, "{}", ui::rule(60))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wins_add_up_to_games() {
        let stats = run_simulation(&specs(&["score:20", "ev", "hit"]), 12, 7, 100).unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats.iter().map(|s| s.wins).sum::<u32>(), 12);
        assert!(stats.windows(2).all(|w| w[0].wins >= w[1].wins));
        let total_rate: f64 = stats.iter().map(|s| s.rate).sum();
        assert!((total_rate - 100.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_results() {
        let a = run_simulation(&specs(&["bust:0.3", "hybrid"]), 5, 11, 80).unwrap();
        let b = run_simulation(&specs(&["bust:0.3", "hybrid"]), 5, 11, 80).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_policy_is_rejected_before_playing() {
        let result = run_simulation(&specs(&["ev", "psychic"]), 5, 1, 100);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
