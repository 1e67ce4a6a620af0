//! # Play Command
//!
//! One game of Flip 7 at the terminal. Human seats answer prompts on the
//! console; computer seats use policies from the `flip7-ai` crate. After
//! every round the event log and the score table are printed, and
//! optionally appended to a JSONL round log.

use std::io::Write;

use flip7_ai::create_policy;
use flip7_engine::engine::{Game, GameConfig};
use flip7_engine::errors::GameError;
use flip7_engine::logger::RoundLogger;
use flip7_engine::strategy::{Seat, Strategy};
use tracing::info;

use crate::cli::PlayArgs;
use crate::commands::computer_specs;
use crate::config;
use crate::error::CliError;
use crate::formatters::{format_event, format_score_table};
use crate::human::{Console, HumanStrategy, QUIT_REASON};
use crate::names::NamePool;
use crate::ui;

/// Handle the play command.
///
/// Seats are seated humans first, then computers, in the order given.
/// `console` serves every human seat; it is untouched when there are none.
///
/// # Errors
///
/// * `CliError::InvalidInput` for an unknown policy spec
/// * `CliError::Engine` when the table is invalid or the game aborts
/// * `CliError::Interrupted` when a human quits
pub fn handle_play_command(
    args: &PlayArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
    console: Console,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    let target_score = args.target.unwrap_or(cfg.target_score);

    let console = console.shared();
    let mut pool = NamePool::new(seed);
    let mut seats = Vec::new();
    for name in &args.humans {
        seats.push(Seat::new(
            name.clone(),
            Box::new(HumanStrategy::new(name.clone(), console.clone())),
        ));
    }
    for spec in computer_specs(&args.ai, &cfg) {
        let policy = create_policy(&spec)?;
        let name = pool.computer(policy.name());
        seats.push(Seat::new(name, Box::new(policy)));
    }
    let names: Vec<String> = seats.iter().map(|s| s.name.clone()).collect();

    let config = GameConfig {
        target_score,
        seed: Some(seed),
    };
    let mut game = match Game::new(seats, config) {
        Ok(g) => g,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };

    if args.humans.is_empty() {
        ui::display_warning(err, "No human seats; the computers play on their own.")?;
    }

    let mut logger = match &args.log {
        Some(path) => Some(RoundLogger::create(path)?),
        None => None,
    };
    let game_id = logger
        .as_mut()
        .map(|l| l.next_game_id())
        .unwrap_or_default();

    writeln!(
        out,
        "Flip 7: {} players, target {}, seed {}",
        names.len(),
        target_score,
        seed
    )?;
    for name in &names {
        writeln!(out, "  {}", name)?;
    }

    while !game.is_over() {
        writeln!(out, "\n{}", ui::rule(40))?;
        writeln!(
            out,
            "Round {} (dealer: {})",
            game.round(),
            names[game.dealer()]
        )?;
        let result = match game.play_round() {
            Ok(r) => r,
            Err(GameError::Decision(reason)) if reason == QUIT_REASON => {
                writeln!(out, "Game abandoned.")?;
                return Err(CliError::Interrupted(reason));
            }
            Err(e) => {
                ui::write_error(err, &e.to_string())?;
                return Err(e.into());
            }
        };
        for event in &result.events {
            writeln!(out, "  {}", format_event(event, &names))?;
        }
        writeln!(out)?;
        for line in format_score_table(&names, &result.scores, &result.totals) {
            writeln!(out, "{}", line)?;
        }
        if let Some(l) = logger.as_mut() {
            l.write(&result.to_record(&game_id, Some(seed)))?;
        }
    }

    if let Some(winner) = game.winner() {
        let rounds = game.last_round().map_or(0, |r| r.round);
        info!(winner, rounds, "game finished");
        writeln!(out, "\n{}", ui::rule(40))?;
        writeln!(
            out,
            "Winner: {} with {} points after {} rounds",
            names[winner],
            game.players()[winner].total_score(),
            rounds
        )?;
    }
    Ok(())
}
