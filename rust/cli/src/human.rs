//! Human-input adapter for the engine's decision contract.
//!
//! Several human seats can share one terminal, so the strategies hold a
//! shared [`Console`] rather than owning the streams.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex};

use flip7_engine::cards::ActionKind;
use flip7_engine::errors::GameError;
use flip7_engine::game::GameState;
use flip7_engine::strategy::{Strategy, second_chance_candidates};

use crate::formatters::{format_hand, format_player_state};
use crate::io_utils::read_stdin_line;
use crate::validation::{ParseResult, parse_hit_or_stay, parse_seat_choice};

/// Reason given when the player types `quit`.
pub const QUIT_REASON: &str = "player quit";

/// Prompt input and output for human seats.
pub struct Console {
    input: Box<dyn BufRead + Send>,
    output: Box<dyn Write + Send>,
}

impl Console {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self { input, output }
    }

    /// Console on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(std::io::BufReader::new(std::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    pub fn shared(self) -> SharedConsole {
        Arc::new(Mutex::new(self))
    }

    /// Asks until `parse` accepts an answer. EOF and `quit` both end the
    /// game with [`GameError::Decision`].
    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> ParseResult<T>,
    ) -> Result<T, GameError> {
        loop {
            write!(self.output, "{}", prompt).map_err(io_failure)?;
            self.output.flush().map_err(io_failure)?;
            let Some(line) = read_stdin_line(&mut *self.input) else {
                return Err(GameError::Decision("input closed".to_string()));
            };
            match parse(&line) {
                ParseResult::Choice(v) => return Ok(v),
                ParseResult::Quit => return Err(GameError::Decision(QUIT_REASON.to_string())),
                ParseResult::Invalid(msg) => {
                    writeln!(self.output, "{}", msg).map_err(io_failure)?;
                }
            }
        }
    }

    fn say(&mut self, line: &str) -> Result<(), GameError> {
        writeln!(self.output, "{}", line).map_err(io_failure)
    }
}

pub type SharedConsole = Arc<Mutex<Console>>;

fn io_failure(e: std::io::Error) -> GameError {
    GameError::Decision(format!("console I/O failed: {}", e))
}

/// A seat controlled by a person at the console.
pub struct HumanStrategy {
    name: String,
    console: SharedConsole,
}

impl HumanStrategy {
    pub fn new(name: impl Into<String>, console: SharedConsole) -> Self {
        Self {
            name: name.into(),
            console,
        }
    }

    fn with_console<T>(
        &self,
        f: impl FnOnce(&mut Console) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut console = self
            .console
            .lock()
            .map_err(|_| GameError::Decision("console lock poisoned".to_string()))?;
        f(&mut console)
    }

    fn show_table(console: &mut Console, state: &GameState<'_>) -> Result<(), GameError> {
        for (seat, p) in state.players().iter().enumerate() {
            let marker = if seat == state.seat() { ">" } else { " " };
            console.say(&format!(
                "{} {:<20} {:>4} pts  {:<7} {}",
                marker,
                p.name(),
                p.total_score(),
                format_player_state(p.state()),
                format_hand(p)
            ))?;
        }
        Ok(())
    }

    fn choose_seat(
        &self,
        state: &GameState<'_>,
        seats: &[usize],
        title: &str,
    ) -> Result<usize, GameError> {
        self.with_console(|console| {
            console.say(title)?;
            for (i, &seat) in seats.iter().enumerate() {
                let p = &state.players()[seat];
                console.say(&format!(
                    "  {}) {} ({} pts, hand {})",
                    i + 1,
                    p.name(),
                    p.total_score(),
                    format_hand(p)
                ))?;
            }
            console.ask("Choose a player: ", |line| parse_seat_choice(line, seats))
        })
    }
}

impl Strategy for HumanStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide_hit_or_stay(&mut self, state: &GameState<'_>) -> Result<bool, GameError> {
        self.with_console(|console| {
            console.say(&format!("\n{}'s turn (round {})", state.me().name(), state.round()))?;
            Self::show_table(console, state)?;
            console.say(&format!(
                "Round score {}, bust chance {:.0}%, {} cards left",
                state.me().round_score(),
                state.bust_probability() * 100.0,
                state.cards_left()
            ))?;
            console.ask("Hit or stay? (h/s/q): ", parse_hit_or_stay)
        })
    }

    fn choose_adversarial_target(
        &mut self,
        state: &GameState<'_>,
        action: ActionKind,
    ) -> Result<usize, GameError> {
        let others: Vec<usize> = state.other_active_seats().collect();
        let title = match action {
            ActionKind::Freeze => "FREEZE: who must stay now?",
            _ => "FLIP THREE: who draws three cards?",
        };
        match others.as_slice() {
            [] => {
                self.with_console(|c| c.say("Nobody else is active; the card applies to you."))?;
                Ok(state.seat())
            }
            [only] => Ok(*only),
            _ => self.choose_seat(state, &others, title),
        }
    }

    fn choose_positive_target(
        &mut self,
        state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        let candidates = second_chance_candidates(state);
        match candidates.as_slice() {
            [] => Err(GameError::NoEligibleRecipient),
            [only] => Ok(*only),
            _ => self.choose_seat(
                state,
                &candidates,
                "You already hold a Second Chance. Who gets this one?",
            ),
        }
    }
}
