use std::collections::VecDeque;

use flip7_engine::cards::{ActionKind, Card};
use flip7_engine::deck::Deck;
use flip7_engine::engine::{Game, GameConfig};
use flip7_engine::errors::GameError;
use flip7_engine::game::GameState;
use flip7_engine::strategy::{first_other_active, second_chance_candidates, Seat, Strategy};

/// Strategy driven by a fixed list of hit answers; stays once the list runs out.
#[derive(Debug, Default)]
pub struct Scripted {
    hits: VecDeque<bool>,
    target: Option<usize>,
}

#[allow(dead_code)]
impl Scripted {
    pub fn stayer() -> Self {
        Self::default()
    }

    pub fn hits(answers: &[bool]) -> Self {
        Self {
            hits: answers.iter().copied().collect(),
            target: None,
        }
    }

    /// Aim Freeze and Flip Three at `seat` whenever it is active.
    pub fn targeting(mut self, seat: usize) -> Self {
        self.target = Some(seat);
        self
    }
}

impl Strategy for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decide_hit_or_stay(&mut self, _state: &GameState<'_>) -> Result<bool, GameError> {
        Ok(self.hits.pop_front().unwrap_or(false))
    }

    fn choose_adversarial_target(
        &mut self,
        state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        Ok(self
            .target
            .filter(|&t| state.is_active(t))
            .unwrap_or_else(|| first_other_active(state)))
    }

    fn choose_positive_target(
        &mut self,
        state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        second_chance_candidates(state)
            .first()
            .copied()
            .ok_or(GameError::NoEligibleRecipient)
    }
}

pub fn seats(strategies: Vec<Scripted>) -> Vec<Seat> {
    strategies
        .into_iter()
        .enumerate()
        .map(|(i, s)| Seat::new(format!("P{}", i), Box::new(s)))
        .collect()
}

/// Game over a full deck whose first cards are `top`, in draw order.
#[allow(dead_code)]
pub fn stacked_game(top: &[Card], strategies: Vec<Scripted>) -> Game {
    stacked_game_to(top, strategies, 200)
}

#[allow(dead_code)]
pub fn stacked_game_to(top: &[Card], strategies: Vec<Scripted>, target_score: u32) -> Game {
    let config = GameConfig {
        target_score,
        seed: Some(1),
    };
    Game::with_deck(seats(strategies), config, Deck::stacked_full(top, 1)).expect("valid table")
}

#[allow(dead_code)]
pub fn n(v: u8) -> Card {
    Card::Number(v)
}

#[allow(dead_code)]
pub fn action(a: ActionKind) -> Card {
    Card::Action(a)
}
