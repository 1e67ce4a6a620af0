use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck exhausted: no cards left in draw or discard pile")]
    DeckExhausted,
    #[error("Card conservation violated: expected {expected} cards, found {found}")]
    CardConservationViolation { expected: usize, found: usize },
    #[error("No eligible recipient for the card")]
    NoEligibleRecipient,
    #[error("Player does not hold a Second Chance")]
    SecondChanceNotHeld,
    #[error("Card {0} cannot be held in a hand")]
    CardNotHoldable(Card),
    #[error("Seat {seat} is not a valid active target")]
    InvalidTarget { seat: usize },
    #[error("Need between {min} and {max} players, got {actual}")]
    InvalidPlayerCount {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("Target score must be positive")]
    InvalidTargetScore,
    #[error("Game already over")]
    GameAlreadyOver,
    #[error("Decision failed: {0}")]
    Decision(String),
}

impl GameError {
    /// Integrity violations mean the engine itself is broken; the game must
    /// not continue after one.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::DeckExhausted | GameError::CardConservationViolation { .. }
        )
    }
}
