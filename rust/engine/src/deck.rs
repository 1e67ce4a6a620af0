use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Draw pile plus discard pile.
///
/// The top of the draw pile is the end of `cards`. When the draw pile runs out
/// mid-draw, the discard pile is shuffled back in.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    discards: Vec<Card>,
    rng: ChaCha20Rng,
    reshuffles: u32,
}

impl Deck {
    /// Full 94-card deck shuffled with a seeded ChaCha stream.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut deck = Self {
            cards: full_deck(),
            discards: Vec::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
            reshuffles: 0,
        };
        deck.shuffle();
        deck
    }

    /// Deck whose draw order is exactly `order` (first element drawn first).
    /// Reshuffles still use `seed`.
    pub fn stacked(order: Vec<Card>, seed: u64) -> Self {
        let mut cards = order;
        cards.reverse();
        Self {
            cards,
            discards: Vec::new(),
            rng: ChaCha20Rng::seed_from_u64(seed),
            reshuffles: 0,
        }
    }

    /// Stacks `top` above the rest of a full deck so that the total stays
    /// at 94. `top` must be a sub-multiset of the full deck.
    pub fn stacked_full(top: &[Card], seed: u64) -> Self {
        let mut rest = full_deck();
        for card in top {
            if let Some(i) = rest.iter().position(|c| c == card) {
                rest.remove(i);
            }
        }
        let mut order = top.to_vec();
        order.extend(rest);
        Self::stacked(order, seed)
    }

    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the top card, reshuffling discards in first if the
    /// draw pile is empty.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            self.reshuffle();
        }
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn discard(&mut self, card: Card) {
        self.discards.push(card);
    }

    /// Moves every discard back into the draw pile and shuffles.
    pub fn reshuffle(&mut self) {
        debug!(
            discards = self.discards.len(),
            remaining = self.cards.len(),
            "reshuffling discard pile"
        );
        self.cards.append(&mut self.discards);
        self.shuffle();
        self.reshuffles += 1;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn discarded(&self) -> usize {
        self.discards.len()
    }

    /// Cards held by the deck itself (draw pile plus discards).
    pub fn total(&self) -> usize {
        self.cards.len() + self.discards.len()
    }

    /// Read-only view of the undrawn cards, top of the pile last.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discards
    }

    pub fn reshuffle_count(&self) -> u32 {
        self.reshuffles
    }
}
