//! # flip7-engine: Flip 7 Round Engine Core
//!
//! A turn-sequenced simulation of the press-your-luck card game Flip 7.
//! Players draw from a shared 94-card deck, risking their round points
//! against the chance of a duplicate number card, until one cumulative
//! total reaches the target score.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card model (Number, Action, Modifier) and deck composition
//! - [`deck`] - Draw and discard piles with seeded ChaCha20 shuffling
//! - [`player`] - Player state machine, hand, and round scoring
//! - [`game`] - Read-only `GameState` snapshot handed to strategies
//! - [`strategy`] - The decision boundary shared by humans and policies
//! - [`engine`] - Round orchestrator and action-card resolution
//! - [`logger`] - Round events and JSONL round records
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use flip7_engine::cards::{Card, ModifierKind};
//! use flip7_engine::player::Player;
//!
//! let mut p = Player::new("Ada");
//! p.add_card(Card::Number(3)).unwrap();
//! p.add_card(Card::Number(4)).unwrap();
//! p.add_card(Card::Modifier(ModifierKind::Times2)).unwrap();
//! p.add_card(Card::Modifier(ModifierKind::Plus4)).unwrap();
//!
//! // the multiplier doubles the number subtotal before flat modifiers
//! assert_eq!(p.round_score(), 18);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! A seeded game shuffles and decides identically every time:
//!
//! ```rust
//! use flip7_engine::deck::Deck;
//!
//! let mut d1 = Deck::new_with_seed(42);
//! let mut d2 = Deck::new_with_seed(42);
//! assert_eq!(d1.draw(), d2.draw());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod logger;
pub mod player;
pub mod strategy;
