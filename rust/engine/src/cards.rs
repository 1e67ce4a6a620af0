use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest face value printed on a number card.
pub const MAX_NUMBER: u8 = 12;

/// Total number of cards in a complete Flip 7 deck.
pub const DECK_SIZE: usize = 94;

/// The three action cards. None of them carries points; each triggers a
/// resolution step in the orchestrator the moment it is drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ActionKind {
    /// Target stays immediately, banking their current round score
    Freeze,
    /// Target draws three cards in a row
    FlipThree,
    /// Negates exactly one duplicate-number bust
    SecondChance,
}

/// Score modifier cards. Flat modifiers add their value; `Times2` doubles the
/// number-card subtotal only.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ModifierKind {
    Plus2,
    Plus4,
    Plus6,
    Plus8,
    Plus10,
    Times2,
}

impl ModifierKind {
    /// Flat points added at scoring time. `Times2` contributes no flat points.
    pub fn flat_points(self) -> u32 {
        match self {
            ModifierKind::Plus2 => 2,
            ModifierKind::Plus4 => 4,
            ModifierKind::Plus6 => 6,
            ModifierKind::Plus8 => 8,
            ModifierKind::Plus10 => 10,
            ModifierKind::Times2 => 0,
        }
    }

    pub fn is_multiplier(self) -> bool {
        matches!(self, ModifierKind::Times2)
    }
}

/// A single Flip 7 card.
///
/// Cards are plain values; two cards compare equal when they have the same
/// kind and discriminant, which is all the game ever needs to tell them apart.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Card {
    /// Number card with a face value in `0..=12`
    Number(u8),
    /// Action card resolved by the orchestrator
    Action(ActionKind),
    /// Score modifier kept in the hand until the round ends
    Modifier(ModifierKind),
}

impl Card {
    pub fn is_number(&self) -> bool {
        matches!(self, Card::Number(_))
    }

    pub fn is_action(&self) -> bool {
        matches!(self, Card::Action(_))
    }

    pub fn is_modifier(&self) -> bool {
        matches!(self, Card::Modifier(_))
    }

    /// Only number cards can bust a player.
    pub fn can_cause_bust(&self) -> bool {
        self.is_number()
    }

    /// Face points of the card taken on its own. Multipliers and action cards
    /// are worth nothing by themselves.
    pub fn points(&self) -> u32 {
        match self {
            Card::Number(v) => u32::from(*v),
            Card::Modifier(m) => m.flat_points(),
            Card::Action(_) => 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(v) => write!(f, "[{}]", v),
            Card::Action(ActionKind::Freeze) => f.write_str("[FREEZE]"),
            Card::Action(ActionKind::FlipThree) => f.write_str("[FLIP 3]"),
            Card::Action(ActionKind::SecondChance) => f.write_str("[2ND CHANCE]"),
            Card::Modifier(ModifierKind::Times2) => f.write_str("[x2]"),
            Card::Modifier(m) => write!(f, "[+{}]", m.flat_points()),
        }
    }
}

pub fn all_actions() -> [ActionKind; 3] {
    [
        ActionKind::Freeze,
        ActionKind::FlipThree,
        ActionKind::SecondChance,
    ]
}

pub fn all_modifiers() -> [ModifierKind; 6] {
    [
        ModifierKind::Plus2,
        ModifierKind::Plus4,
        ModifierKind::Plus6,
        ModifierKind::Plus8,
        ModifierKind::Plus10,
        ModifierKind::Times2,
    ]
}

/// How many copies of a number card the deck holds: `n` copies of `n`,
/// except `0` which appears once.
pub fn number_copies(value: u8) -> usize {
    if value == 0 {
        1
    } else {
        usize::from(value)
    }
}

/// Builds the 94-card deck in a fixed, unshuffled order:
/// numbers ascending, then modifiers, then three of each action.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for value in 0..=MAX_NUMBER {
        for _ in 0..number_copies(value) {
            v.push(Card::Number(value));
        }
    }
    for &m in &all_modifiers() {
        v.push(Card::Modifier(m));
    }
    for _ in 0..3 {
        for &a in &all_actions() {
            v.push(Card::Action(a));
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_deck_has_expected_composition() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        assert_eq!(deck.iter().filter(|c| c.is_number()).count(), 79);
        assert_eq!(deck.iter().filter(|c| c.is_modifier()).count(), 6);
        assert_eq!(deck.iter().filter(|c| c.is_action()).count(), 9);
        let twelves = deck.iter().filter(|c| **c == Card::Number(12)).count();
        assert_eq!(twelves, 12);
        let zeros = deck.iter().filter(|c| **c == Card::Number(0)).count();
        assert_eq!(zeros, 1);
    }

    #[test]
    fn points_follow_card_kind() {
        assert_eq!(Card::Number(9).points(), 9);
        assert_eq!(Card::Modifier(ModifierKind::Plus10).points(), 10);
        assert_eq!(Card::Modifier(ModifierKind::Times2).points(), 0);
        assert_eq!(Card::Action(ActionKind::Freeze).points(), 0);
    }

    #[test]
    fn display_strings() {
        assert_eq!(Card::Number(7).to_string(), "[7]");
        assert_eq!(Card::Modifier(ModifierKind::Plus4).to_string(), "[+4]");
        assert_eq!(Card::Modifier(ModifierKind::Times2).to_string(), "[x2]");
        assert_eq!(Card::Action(ActionKind::FlipThree).to_string(), "[FLIP 3]");
    }
}
