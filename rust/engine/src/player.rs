use crate::cards::{ActionKind, Card, ModifierKind};
use crate::errors::GameError;
use serde::{Deserialize, Serialize};

/// Number of distinct number cards that ends the round.
pub const FLIP7_COUNT: usize = 7;

/// Bonus added to the round score for a Flip 7.
pub const FLIP7_BONUS: u32 = 15;

/// Round state of a player.
/// `Stayed` and `Busted` are terminal until the next round reset.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Still drawing this round
    Active,
    /// Banked the current round score
    Stayed,
    /// Drew a duplicate number; round score is 0
    Busted,
}

/// What happened when a card was offered to a player's hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum CardOutcome {
    /// Card is now in the hand
    Added,
    /// Seventh distinct number card; the player stayed automatically
    Flip7Achieved,
    /// Duplicate number without protection; the player busted.
    /// The card was not added.
    DuplicateBust(u8),
    /// Duplicate number while holding a Second Chance. Nothing changed;
    /// the caller decides how to consume the protection.
    DuplicateAvoidable(u8),
    /// Second Chance offered to a player who already holds one.
    /// The card was not added.
    SecondChanceAlreadyHeld,
}

/// A Flip 7 player: cumulative score plus the hand and state of the current round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    name: String,
    total_score: u32,
    numbers: Vec<u8>,
    modifiers: Vec<ModifierKind>,
    second_chance: bool,
    state: PlayerState,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_score: 0,
            numbers: Vec::new(),
            modifiers: Vec::new(),
            second_chance: false,
            state: PlayerState::Active,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn total_score(&self) -> u32 {
        self.total_score
    }
    pub fn state(&self) -> PlayerState {
        self.state
    }
    pub fn is_active(&self) -> bool {
        self.state == PlayerState::Active
    }
    pub fn is_busted(&self) -> bool {
        self.state == PlayerState::Busted
    }
    pub fn has_second_chance(&self) -> bool {
        self.second_chance
    }

    /// Number card values in the order they were drawn.
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn modifiers(&self) -> &[ModifierKind] {
        &self.modifiers
    }

    pub fn has_number_cards(&self) -> bool {
        !self.numbers.is_empty()
    }

    pub fn holds_number(&self, value: u8) -> bool {
        self.numbers.contains(&value)
    }

    pub fn has_multiplier(&self) -> bool {
        self.modifiers.iter().any(|m| m.is_multiplier())
    }

    /// Every card currently in the hand: numbers, then modifiers, then a held
    /// Second Chance.
    pub fn hand(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.numbers.iter().map(|&v| Card::Number(v)).collect();
        cards.extend(self.modifiers.iter().map(|&m| Card::Modifier(m)));
        if self.second_chance {
            cards.push(Card::Action(ActionKind::SecondChance));
        }
        cards
    }

    pub fn hand_len(&self) -> usize {
        self.numbers.len() + self.modifiers.len() + usize::from(self.second_chance)
    }

    /// Offers a card to the hand and reports what happened.
    ///
    /// Freeze and Flip Three are never held; offering one is an error.
    pub fn add_card(&mut self, card: Card) -> Result<CardOutcome, GameError> {
        match card {
            Card::Number(v) => {
                if self.holds_number(v) {
                    if self.second_chance {
                        return Ok(CardOutcome::DuplicateAvoidable(v));
                    }
                    self.state = PlayerState::Busted;
                    return Ok(CardOutcome::DuplicateBust(v));
                }
                self.numbers.push(v);
                if self.numbers.len() == FLIP7_COUNT {
                    self.state = PlayerState::Stayed;
                    return Ok(CardOutcome::Flip7Achieved);
                }
                Ok(CardOutcome::Added)
            }
            Card::Modifier(m) => {
                self.modifiers.push(m);
                Ok(CardOutcome::Added)
            }
            Card::Action(ActionKind::SecondChance) => {
                if self.second_chance {
                    return Ok(CardOutcome::SecondChanceAlreadyHeld);
                }
                self.second_chance = true;
                Ok(CardOutcome::Added)
            }
            Card::Action(_) => Err(GameError::CardNotHoldable(card)),
        }
    }

    /// Consumes the held Second Chance and returns it for discarding.
    pub fn use_second_chance(&mut self) -> Result<Card, GameError> {
        if !self.second_chance {
            return Err(GameError::SecondChanceNotHeld);
        }
        self.second_chance = false;
        Ok(Card::Action(ActionKind::SecondChance))
    }

    /// Voluntary stay, Freeze, or the end of a round after someone's Flip 7.
    /// No effect unless the player is still active.
    pub fn stay(&mut self) {
        if self.state == PlayerState::Active {
            self.state = PlayerState::Stayed;
        }
    }

    /// Score of the current hand. Pure; callable at any time.
    ///
    /// Busted players score 0. Otherwise the number subtotal is doubled by a
    /// x2 modifier before flat modifiers are added, and a Flip 7 adds 15.
    pub fn round_score(&self) -> u32 {
        if self.state == PlayerState::Busted {
            return 0;
        }
        let mut numbers: u32 = self.numbers.iter().map(|&v| u32::from(v)).sum();
        if self.has_multiplier() {
            numbers *= 2;
        }
        let flat: u32 = self.modifiers.iter().map(|m| m.flat_points()).sum();
        let bonus = if self.numbers.len() == FLIP7_COUNT {
            FLIP7_BONUS
        } else {
            0
        };
        numbers + flat + bonus
    }

    /// Banks the round score into the total and returns it.
    pub fn bank_round_score(&mut self) -> u32 {
        let score = self.round_score();
        self.total_score += score;
        score
    }

    /// Clears the hand for the next round and hands back every card it held.
    /// Total score is kept.
    pub fn reset_for_new_round(&mut self) -> Vec<Card> {
        let cards = self.hand();
        self.numbers.clear();
        self.modifiers.clear();
        self.second_chance = false;
        self.state = PlayerState::Active;
        cards
    }

    /// Starts a fresh game for this seat.
    pub fn reset_total(&mut self) {
        self.total_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_numbers(values: &[u8]) -> Player {
        let mut p = Player::new("p");
        for &v in values {
            p.add_card(Card::Number(v)).unwrap();
        }
        p
    }

    #[test]
    fn duplicate_without_protection_busts() {
        let mut p = with_numbers(&[5]);
        p.add_card(Card::Modifier(ModifierKind::Plus10)).unwrap();
        assert_eq!(
            p.add_card(Card::Number(5)).unwrap(),
            CardOutcome::DuplicateBust(5)
        );
        assert_eq!(p.state(), PlayerState::Busted);
        assert_eq!(p.round_score(), 0);
        assert_eq!(p.numbers(), &[5]);
    }

    #[test]
    fn duplicate_with_protection_is_avoidable() {
        let mut p = with_numbers(&[5]);
        p.add_card(Card::Action(ActionKind::SecondChance)).unwrap();
        assert_eq!(
            p.add_card(Card::Number(5)).unwrap(),
            CardOutcome::DuplicateAvoidable(5)
        );
        assert!(p.is_active());
        assert_eq!(p.numbers(), &[5]);
        assert!(p.has_second_chance());
    }

    #[test]
    fn seventh_distinct_number_is_flip7() {
        let mut p = with_numbers(&[0, 1, 2, 3, 4, 5]);
        assert_eq!(
            p.add_card(Card::Number(6)).unwrap(),
            CardOutcome::Flip7Achieved
        );
        assert_eq!(p.state(), PlayerState::Stayed);
        assert_eq!(p.round_score(), 36);
    }

    #[test]
    fn multiplier_applies_before_flat_modifiers() {
        let mut p = with_numbers(&[3, 4]);
        p.add_card(Card::Modifier(ModifierKind::Times2)).unwrap();
        p.add_card(Card::Modifier(ModifierKind::Plus4)).unwrap();
        assert_eq!(p.round_score(), 18);
        assert_eq!(p.round_score(), 18);
    }

    #[test]
    fn second_second_chance_is_rejected() {
        let mut p = Player::new("p");
        let sc = Card::Action(ActionKind::SecondChance);
        assert_eq!(p.add_card(sc).unwrap(), CardOutcome::Added);
        assert_eq!(
            p.add_card(sc).unwrap(),
            CardOutcome::SecondChanceAlreadyHeld
        );
        assert_eq!(p.hand_len(), 1);
    }

    #[test]
    fn freeze_cannot_be_held() {
        let mut p = Player::new("p");
        let freeze = Card::Action(ActionKind::Freeze);
        assert_eq!(p.add_card(freeze), Err(GameError::CardNotHoldable(freeze)));
    }

    #[test]
    fn use_second_chance_requires_flag() {
        let mut p = Player::new("p");
        assert_eq!(p.use_second_chance(), Err(GameError::SecondChanceNotHeld));
        p.add_card(Card::Action(ActionKind::SecondChance)).unwrap();
        assert_eq!(
            p.use_second_chance(),
            Ok(Card::Action(ActionKind::SecondChance))
        );
        assert!(!p.has_second_chance());
    }

    #[test]
    fn reset_returns_every_card_and_keeps_total() {
        let mut p = with_numbers(&[8, 2]);
        p.add_card(Card::Modifier(ModifierKind::Plus2)).unwrap();
        p.add_card(Card::Action(ActionKind::SecondChance)).unwrap();
        p.stay();
        assert_eq!(p.bank_round_score(), 12);
        let returned = p.reset_for_new_round();
        assert_eq!(returned.len(), 4);
        assert_eq!(p.hand_len(), 0);
        assert!(p.is_active());
        assert!(!p.has_second_chance());
        assert_eq!(p.total_score(), 12);
    }

    #[test]
    fn stay_is_noop_after_bust() {
        let mut p = with_numbers(&[1]);
        p.add_card(Card::Number(1)).unwrap();
        p.stay();
        assert_eq!(p.state(), PlayerState::Busted);
    }
}
