mod helpers;

use flip7_engine::cards::ActionKind::{FlipThree, Freeze, SecondChance};
use flip7_engine::cards::{ActionKind, Card};
use flip7_engine::deck::Deck;
use flip7_engine::engine::{Game, GameConfig};
use flip7_engine::errors::GameError;
use flip7_engine::game::GameState;
use flip7_engine::logger::RoundEvent;
use flip7_engine::player::PlayerState;
use flip7_engine::strategy::{Seat, Strategy};
use helpers::{action, n, stacked_game, Scripted};

fn draws_for(events: &[RoundEvent], seat: usize) -> Vec<Card> {
    events
        .iter()
        .filter_map(|e| match e {
            RoundEvent::Draw { seat: s, card } if *s == seat => Some(*card),
            _ => None,
        })
        .collect()
}

#[test]
fn freeze_forces_target_to_stay_with_current_hand() {
    let mut game = stacked_game(
        &[action(Freeze), n(5)],
        vec![Scripted::stayer(), Scripted::stayer()],
    );
    let result = game.play_round().unwrap();
    assert!(result.events.contains(&RoundEvent::Action {
        seat: 1,
        action: Freeze,
        target: 0
    }));
    // seat 0 was frozen before it was dealt anything
    assert_eq!(result.scores, vec![0, 5]);
    assert!(result.busts.is_empty());
    assert_eq!(game.discarded(), 1);
}

#[test]
fn flip_three_resolves_nested_actions() {
    let mut game = stacked_game(
        &[action(FlipThree), n(2), action(Freeze), n(4), n(6)],
        vec![Scripted::stayer(), Scripted::stayer()],
    );
    let result = game.play_round().unwrap();
    // seat 0 froze seat 1 in the middle of its own Flip Three
    assert!(result.events.contains(&RoundEvent::Action {
        seat: 0,
        action: Freeze,
        target: 1
    }));
    assert_eq!(
        draws_for(&result.events, 0),
        vec![n(2), action(Freeze), n(4), n(6)]
    );
    assert_eq!(result.scores, vec![12, 0]);
    assert_eq!(game.discarded(), 2);
    assert!(game.verify_conservation().is_ok());
}

#[test]
fn flip_three_stops_when_target_busts() {
    let mut game = stacked_game(
        &[action(FlipThree), n(3), n(3), n(8)],
        vec![Scripted::stayer(), Scripted::stayer()],
    );
    let result = game.play_round().unwrap();
    assert_eq!(result.busts, vec![0]);
    assert_eq!(draws_for(&result.events, 0), vec![n(3), n(3)]);
    assert!(result.events.contains(&RoundEvent::Bust { seat: 0, value: 3 }));
    assert_eq!(result.scores, vec![0, 8]);
}

#[test]
fn second_chance_absorbs_one_duplicate() {
    let mut game = stacked_game(
        &[action(SecondChance), n(5), n(9), n(9)],
        vec![Scripted::stayer(), Scripted::hits(&[true, false])],
    );
    let result = game.play_round().unwrap();
    assert!(result.events.contains(&RoundEvent::SecondChanceUsed { seat: 1, value: 9 }));
    assert!(result.busts.is_empty());
    assert_eq!(result.scores, vec![5, 9]);
    // the duplicate and the Second Chance itself
    assert_eq!(game.discarded(), 2);
    assert!(!game.players()[1].has_second_chance());
}

#[test]
fn extra_second_chance_is_passed_to_an_active_player() {
    let mut game = stacked_game(
        &[action(SecondChance), n(4), action(SecondChance), n(6)],
        vec![Scripted::stayer(), Scripted::stayer()],
    );
    let result = game.play_round().unwrap();
    assert!(result
        .events
        .contains(&RoundEvent::SecondChanceGiven { from: 1, to: 0 }));
    assert!(game.players()[0].has_second_chance());
    assert!(game.players()[1].has_second_chance());
    assert_eq!(result.scores, vec![4, 6]);
    assert_eq!(game.discarded(), 0);
}

#[test]
fn second_chance_with_no_recipient_is_discarded() {
    let mut game = stacked_game(
        &[
            action(SecondChance),
            action(SecondChance),
            action(SecondChance),
            n(3),
            n(7),
        ],
        vec![Scripted::stayer(), Scripted::stayer()],
    );
    let result = game.play_round().unwrap();
    assert!(result
        .events
        .contains(&RoundEvent::SecondChanceDiscarded { seat: 1 }));
    assert_eq!(result.scores, vec![3, 7]);
    assert_eq!(game.discarded(), 1);
    assert!(game.verify_conservation().is_ok());
}

#[test]
fn flip7_ends_the_round_for_everyone() {
    let top = [
        n(0),
        n(12),
        n(11),
        n(1),
        n(10),
        n(2),
        n(9),
        n(3),
        n(8),
        n(4),
        n(7),
        n(5),
        n(12),
        n(6),
    ];
    let mut game = stacked_game(
        &top,
        vec![
            Scripted::hits(&[true; 5]),
            Scripted::hits(&[true; 6]),
            Scripted::stayer(),
        ],
    );
    let result = game.play_round().unwrap();
    assert_eq!(result.flip7, Some(1));
    assert!(result.events.contains(&RoundEvent::Flip7 { seat: 1 }));
    assert_eq!(result.scores, vec![57, 36, 12]);
    assert_eq!(game.players()[0].state(), PlayerState::Stayed);
    assert_eq!(game.players()[0].hand().len(), 6);
}

#[test]
fn lone_active_player_freezes_itself() {
    let mut game = stacked_game(
        &[action(Freeze), action(Freeze)],
        vec![Scripted::stayer(), Scripted::stayer()],
    );
    let result = game.play_round().unwrap();
    assert!(result.events.contains(&RoundEvent::Action {
        seat: 1,
        action: Freeze,
        target: 1
    }));
    assert_eq!(result.scores, vec![0, 0]);
}

#[test]
fn flip_three_goes_to_chosen_target() {
    let mut game = stacked_game(
        &[action(FlipThree), n(1), n(2), n(3), n(4), n(11), n(10)],
        vec![
            Scripted::stayer(),
            Scripted::stayer().targeting(2),
            Scripted::stayer(),
        ],
    );
    let result = game.play_round().unwrap();
    // three from the action, then its own initial deal
    assert_eq!(draws_for(&result.events, 2), vec![n(1), n(2), n(3), n(4)]);
    // seat 1 is forced to draw again after its action card
    assert_eq!(result.scores, vec![11, 10, 10]);
}

/// Always aims at seat 0, even when that seat is out of the round.
struct AimsAtZero;

impl Strategy for AimsAtZero {
    fn name(&self) -> &str {
        "aims-at-zero"
    }
    fn decide_hit_or_stay(&mut self, _state: &GameState<'_>) -> Result<bool, GameError> {
        Ok(false)
    }
    fn choose_adversarial_target(
        &mut self,
        _state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        Ok(0)
    }
    fn choose_positive_target(
        &mut self,
        _state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        Err(GameError::NoEligibleRecipient)
    }
}

#[test]
fn inactive_adversarial_target_is_rejected() {
    let seats = vec![
        Seat::new("a", Box::new(Scripted::stayer())),
        Seat::new("b", Box::new(AimsAtZero)),
    ];
    let config = GameConfig {
        target_score: 200,
        seed: Some(5),
    };
    let deck = Deck::stacked_full(&[action(Freeze), action(Freeze)], 5);
    let mut game = Game::with_deck(seats, config, deck).unwrap();
    assert_eq!(
        game.play_round(),
        Err(GameError::InvalidTarget { seat: 0 })
    );
}

/// Fails the first target request, then behaves like a stayer.
struct LosesInputOnce {
    failed: bool,
}

impl Strategy for LosesInputOnce {
    fn name(&self) -> &str {
        "loses-input-once"
    }
    fn decide_hit_or_stay(&mut self, _state: &GameState<'_>) -> Result<bool, GameError> {
        Ok(false)
    }
    fn choose_adversarial_target(
        &mut self,
        state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        if !self.failed {
            self.failed = true;
            return Err(GameError::Decision("input closed".to_string()));
        }
        Ok(flip7_engine::strategy::first_other_active(state))
    }
    fn choose_positive_target(
        &mut self,
        _state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        Err(GameError::NoEligibleRecipient)
    }
}

fn physical_cards(game: &Game) -> usize {
    let in_hands: usize = game.players().iter().map(|p| p.hand_len()).sum();
    game.deck_remaining() + game.discarded() + in_hands
}

#[test]
fn failed_target_choice_still_discards_the_action_card() {
    for kind in [Freeze, FlipThree] {
        let seats = vec![
            Seat::new("a", Box::new(Scripted::stayer())),
            Seat::new("b", Box::new(LosesInputOnce { failed: false })),
        ];
        let config = GameConfig {
            target_score: 200,
            seed: Some(5),
        };
        let deck = Deck::stacked_full(&[action(kind)], 5);
        let mut game = Game::with_deck(seats, config, deck).unwrap();

        let err = game.play_round().unwrap_err();
        assert_eq!(err, GameError::Decision("input closed".to_string()));
        assert!(!err.is_fatal());
        assert_eq!(physical_cards(&game), 94, "{:?}", kind);
        assert_eq!(game.discarded(), 1);
        assert!(game.verify_conservation().is_ok());

        game.play_round().unwrap();
        assert_eq!(physical_cards(&game), 94, "{:?}", kind);
        assert!(game.verify_conservation().is_ok());
    }
}
