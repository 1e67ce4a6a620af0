//! Target selection for action cards.

use flip7_engine::errors::GameError;
use flip7_engine::game::GameState;
use flip7_engine::strategy::second_chance_candidates;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// Seat with the highest total plus round score
    Leader,
    /// Seat with the lowest total plus round score
    LastPlace,
    /// Any eligible seat, picked from the snapshot's entropy
    Random,
}

impl TargetRule {
    /// Target for Freeze or Flip Three: another active seat, or the decider
    /// itself when nobody else is left.
    pub fn adversarial(&self, state: &GameState<'_>) -> usize {
        let others: Vec<usize> = state.other_active_seats().collect();
        self.pick(state, &others).unwrap_or(state.seat())
    }

    /// Recipient for a spare Second Chance: another active seat that does
    /// not already hold one.
    pub fn positive(&self, state: &GameState<'_>) -> Result<usize, GameError> {
        let candidates = second_chance_candidates(state);
        self.pick(state, &candidates)
            .ok_or(GameError::NoEligibleRecipient)
    }

    fn pick(&self, state: &GameState<'_>, seats: &[usize]) -> Option<usize> {
        match self {
            // first seat wins ties
            TargetRule::Leader => seats.iter().copied().reduce(|best, s| {
                if state.effective_score(s) > state.effective_score(best) {
                    s
                } else {
                    best
                }
            }),
            TargetRule::LastPlace => seats.iter().copied().reduce(|best, s| {
                if state.effective_score(s) < state.effective_score(best) {
                    s
                } else {
                    best
                }
            }),
            TargetRule::Random => {
                if seats.is_empty() {
                    return None;
                }
                let mut rng = ChaCha20Rng::seed_from_u64(state.entropy());
                Some(seats[rng.random_range(0..seats.len())])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flip7_engine::cards::{ActionKind, Card};
    use flip7_engine::player::Player;

    fn holding(values: &[u8]) -> Player {
        let mut p = Player::new("p");
        for &v in values {
            p.add_card(Card::Number(v)).unwrap();
        }
        p
    }

    #[test]
    fn leader_and_last_place_skip_the_decider() {
        let players = vec![holding(&[12]), holding(&[5]), holding(&[9]), holding(&[2])];
        let state = GameState::from_parts(1, 0, 200, &players, &[], 0);
        assert_eq!(TargetRule::Leader.adversarial(&state), 2);
        assert_eq!(TargetRule::LastPlace.adversarial(&state), 3);
    }

    #[test]
    fn only_other_active_seat_is_chosen() {
        let mut players = vec![holding(&[12]), holding(&[5]), holding(&[9])];
        players[2].stay();
        let state = GameState::from_parts(1, 0, 200, &players, &[], 0);
        for rule in [TargetRule::Leader, TargetRule::LastPlace, TargetRule::Random] {
            assert_eq!(rule.adversarial(&state), 1);
        }
    }

    #[test]
    fn alone_means_self_target() {
        let mut players = vec![holding(&[12]), holding(&[5])];
        players[1].stay();
        let state = GameState::from_parts(1, 0, 200, &players, &[], 0);
        assert_eq!(TargetRule::Leader.adversarial(&state), 0);
        assert_eq!(TargetRule::Random.adversarial(&state), 0);
    }

    #[test]
    fn positive_target_skips_second_chance_holders() {
        let mut players = vec![holding(&[1]), holding(&[2]), holding(&[3])];
        players[1]
            .add_card(Card::Action(ActionKind::SecondChance))
            .unwrap();
        let state = GameState::from_parts(1, 0, 200, &players, &[], 0);
        assert_eq!(TargetRule::LastPlace.positive(&state), Ok(2));

        players[2]
            .add_card(Card::Action(ActionKind::SecondChance))
            .unwrap();
        let state = GameState::from_parts(1, 0, 200, &players, &[], 0);
        assert_eq!(
            TargetRule::LastPlace.positive(&state),
            Err(GameError::NoEligibleRecipient)
        );
    }
}
