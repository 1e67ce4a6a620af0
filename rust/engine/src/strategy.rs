use crate::cards::ActionKind;
use crate::errors::GameError;
use crate::game::GameState;

/// Decision boundary between the orchestrator and whoever controls a seat.
///
/// Implemented by algorithmic policies and by human-input adapters alike;
/// the orchestrator never knows which one it is driving. Targets are seat
/// indices into [`GameState::players`].
///
/// # Example Implementation
///
/// ```rust
/// use flip7_engine::cards::ActionKind;
/// use flip7_engine::errors::GameError;
/// use flip7_engine::game::GameState;
/// use flip7_engine::strategy::{first_other_active, Strategy};
///
/// struct StayOnTen;
///
/// impl Strategy for StayOnTen {
///     fn name(&self) -> &str {
///         "StayOnTen"
///     }
///     fn decide_hit_or_stay(&mut self, state: &GameState<'_>) -> Result<bool, GameError> {
///         Ok(state.me().round_score() < 10)
///     }
///     fn choose_adversarial_target(
///         &mut self,
///         state: &GameState<'_>,
///         _action: ActionKind,
///     ) -> Result<usize, GameError> {
///         Ok(first_other_active(state))
///     }
///     fn choose_positive_target(
///         &mut self,
///         state: &GameState<'_>,
///         _action: ActionKind,
///     ) -> Result<usize, GameError> {
///         state
///             .other_active_seats()
///             .find(|&s| !state.players()[s].has_second_chance())
///             .ok_or(GameError::NoEligibleRecipient)
///     }
/// }
/// ```
pub trait Strategy: Send {
    /// Label used in logs and result tables.
    fn name(&self) -> &str;

    /// `true` to hit, `false` to stay. Algorithmic variants must answer
    /// without blocking.
    fn decide_hit_or_stay(&mut self, state: &GameState<'_>) -> Result<bool, GameError>;

    /// Target for Freeze or Flip Three. Must be an active seat; with no other
    /// active seat the decider must pick itself.
    fn choose_adversarial_target(
        &mut self,
        state: &GameState<'_>,
        action: ActionKind,
    ) -> Result<usize, GameError>;

    /// Recipient for a Second Chance the decider cannot keep.
    /// Fails with [`GameError::NoEligibleRecipient`] when nobody can take it.
    fn choose_positive_target(
        &mut self,
        state: &GameState<'_>,
        action: ActionKind,
    ) -> Result<usize, GameError>;
}

/// First active seat other than the decider, or the decider itself.
pub fn first_other_active(state: &GameState<'_>) -> usize {
    state.other_active_seats().next().unwrap_or(state.seat())
}

/// Active seats other than the decider that do not hold a Second Chance.
pub fn second_chance_candidates(state: &GameState<'_>) -> Vec<usize> {
    state
        .other_active_seats()
        .filter(|&s| !state.players()[s].has_second_chance())
        .collect()
}

/// A named seat at the table.
pub struct Seat {
    pub name: String,
    pub strategy: Box<dyn Strategy>,
}

impl Seat {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }
}

impl std::fmt::Debug for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seat")
            .field("name", &self.name)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}
