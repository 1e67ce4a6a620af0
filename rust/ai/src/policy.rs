use flip7_engine::cards::ActionKind;
use flip7_engine::errors::GameError;
use flip7_engine::game::GameState;
use flip7_engine::strategy::Strategy;
use tracing::trace;

use crate::hit::HitRule;
use crate::target::TargetRule;

/// Algorithmic seat controller: one hit rule plus one target rule for each
/// kind of action card.
///
/// Holds no state between decisions, so one instance can be reused across
/// games.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    name: String,
    hit: HitRule,
    adversarial: TargetRule,
    positive: TargetRule,
}

impl Policy {
    /// Policy with the usual targeting: freeze the leader, help the last
    /// place. The random hit rule targets at random too.
    pub fn new(hit: HitRule) -> Self {
        let (adversarial, positive) = match hit {
            HitRule::Random => (TargetRule::Random, TargetRule::Random),
            _ => (TargetRule::Leader, TargetRule::LastPlace),
        };
        Self {
            name: hit.label(),
            hit,
            adversarial,
            positive,
        }
    }

    pub fn with_targets(mut self, adversarial: TargetRule, positive: TargetRule) -> Self {
        self.adversarial = adversarial;
        self.positive = positive;
        self
    }

    pub fn hit_rule(&self) -> HitRule {
        self.hit
    }

    pub fn targets(&self) -> (TargetRule, TargetRule) {
        (self.adversarial, self.positive)
    }
}

impl Strategy for Policy {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide_hit_or_stay(&mut self, state: &GameState<'_>) -> Result<bool, GameError> {
        // a held Second Chance makes the next duplicate free
        if state.me().has_second_chance() {
            return Ok(true);
        }
        let hit = self.hit.wants_hit(state);
        trace!(policy = %self.name, seat = state.seat(), hit, "decision");
        Ok(hit)
    }

    fn choose_adversarial_target(
        &mut self,
        state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        Ok(self.adversarial.adversarial(state))
    }

    fn choose_positive_target(
        &mut self,
        state: &GameState<'_>,
        _action: ActionKind,
    ) -> Result<usize, GameError> {
        self.positive.positive(state)
    }
}
