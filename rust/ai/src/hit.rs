//! Hit-or-stay rules.
//!
//! Every rule is a pure function of the [`GameState`] snapshot. Randomised
//! rules seed a local ChaCha stream from the snapshot's entropy, so the same
//! snapshot always yields the same answer.

use flip7_engine::cards::{Card, ModifierKind};
use flip7_engine::game::GameState;
use flip7_engine::player::{FLIP7_BONUS, FLIP7_COUNT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Deficit to the leader beyond which the adaptive rule takes more risk.
const ADAPTIVE_DEFICIT: u32 = 50;
/// How far the adaptive rule moves its bust threshold.
const ADAPTIVE_STEP: f64 = 0.1;
/// Below this round score the hybrid rule only guards against likely busts.
const HYBRID_OPENING: u32 = 10;
const HYBRID_OPENING_RISK: f64 = 0.5;
const HYBRID_RISK: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitRule {
    /// Hit until the round score reaches the threshold
    ScoreThreshold(u32),
    /// Hit while the chance of drawing a duplicate is below the threshold
    BustProbability(f64),
    /// Bust threshold that loosens when far behind and tightens when leading
    LeadAdaptive(f64),
    /// Hit while the average value of the next draw is positive
    ExpectedValue,
    /// Cheap bust guard early in the round, expected value afterwards
    Hybrid,
    /// Always hit, chasing the Flip 7 bonus
    AlwaysHit,
    /// Coin flip
    Random,
}

impl HitRule {
    /// Short label with the parameter, used to suffix computer names.
    pub fn label(&self) -> String {
        match self {
            HitRule::ScoreThreshold(n) => format!("score({})", n),
            HitRule::BustProbability(p) => format!("bust({:.2})", p),
            HitRule::LeadAdaptive(p) => format!("adapt({:.2})", p),
            HitRule::ExpectedValue => "ev".to_string(),
            HitRule::Hybrid => "hybrid".to_string(),
            HitRule::AlwaysHit => "hit".to_string(),
            HitRule::Random => "rand".to_string(),
        }
    }

    /// `true` to hit.
    pub fn wants_hit(&self, state: &GameState<'_>) -> bool {
        let me = state.me();
        let round_score = me.round_score();
        match *self {
            HitRule::ScoreThreshold(n) => round_score < n,
            HitRule::BustProbability(p) => state.bust_probability() < p,
            HitRule::LeadAdaptive(p) => {
                !reaches_target(state) && state.bust_probability() < adaptive_threshold(state, p)
            }
            HitRule::ExpectedValue => !reaches_target(state) && expected_gain(state) > 0.0,
            HitRule::Hybrid => {
                if reaches_target(state) {
                    false
                } else if round_score < HYBRID_OPENING {
                    state.bust_probability() < HYBRID_OPENING_RISK
                } else {
                    expected_gain(state) > 0.0 && state.bust_probability() < HYBRID_RISK
                }
            }
            HitRule::AlwaysHit => true,
            HitRule::Random => ChaCha20Rng::seed_from_u64(state.entropy()).random_bool(0.5),
        }
    }
}

/// Staying now would already end the game in the decider's favour.
fn reaches_target(state: &GameState<'_>) -> bool {
    state.effective_score(state.seat()) >= state.target_score()
}

fn adaptive_threshold(state: &GameState<'_>, base: f64) -> f64 {
    let mine = state.effective_score(state.seat());
    let threshold = match state.leader() {
        Some(l) if l == state.seat() => base - ADAPTIVE_STEP,
        Some(l) if state.effective_score(l).saturating_sub(mine) >= ADAPTIVE_DEFICIT => {
            base + ADAPTIVE_STEP
        }
        _ => base,
    };
    threshold.clamp(0.0, 1.0)
}

/// Average change in round score from drawing one more card.
///
/// A duplicate loses the whole round score. A new number adds its value
/// (doubled under x2) plus the Flip 7 bonus if it is the seventh. Action cards
/// count as zero.
pub fn expected_gain(state: &GameState<'_>) -> f64 {
    let remaining = state.remaining_cards();
    if remaining.is_empty() {
        return 0.0;
    }
    let me = state.me();
    let current = f64::from(me.round_score());
    let doubled = me.has_multiplier();
    let numbers_sum: u32 = me.numbers().iter().map(|&v| u32::from(v)).sum();
    let completes_flip7 = me.numbers().len() + 1 == FLIP7_COUNT;

    let total: f64 = remaining
        .iter()
        .map(|card| match *card {
            Card::Number(v) if me.holds_number(v) => -current,
            Card::Number(v) => {
                let mut gain = u32::from(v);
                if doubled {
                    gain *= 2;
                }
                if completes_flip7 {
                    gain += FLIP7_BONUS;
                }
                f64::from(gain)
            }
            Card::Modifier(ModifierKind::Times2) if !doubled => f64::from(numbers_sum),
            Card::Modifier(m) => f64::from(m.flat_points()),
            Card::Action(_) => 0.0,
        })
        .sum();
    total / remaining.len() as f64
}
