//! # flip7-ai: Policy Library for Flip 7
//!
//! Algorithmic seat controllers implementing the engine's
//! [`Strategy`](flip7_engine::strategy::Strategy) contract.
//!
//! ## Core Components
//!
//! - [`hit`] - Hit-or-stay rules (score threshold, bust probability, expected value, ...)
//! - [`target`] - Target rules for Freeze, Flip Three and spare Second Chances
//! - [`policy`] - [`Policy`], a hit rule plus target rules, with the Second Chance override
//! - [`create_policy`] - Factory parsing policy specs such as `"score:25"`
//!
//! ## Quick Start
//!
//! ```rust
//! use flip7_ai::create_policy;
//! use flip7_engine::engine::{Game, GameConfig};
//! use flip7_engine::strategy::Seat;
//!
//! let seats = vec![
//!     Seat::new("HAL", Box::new(create_policy("score:25").unwrap())),
//!     Seat::new("EVE", Box::new(create_policy("ev").unwrap())),
//! ];
//! let config = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut game = Game::new(seats, config).expect("valid table");
//! let outcome = game.play_to_completion().expect("game completes");
//! assert!(outcome.totals[outcome.winner] >= 200);
//! ```
//!
//! ## Policy Specs
//!
//! See [`POLICIES`] for every accepted spec.

pub mod hit;
pub mod policy;
pub mod target;

pub use hit::HitRule;
pub use policy::Policy;
pub use target::TargetRule;

use thiserror::Error;

/// Spec used when nothing else is configured.
pub const DEFAULT_POLICY: &str = "ev";

/// Accepted policy specs with a one-line description each.
pub const POLICIES: &[(&str, &str)] = &[
    ("score:N", "Hit until the round score reaches N (1-100)"),
    ("bust:P", "Hit while the bust probability is below P (0.1-0.5)"),
    ("adaptive:P", "Bust threshold P, looser when far behind, tighter when leading"),
    ("ev", "Hit while the expected value of the next card is positive"),
    ("hybrid", "Bust guard early in the round, expected value afterwards"),
    ("hit", "Always hit (chases Flip 7)"),
    ("random", "Coin flip, random targets"),
];

#[derive(Debug, Error, PartialEq)]
pub enum PolicyError {
    #[error("Unknown policy: {0}")]
    Unknown(String),
    #[error("Invalid parameter for {policy}: {reason}")]
    InvalidParameter { policy: String, reason: String },
}

/// Builds a policy from a spec string.
///
/// # Example
///
/// ```rust
/// use flip7_ai::{create_policy, HitRule};
///
/// let policy = create_policy("bust:0.3").unwrap();
/// assert_eq!(policy.hit_rule(), HitRule::BustProbability(0.3));
/// assert!(create_policy("telepathy").is_err());
/// ```
pub fn create_policy(spec: &str) -> Result<Policy, PolicyError> {
    let spec = spec.trim().to_ascii_lowercase();
    let (kind, param) = match spec.split_once(':') {
        Some((k, p)) => (k, Some(p)),
        None => (spec.as_str(), None),
    };
    let rule = match (kind, param) {
        ("score", Some(p)) => HitRule::ScoreThreshold(parse_score(kind, p)?),
        ("score", None) => HitRule::ScoreThreshold(25),
        ("bust", Some(p)) => HitRule::BustProbability(parse_probability(kind, p, 0.1, 0.5)?),
        ("bust", None) => HitRule::BustProbability(0.33),
        ("adaptive", Some(p)) => HitRule::LeadAdaptive(parse_probability(kind, p, 0.0, 1.0)?),
        ("adaptive", None) => HitRule::LeadAdaptive(0.3),
        ("ev", None) => HitRule::ExpectedValue,
        ("hybrid", None) => HitRule::Hybrid,
        ("hit", None) => HitRule::AlwaysHit,
        ("random", None) => HitRule::Random,
        _ => return Err(PolicyError::Unknown(spec.clone())),
    };
    Ok(Policy::new(rule))
}

fn parse_score(policy: &str, raw: &str) -> Result<u32, PolicyError> {
    let invalid = |reason: &str| PolicyError::InvalidParameter {
        policy: policy.to_string(),
        reason: reason.to_string(),
    };
    let n: u32 = raw.parse().map_err(|_| invalid("expected a whole number"))?;
    if !(1..=100).contains(&n) {
        return Err(invalid("must be between 1 and 100"));
    }
    Ok(n)
}

fn parse_probability(policy: &str, raw: &str, min: f64, max: f64) -> Result<f64, PolicyError> {
    let invalid = |reason: String| PolicyError::InvalidParameter {
        policy: policy.to_string(),
        reason,
    };
    let p: f64 = raw
        .parse()
        .map_err(|_| invalid("expected a decimal number".to_string()))?;
    if !(min..=max).contains(&p) {
        return Err(invalid(format!("must be between {} and {}", min, max)));
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flip7_engine::strategy::Strategy;

    #[test]
    fn every_listed_spec_parses() {
        for (spec, _) in POLICIES {
            let concrete = spec.replace('N', "20").replace('P', "0.25");
            assert!(create_policy(&concrete).is_ok(), "{} failed", concrete);
        }
        assert!(create_policy(DEFAULT_POLICY).is_ok());
    }

    #[test]
    fn parameters_are_validated() {
        assert!(matches!(
            create_policy("score:0"),
            Err(PolicyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            create_policy("bust:0.9"),
            Err(PolicyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            create_policy("score:abc"),
            Err(PolicyError::InvalidParameter { .. })
        ));
        assert_eq!(
            create_policy("ev:3"),
            Err(PolicyError::Unknown("ev:3".to_string()))
        );
    }

    #[test]
    fn specs_are_case_insensitive_and_named() {
        let p = create_policy(" Score:30 ").unwrap();
        assert_eq!(p.name(), "score(30)");
        assert_eq!(create_policy("adaptive").unwrap().name(), "adapt(0.30)");
    }
}
