//! Text formatting for hands, round events and score tables.
//!
//! Pure functions; callers decide where the text goes.
//!
//! ## Example
//!
//! ```rust
//! use flip7_engine::cards::{Card, ModifierKind};
//! use flip7_engine::player::Player;
//! use flip7_cli::formatters::format_hand;
//!
//! let mut p = Player::new("Ada");
//! p.add_card(Card::Number(7)).unwrap();
//! p.add_card(Card::Modifier(ModifierKind::Plus4)).unwrap();
//! assert_eq!(format_hand(&p), "[7] [+4]");
//! ```

use flip7_engine::cards::ActionKind;
use flip7_engine::logger::RoundEvent;
use flip7_engine::player::{Player, PlayerState};

pub fn format_hand(player: &Player) -> String {
    let cards = player.hand();
    if cards.is_empty() {
        return "(no cards)".to_string();
    }
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_player_state(state: PlayerState) -> &'static str {
    match state {
        PlayerState::Active => "active",
        PlayerState::Stayed => "stayed",
        PlayerState::Busted => "BUSTED",
    }
}

fn action_name(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Freeze => "FREEZE",
        ActionKind::FlipThree => "FLIP THREE",
        ActionKind::SecondChance => "SECOND CHANCE",
    }
}

/// One human-readable line for a round event. `names` is indexed by seat.
pub fn format_event(event: &RoundEvent, names: &[String]) -> String {
    let name = |seat: usize| names.get(seat).map_or("?", String::as_str);
    match event {
        RoundEvent::Draw { seat, card } => format!("{} draws {}", name(*seat), card),
        RoundEvent::Stay { seat, score } => format!("{} stays with {} points", name(*seat), score),
        RoundEvent::Bust { seat, value } => format!("{} BUSTS on a second {}", name(*seat), value),
        RoundEvent::SecondChanceUsed { seat, value } => format!(
            "{} uses a Second Chance to discard the duplicate {}",
            name(*seat),
            value
        ),
        RoundEvent::Action {
            seat,
            action,
            target,
        } if seat == target => format!("{} plays {} on themself", name(*seat), action_name(*action)),
        RoundEvent::Action {
            seat,
            action,
            target,
        } => format!(
            "{} plays {} on {}",
            name(*seat),
            action_name(*action),
            name(*target)
        ),
        RoundEvent::SecondChanceGiven { from, to } => {
            format!("{} gives a Second Chance to {}", name(*from), name(*to))
        }
        RoundEvent::SecondChanceDiscarded { seat } => {
            format!("{} has nobody to give a Second Chance to; discarded", name(*seat))
        }
        RoundEvent::Flip7 { seat } => format!("*** {} FLIPS 7! (+15 bonus) ***", name(*seat)),
        RoundEvent::Reshuffle => "Discard pile reshuffled into the deck".to_string(),
    }
}

/// Fixed-width table of round scores and totals.
pub fn format_score_table(names: &[String], scores: &[u32], totals: &[u32]) -> Vec<String> {
    let width = names.iter().map(|n| n.len()).max().unwrap_or(0).max(6);
    let mut lines = vec![format!(
        "{:<width$} {:>6} {:>6}",
        "PLAYER",
        "ROUND",
        "TOTAL",
        width = width
    )];
    for ((name, score), total) in names.iter().zip(scores).zip(totals) {
        lines.push(format!(
            "{:<width$} {:>6} {:>6}",
            name,
            score,
            total,
            width = width
        ));
    }
    lines
}

/// Label for a simulated win rate, in percent.
pub fn performance_label(rate: f64) -> &'static str {
    if rate >= 50.0 {
        "DOMINANT"
    } else if rate >= 35.0 {
        "STRONG"
    } else if rate >= 20.0 {
        "DECENT"
    } else {
        "WEAK"
    }
}
