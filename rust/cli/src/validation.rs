//! Input parsing for the interactive `play` command.
//!
//! Parsers never fail hard: anything unrecognised comes back as
//! [`ParseResult::Invalid`] with a message to show before re-prompting.

/// Outcome of parsing one line typed by a human player.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult<T> {
    /// A valid answer
    Choice(T),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parses a hit-or-stay answer. `true` means hit.
///
/// Accepts (case-insensitive) "h"/"hit", "s"/"stay", and "q"/"quit".
///
/// # Example
///
/// ```rust
/// # use flip7_cli::validation::{parse_hit_or_stay, ParseResult};
/// assert_eq!(parse_hit_or_stay("H"), ParseResult::Choice(true));
/// assert_eq!(parse_hit_or_stay("stay"), ParseResult::Choice(false));
/// assert_eq!(parse_hit_or_stay("quit"), ParseResult::Quit);
/// assert!(matches!(parse_hit_or_stay("maybe"), ParseResult::Invalid(_)));
/// ```
pub fn parse_hit_or_stay(input: &str) -> ParseResult<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => ParseResult::Invalid("Empty input".to_string()),
        "h" | "hit" => ParseResult::Choice(true),
        "s" | "stay" => ParseResult::Choice(false),
        "q" | "quit" => ParseResult::Quit,
        other => ParseResult::Invalid(format!(
            "Unrecognized answer '{}'. Enter h (hit) or s (stay)",
            other
        )),
    }
}

/// Parses a 1-based position into `seats` and returns the seat it names.
pub fn parse_seat_choice(input: &str, seats: &[usize]) -> ParseResult<usize> {
    let input = input.trim().to_lowercase();
    if input == "q" || input == "quit" {
        return ParseResult::Quit;
    }
    let Ok(n) = input.parse::<usize>() else {
        return ParseResult::Invalid(format!("'{}' is not a number", input));
    };
    match n.checked_sub(1).and_then(|i| seats.get(i)) {
        Some(&seat) => ParseResult::Choice(seat),
        None => ParseResult::Invalid(format!("Choose a number between 1 and {}", seats.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_or_stay_accepts_short_and_long_forms() {
        assert_eq!(parse_hit_or_stay("h"), ParseResult::Choice(true));
        assert_eq!(parse_hit_or_stay(" HIT "), ParseResult::Choice(true));
        assert_eq!(parse_hit_or_stay("s"), ParseResult::Choice(false));
        assert_eq!(parse_hit_or_stay("q"), ParseResult::Quit);
    }

    #[test]
    fn hit_or_stay_rejects_everything_else() {
        match parse_hit_or_stay("") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Empty")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
        match parse_hit_or_stay("fold") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn seat_choice_maps_position_to_seat() {
        let seats = [2, 5, 7];
        assert_eq!(parse_seat_choice("1", &seats), ParseResult::Choice(2));
        assert_eq!(parse_seat_choice("3", &seats), ParseResult::Choice(7));
        assert!(matches!(parse_seat_choice("0", &seats), ParseResult::Invalid(_)));
        assert!(matches!(parse_seat_choice("4", &seats), ParseResult::Invalid(_)));
        assert!(matches!(parse_seat_choice("two", &seats), ParseResult::Invalid(_)));
        assert_eq!(parse_seat_choice("quit", &seats), ParseResult::Quit);
    }
}
