use crate::cards::Card;
use crate::deck::Deck;
use crate::player::Player;

/// Read-only view of the table handed to a strategy for one decision.
///
/// Borrows the players, so nothing in it can be mutated by policy code.
/// The undrawn cards are copied and sorted: strategies see the multiset,
/// never the draw order. `seat` is the player the decision is for.
#[derive(Debug, Clone)]
pub struct GameState<'a> {
    round: u32,
    seat: usize,
    target_score: u32,
    players: &'a [Player],
    active: Vec<usize>,
    leader: Option<usize>,
    remaining: Vec<Card>,
    entropy: u64,
}

impl<'a> GameState<'a> {
    /// Builds the snapshot. When the draw pile is empty the discard pile is
    /// what the next draw will come from, so that is what gets exposed.
    pub fn capture(
        round: u32,
        seat: usize,
        target_score: u32,
        players: &'a [Player],
        deck: &'a Deck,
        entropy: u64,
    ) -> Self {
        let remaining = if deck.remaining() > 0 {
            deck.remaining_cards()
        } else {
            deck.discard_pile()
        };
        Self::from_parts(round, seat, target_score, players, remaining, entropy)
    }

    pub fn from_parts(
        round: u32,
        seat: usize,
        target_score: u32,
        players: &'a [Player],
        remaining: &[Card],
        entropy: u64,
    ) -> Self {
        let mut remaining = remaining.to_vec();
        remaining.sort_unstable();
        let active = players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, _)| i)
            .collect();
        // earliest seat wins ties
        let mut leader: Option<usize> = None;
        for (i, p) in players.iter().enumerate() {
            let score = effective(p);
            if leader.is_none_or(|l| score > effective(&players[l])) {
                leader = Some(i);
            }
        }
        Self {
            round,
            seat,
            target_score,
            players,
            active,
            leader,
            remaining,
            entropy,
        }
    }

    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn seat(&self) -> usize {
        self.seat
    }
    pub fn target_score(&self) -> u32 {
        self.target_score
    }
    pub fn players(&self) -> &'a [Player] {
        self.players
    }
    pub fn player(&self, seat: usize) -> Option<&'a Player> {
        self.players.get(seat)
    }

    /// The player this decision belongs to.
    pub fn me(&self) -> &'a Player {
        &self.players[self.seat]
    }

    /// Seats still active this round, in seat order.
    pub fn active_seats(&self) -> &[usize] {
        &self.active
    }

    /// Active seats other than the deciding player.
    pub fn other_active_seats(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().copied().filter(move |&s| s != self.seat)
    }

    pub fn is_active(&self, seat: usize) -> bool {
        self.active.contains(&seat)
    }

    /// Seat with the highest total plus projected round score.
    pub fn leader(&self) -> Option<usize> {
        self.leader
    }

    /// Total score plus the score the current hand would bank.
    pub fn effective_score(&self, seat: usize) -> u32 {
        self.players.get(seat).map(effective).unwrap_or(0)
    }

    /// Undrawn cards in sorted order, unrelated to the order they will be
    /// drawn in.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.remaining
    }

    pub fn cards_left(&self) -> usize {
        self.remaining.len()
    }

    /// Per-decision random value from the game's own stream.
    pub fn entropy(&self) -> u64 {
        self.entropy
    }

    /// Chance that the deciding player's next draw duplicates a held number.
    pub fn bust_probability(&self) -> f64 {
        bust_probability(self.me().numbers(), &self.remaining)
    }
}

fn effective(p: &Player) -> u32 {
    p.total_score() + p.round_score()
}

/// Fraction of `remaining` that are number cards already in `held`.
/// Zero when nothing is left to draw.
pub fn bust_probability(held: &[u8], remaining: &[Card]) -> f64 {
    if remaining.is_empty() {
        return 0.0;
    }
    let dupes = remaining
        .iter()
        .filter(|c| matches!(c, Card::Number(v) if held.contains(v)))
        .count();
    dupes as f64 / remaining.len() as f64
}
