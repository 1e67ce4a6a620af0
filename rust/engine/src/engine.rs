use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span};

use crate::cards::{ActionKind, Card};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::GameState;
use crate::logger::{RoundEvent, RoundRecord};
use crate::player::{CardOutcome, Player, PlayerState};
use crate::strategy::{Seat, Strategy};

/// Cumulative score that ends the game.
pub const DEFAULT_TARGET_SCORE: u32 = 200;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 18;

const FLIP_THREE_DRAWS: usize = 3;

/// Where the orchestrator is within a round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// One card to each seat, left of the dealer first
    DealInitial,
    /// Active seats hit or stay in turn order
    PlayerTurns,
    /// Round scores are banked
    ScoreRound,
    /// Some total reached the target score
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Total that ends the game
    pub target_score: u32,
    /// Seed for the deck and decision streams; random when `None`
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: DEFAULT_TARGET_SCORE,
            seed: None,
        }
    }
}

/// Outcome of one completed round.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number that was played
    pub round: u32,
    /// Dealer seat of that round
    pub dealer: usize,
    /// Banked score per seat (busted seats score 0)
    pub scores: Vec<u32>,
    /// Cumulative total per seat after banking
    pub totals: Vec<u32>,
    /// Seats that busted
    pub busts: Vec<usize>,
    /// Seat that achieved Flip 7, if any
    pub flip7: Option<usize>,
    /// Everything that happened, in order
    pub events: Vec<RoundEvent>,
}

impl RoundResult {
    pub fn to_record(&self, game_id: &str, seed: Option<u64>) -> RoundRecord {
        RoundRecord {
            game_id: game_id.to_string(),
            round: self.round,
            dealer: self.dealer,
            seed,
            events: self.events.clone(),
            scores: self.scores.clone(),
            totals: self.totals.clone(),
            busts: self.busts.clone(),
            flip7: self.flip7,
            ts: None,
        }
    }
}

/// Final result of a game played to the target score.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: usize,
    pub winner_name: String,
    pub totals: Vec<u32>,
    pub rounds: u32,
}

/// Round orchestrator.
///
/// Owns the deck, the players and the seat strategies. Drives turn order,
/// resolves action cards (recursively for Flip Three) and checks after every
/// card movement that no card has appeared or vanished.
///
/// # Examples
///
/// ```
/// use flip7_engine::engine::{Game, GameConfig};
/// use flip7_engine::strategy::Seat;
/// # use flip7_engine::cards::ActionKind;
/// # use flip7_engine::errors::GameError;
/// # use flip7_engine::game::GameState;
/// # use flip7_engine::strategy::{first_other_active, second_chance_candidates, Strategy};
/// # struct Cautious;
/// # impl Strategy for Cautious {
/// #     fn name(&self) -> &str { "cautious" }
/// #     fn decide_hit_or_stay(&mut self, s: &GameState<'_>) -> Result<bool, GameError> {
/// #         Ok(s.me().round_score() < 15)
/// #     }
/// #     fn choose_adversarial_target(&mut self, s: &GameState<'_>, _: ActionKind) -> Result<usize, GameError> {
/// #         Ok(first_other_active(s))
/// #     }
/// #     fn choose_positive_target(&mut self, s: &GameState<'_>, _: ActionKind) -> Result<usize, GameError> {
/// #         second_chance_candidates(s).first().copied().ok_or(GameError::NoEligibleRecipient)
/// #     }
/// # }
///
/// let seats = vec![
///     Seat::new("Ada", Box::new(Cautious)),
///     Seat::new("Bob", Box::new(Cautious)),
/// ];
/// let config = GameConfig { seed: Some(7), ..GameConfig::default() };
/// let mut game = Game::new(seats, config).expect("valid table");
///
/// let result = game.play_round().expect("round completes");
/// assert_eq!(result.round, 1);
/// assert_eq!(game.round(), 2);
/// assert!(game.verify_conservation().is_ok());
/// ```
pub struct Game {
    players: Vec<Player>,
    strategies: Vec<Box<dyn Strategy>>,
    deck: Deck,
    /// Decision entropy stream, separate from the deck's shuffle stream
    rng: ChaCha20Rng,
    config: GameConfig,
    seed: u64,
    original_total: usize,
    /// Drawn cards not yet placed in a hand or on the discard pile
    in_flight: usize,
    round: u32,
    dealer: usize,
    phase: RoundPhase,
    events: Vec<RoundEvent>,
    flip7: Option<usize>,
    last_round: Option<RoundResult>,
}

impl Game {
    pub fn new(seats: Vec<Seat>, config: GameConfig) -> Result<Self, GameError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::build(seats, config, Deck::new_with_seed(seed), seed)
    }

    /// Game over a prepared deck. Card conservation is checked against the
    /// number of cards the deck holds at this point.
    pub fn with_deck(seats: Vec<Seat>, config: GameConfig, deck: Deck) -> Result<Self, GameError> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::build(seats, config, deck, seed)
    }

    fn build(seats: Vec<Seat>, config: GameConfig, deck: Deck, seed: u64) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats.len()) {
            return Err(GameError::InvalidPlayerCount {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                actual: seats.len(),
            });
        }
        if config.target_score == 0 {
            return Err(GameError::InvalidTargetScore);
        }
        let (players, strategies): (Vec<Player>, Vec<Box<dyn Strategy>>) = seats
            .into_iter()
            .map(|s| (Player::new(s.name), s.strategy))
            .unzip();
        Ok(Self {
            players,
            strategies,
            original_total: deck.total(),
            deck,
            rng: ChaCha20Rng::seed_from_u64(seed.wrapping_add(1)),
            config,
            seed,
            in_flight: 0,
            round: 1,
            dealer: 0,
            phase: RoundPhase::DealInitial,
            events: Vec::new(),
            flip7: None,
            last_round: None,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn strategy_name(&self, seat: usize) -> Option<&str> {
        self.strategies.get(seat).map(|s| s.name())
    }
    /// Number of the next round to be played.
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn dealer(&self) -> usize {
        self.dealer
    }
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn target_score(&self) -> u32 {
        self.config.target_score
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn discarded(&self) -> usize {
        self.deck.discarded()
    }
    pub fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    /// Seats in turn order for the current dealer: left of the dealer first.
    pub fn turn_order(&self) -> Vec<usize> {
        let n = self.players.len();
        (1..=n).map(|i| (self.dealer + i) % n).collect()
    }

    /// Read-only snapshot for display, from the point of view of `seat`.
    /// `None` when no such seat exists.
    pub fn build_game_state(&self, seat: usize) -> Option<GameState<'_>> {
        if seat >= self.players.len() {
            return None;
        }
        Some(GameState::capture(
            self.round,
            seat,
            self.config.target_score,
            &self.players,
            &self.deck,
            0,
        ))
    }

    pub fn is_over(&self) -> bool {
        self.players
            .iter()
            .any(|p| p.total_score() >= self.config.target_score)
    }

    /// Winning seat once the game is over.
    ///
    /// Highest total wins; equal totals go to the higher final-round score,
    /// then to the earliest seat in the final round's turn order.
    pub fn winner(&self) -> Option<usize> {
        if !self.is_over() {
            return None;
        }
        let n = self.players.len();
        let (dealer, last_scores) = match &self.last_round {
            Some(r) => (r.dealer, r.scores.clone()),
            None => (self.dealer, vec![0; n]),
        };
        let key = |seat: usize| (self.players[seat].total_score(), last_scores[seat]);
        let mut best: Option<usize> = None;
        for seat in (1..=n).map(|i| (dealer + i) % n) {
            if best.is_none_or(|b| key(seat) > key(b)) {
                best = Some(seat);
            }
        }
        best
    }

    /// Cards in the draw pile, the discard pile, every hand, and in flight
    /// must add up to what the game started with.
    pub fn verify_conservation(&self) -> Result<(), GameError> {
        let in_hands: usize = self.players.iter().map(Player::hand_len).sum();
        let found = self.deck.total() + in_hands + self.in_flight;
        if found != self.original_total {
            error!(
                expected = self.original_total,
                found,
                deck = self.deck.remaining(),
                discards = self.deck.discarded(),
                in_hands,
                in_flight = self.in_flight,
                "card conservation violated"
            );
            return Err(GameError::CardConservationViolation {
                expected: self.original_total,
                found,
            });
        }
        Ok(())
    }

    /// Plays one full round: reset, initial deal, turns, scoring.
    pub fn play_round(&mut self) -> Result<RoundResult, GameError> {
        if self.phase == RoundPhase::GameOver {
            return Err(GameError::GameAlreadyOver);
        }
        let span = info_span!("round", round = self.round, dealer = self.dealer);
        let _guard = span.enter();

        self.start_round()?;
        self.phase = RoundPhase::DealInitial;
        self.deal_initial()?;
        self.phase = RoundPhase::PlayerTurns;
        self.play_turns()?;
        self.phase = RoundPhase::ScoreRound;
        let result = self.score_round();
        self.verify_conservation()?;

        if self.is_over() {
            self.phase = RoundPhase::GameOver;
            info!(winner = ?self.winner(), rounds = result.round, "game over");
        } else {
            self.phase = RoundPhase::DealInitial;
        }
        Ok(result)
    }

    /// Plays rounds until some total reaches the target score.
    pub fn play_to_completion(&mut self) -> Result<GameOutcome, GameError> {
        while !self.is_over() {
            self.play_round()?;
        }
        let winner = self.winner().ok_or(GameError::GameAlreadyOver)?;
        Ok(GameOutcome {
            winner,
            winner_name: self.players[winner].name().to_string(),
            totals: self.players.iter().map(Player::total_score).collect(),
            rounds: self.last_round.as_ref().map_or(0, |r| r.round),
        })
    }

    fn start_round(&mut self) -> Result<(), GameError> {
        for p in &mut self.players {
            for card in p.reset_for_new_round() {
                self.deck.discard(card);
            }
        }
        self.events.clear();
        self.flip7 = None;
        self.verify_conservation()
    }

    fn deal_initial(&mut self) -> Result<(), GameError> {
        for seat in self.turn_order() {
            // an action card earlier in the deal may already have resolved this seat
            if !self.players[seat].is_active() {
                continue;
            }
            self.hit(seat)?;
        }
        Ok(())
    }

    fn play_turns(&mut self) -> Result<(), GameError> {
        while self.any_active() {
            for seat in self.turn_order() {
                if !self.players[seat].is_active() {
                    continue;
                }
                if !self.players[seat].has_number_cards() {
                    debug!(seat, "no number cards, forced hit");
                    self.hit(seat)?;
                    continue;
                }
                if self.ask_hit_or_stay(seat)? {
                    self.hit(seat)?;
                } else {
                    self.stay(seat);
                }
            }
        }
        Ok(())
    }

    fn score_round(&mut self) -> RoundResult {
        let mut scores = Vec::with_capacity(self.players.len());
        let mut busts = Vec::new();
        for (seat, p) in self.players.iter_mut().enumerate() {
            if p.state() == PlayerState::Busted {
                busts.push(seat);
            }
            scores.push(p.bank_round_score());
        }
        let totals: Vec<u32> = self.players.iter().map(Player::total_score).collect();
        info!(?scores, ?totals, ?busts, flip7 = ?self.flip7, "round scored");

        let result = RoundResult {
            round: self.round,
            dealer: self.dealer,
            scores,
            totals,
            busts,
            flip7: self.flip7,
            events: std::mem::take(&mut self.events),
        };
        self.dealer = (self.dealer + 1) % self.players.len();
        self.round += 1;
        self.last_round = Some(result.clone());
        result
    }

    fn any_active(&self) -> bool {
        self.players.iter().any(Player::is_active)
    }

    fn ask_hit_or_stay(&mut self, seat: usize) -> Result<bool, GameError> {
        let entropy = self.rng.next_u64();
        let state = GameState::capture(
            self.round,
            seat,
            self.config.target_score,
            &self.players,
            &self.deck,
            entropy,
        );
        self.strategies[seat].decide_hit_or_stay(&state)
    }

    fn choose_adversarial(&mut self, seat: usize, action: ActionKind) -> Result<usize, GameError> {
        let entropy = self.rng.next_u64();
        let state = GameState::capture(
            self.round,
            seat,
            self.config.target_score,
            &self.players,
            &self.deck,
            entropy,
        );
        let target = self.strategies[seat].choose_adversarial_target(&state, action)?;
        if !self.players.get(target).is_some_and(Player::is_active) {
            error!(seat, target, ?action, "strategy picked an inactive target");
            return Err(GameError::InvalidTarget { seat: target });
        }
        Ok(target)
    }

    fn choose_positive(&mut self, seat: usize, action: ActionKind) -> Result<usize, GameError> {
        let entropy = self.rng.next_u64();
        let state = GameState::capture(
            self.round,
            seat,
            self.config.target_score,
            &self.players,
            &self.deck,
            entropy,
        );
        self.strategies[seat].choose_positive_target(&state, action)
    }

    fn stay(&mut self, seat: usize) {
        self.players[seat].stay();
        let score = self.players[seat].round_score();
        debug!(seat, score, "stays");
        self.events.push(RoundEvent::Stay { seat, score });
    }

    /// Draws a card on behalf of `seat`. The card is in flight until it is
    /// placed in a hand or discarded.
    fn draw(&mut self, seat: usize) -> Result<Card, GameError> {
        let reshuffles = self.deck.reshuffle_count();
        let card = self.deck.draw().inspect_err(|e| {
            error!(seat, error = %e, "draw failed");
        })?;
        if self.deck.reshuffle_count() != reshuffles {
            self.events.push(RoundEvent::Reshuffle);
        }
        self.in_flight += 1;
        debug!(seat, %card, "draws");
        self.events.push(RoundEvent::Draw { seat, card });
        Ok(card)
    }

    fn discard(&mut self, card: Card) {
        self.in_flight -= 1;
        self.deck.discard(card);
    }

    /// Offers an in-flight card to a hand; it leaves flight only if the
    /// hand kept it.
    fn give(&mut self, seat: usize, card: Card) -> Result<CardOutcome, GameError> {
        let outcome = self.players[seat].add_card(card)?;
        if matches!(outcome, CardOutcome::Added | CardOutcome::Flip7Achieved) {
            self.in_flight -= 1;
        }
        Ok(outcome)
    }

    fn hit(&mut self, seat: usize) -> Result<(), GameError> {
        let card = self.draw(seat)?;
        self.handle_card(seat, card)
    }

    /// Routes a freshly drawn card: action cards are resolved, everything
    /// else goes to the hand. Reentrant through Flip Three.
    fn handle_card(&mut self, seat: usize, card: Card) -> Result<(), GameError> {
        match card {
            Card::Action(action) => self.resolve_action(seat, card, action)?,
            _ => {
                let outcome = self.give(seat, card)?;
                self.apply_outcome(seat, card, outcome)?;
            }
        }
        self.verify_conservation()
    }

    fn apply_outcome(
        &mut self,
        seat: usize,
        card: Card,
        outcome: CardOutcome,
    ) -> Result<(), GameError> {
        match outcome {
            CardOutcome::Added => {}
            CardOutcome::Flip7Achieved => {
                info!(seat, "flip 7");
                self.events.push(RoundEvent::Flip7 { seat });
                self.flip7 = Some(seat);
                self.end_round_for_flip7(seat);
            }
            CardOutcome::DuplicateBust(value) => {
                debug!(seat, value, "busts");
                self.events.push(RoundEvent::Bust { seat, value });
                self.discard(card);
            }
            CardOutcome::DuplicateAvoidable(value) => {
                let second_chance = self.players[seat].use_second_chance()?;
                debug!(seat, value, "second chance absorbs duplicate");
                self.events.push(RoundEvent::SecondChanceUsed { seat, value });
                self.deck.discard(second_chance);
                self.discard(card);
            }
            CardOutcome::SecondChanceAlreadyHeld => self.pass_second_chance(seat, card)?,
        }
        Ok(())
    }

    /// Everyone still active stays; the Flip 7 holder already has.
    fn end_round_for_flip7(&mut self, achiever: usize) {
        for (seat, p) in self.players.iter_mut().enumerate() {
            if seat != achiever && p.is_active() {
                p.stay();
            }
        }
    }

    fn resolve_action(&mut self, seat: usize, card: Card, action: ActionKind) -> Result<(), GameError> {
        match action {
            ActionKind::Freeze => {
                let target = match self.choose_adversarial(seat, action) {
                    Ok(t) => t,
                    Err(e) => {
                        self.discard(card);
                        return Err(e);
                    }
                };
                debug!(seat, target, "freeze");
                self.events.push(RoundEvent::Action {
                    seat,
                    action,
                    target,
                });
                self.players[target].stay();
                self.discard(card);
            }
            ActionKind::FlipThree => {
                let target = match self.choose_adversarial(seat, action) {
                    Ok(t) => t,
                    Err(e) => {
                        self.discard(card);
                        return Err(e);
                    }
                };
                debug!(seat, target, "flip three");
                self.events.push(RoundEvent::Action {
                    seat,
                    action,
                    target,
                });
                // the triggering card leaves flight even if a draw fails
                let drawn = self.flip_three(target);
                self.discard(card);
                drawn?;
            }
            ActionKind::SecondChance => {
                let outcome = self.give(seat, card)?;
                self.apply_outcome(seat, card, outcome)?;
            }
        }
        Ok(())
    }

    /// Up to three draws for the target of a Flip Three, stopping once it is
    /// no longer active or the deck runs dry.
    fn flip_three(&mut self, target: usize) -> Result<(), GameError> {
        for _ in 0..FLIP_THREE_DRAWS {
            if !self.players[target].is_active() {
                break;
            }
            let drawn = match self.draw(target) {
                Ok(c) => c,
                Err(GameError::DeckExhausted) => break,
                Err(e) => return Err(e),
            };
            self.handle_card(target, drawn)?;
        }
        Ok(())
    }

    /// Hands a Second Chance the drawer cannot keep to another seat, or
    /// discards it when nobody can take it. Never recurses.
    fn pass_second_chance(&mut self, seat: usize, card: Card) -> Result<(), GameError> {
        let target = match self.choose_positive(seat, ActionKind::SecondChance) {
            Ok(t) => t,
            Err(GameError::NoEligibleRecipient) => {
                debug!(seat, "no recipient for second chance");
                self.events.push(RoundEvent::SecondChanceDiscarded { seat });
                self.discard(card);
                return Ok(());
            }
            Err(e) => {
                self.discard(card);
                return Err(e);
            }
        };
        let eligible = self.players.get(target).is_some_and(Player::is_active);
        if eligible && self.give(target, card)? == CardOutcome::Added {
            debug!(seat, target, "second chance passed on");
            self.events.push(RoundEvent::SecondChanceGiven {
                from: seat,
                to: target,
            });
        } else {
            self.events.push(RoundEvent::SecondChanceDiscarded { seat });
            self.discard(card);
        }
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("players", &self.players)
            .field("round", &self.round)
            .field("dealer", &self.dealer)
            .field("phase", &self.phase)
            .field("deck_remaining", &self.deck.remaining())
            .field("discarded", &self.deck.discarded())
            .finish()
    }
}
