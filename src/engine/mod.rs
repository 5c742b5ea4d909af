//! The engine facade hosts drive a match through.
//!
//! ## Turn Cycle
//!
//! For every accepted action:
//! 1. The move validator checks the play (nothing changes on rejection)
//! 2. The effect resolver applies it, drawing through the pile manager
//! 3. The arbiter places any seat that emptied its hand
//! 4. The scheduler hands the turn to the next unfinished seat
//!
//! Computer-controlled seats are advanced with `advance_ai_turn` (or
//! `run_ai_turns`); the host decides when, so it can add "thinking" delays.
//!
//! ## Example
//!
//! ```
//! use take_two::engine::EngineBuilder;
//!
//! let mut engine = EngineBuilder::new(3).seed(11).human_seats(vec![]).build().unwrap();
//! engine.run_ai_turns().unwrap();
//!
//! assert!(engine.is_game_over());
//! assert_eq!(engine.rankings().len(), 3);
//! assert!(engine.state().is_conserved());
//! ```

mod builder;
pub mod events;

pub use builder::EngineBuilder;
pub use events::{EventLog, GameEvent, Notifier, NullNotifier};

use tracing::{debug, info, warn};

use crate::ai::{Decision, Strategist};
use crate::core::action::{Action, Play};
use crate::core::card::{Card, Rank, Suit};
use crate::core::config::GameConfig;
use crate::core::seat::Seat;
use crate::core::state::GameState;
use crate::error::{ConfigError, MoveError};
use crate::piles::DrawOutcome;
use crate::rules::{validate, Arbiter, CardEffect, EffectResolver, FinishCheck, GameResult, Resolution};
use crate::stats::{unix_millis, MatchReport, SeatResult, StatsReporter};

/// Upper bound on turns `run_ai_turns` takes in one call.
pub const MAX_AI_TURNS: usize = 10_000;

/// What an accepted play did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub play: Play,
    pub effect: CardEffect,

    /// Cards the acting seat drew (single Queen or finishing rule).
    pub drawn: DrawOutcome,

    pub finish: FinishCheck,

    /// Seats placed by this play, in order.
    pub placed: Vec<Seat>,

    /// Seat whose turn it is now.
    pub next_seat: Seat,
}

/// What a computer-controlled seat did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiTurn {
    Played(PlayOutcome),
    Drew(DrawOutcome),
    Passed,
}

/// A single match.
pub struct Engine {
    state: GameState,
    config: GameConfig,
    strategist: Box<dyn Strategist>,
    reporter: Box<dyn StatsReporter>,
    notifier: Box<dyn Notifier>,

    /// Unix time in milliseconds when the match was dealt.
    start_ms: u64,

    /// The match report has been sent.
    reported: bool,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("start_ms", &self.start_ms)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Start a match with default collaborators; seat 0 is human.
    ///
    /// ```
    /// use take_two::core::Seat;
    /// use take_two::engine::Engine;
    ///
    /// let engine = Engine::new_game(2, 5, Some(3)).unwrap();
    /// assert!(!engine.is_ai_seat(Seat::new(0)));
    /// assert!(!engine.is_game_over());
    /// ```
    pub fn new_game(player_count: usize, hand_size: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        let mut builder = EngineBuilder::new(player_count).hand_size(hand_size);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        builder.build()
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state, for hosts and tests that set up a specific position.
    ///
    /// Callers must keep all 52 cards accounted for.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn current_seat(&self) -> Seat {
        self.state.current
    }

    /// Seats placed so far, first place first.
    #[must_use]
    pub fn rankings(&self) -> &[Seat] {
        &self.state.rankings
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// Final placement, once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        Arbiter::result(&self.state)
    }

    /// Check if the strategist plays this seat.
    #[must_use]
    pub fn is_ai_seat(&self, seat: Seat) -> bool {
        seat.index() < self.state.player_count() && !self.config.is_human(seat)
    }

    /// Legal plays for a seat right now (Aces without a chosen suit).
    ///
    /// Empty for a seat that is not at the table.
    #[must_use]
    pub fn legal_plays(&self, seat: Seat) -> Vec<Play> {
        if seat.index() >= self.state.player_count() {
            return Vec::new();
        }
        crate::rules::legal_plays(self.state.hand(seat), &self.state.table)
    }

    // === Host Operations ===

    /// Play one card or a Queen pair.
    ///
    /// `chosen_suit` is required when the play ends on an Ace and ignored
    /// otherwise. On rejection nothing changes.
    pub fn submit_move(
        &mut self,
        seat: Seat,
        cards: &[Card],
        chosen_suit: Option<Suit>,
    ) -> Result<PlayOutcome, MoveError> {
        self.check_turn(seat)?;

        if let Some(&missing) = cards.iter().find(|&&c| !self.state.players[seat].holds(c)) {
            return Err(MoveError::CardNotHeld(missing));
        }

        let play = Play::from_cards(cards, chosen_suit);
        let kind = validate(&play, &self.state.table)?;

        self.state.opening_color_open = false;

        let resolution = EffectResolver::resolve(&mut self.state, seat, &play, kind);
        self.state.players[seat].moves_played += 1;
        self.state.record(seat, Action::Play(play.clone()));
        self.strategist.observe_play(seat, &play.cards);

        debug!(%seat, cards = ?play.cards, turn = self.state.turn_number, "play accepted");
        self.announce_resolution(seat, &resolution);

        let placed = self.settle();
        let next_seat = self.advance_turn(seat);

        Ok(PlayOutcome {
            play,
            effect: resolution.effect,
            drawn: resolution.drawn,
            finish: resolution.finish,
            placed,
            next_seat,
        })
    }

    /// Draw instead of playing.
    ///
    /// Draws the whole pending penalty (clearing it) when one is owed,
    /// otherwise one card. The turn passes either way.
    pub fn request_draw(&mut self, seat: Seat) -> Result<DrawOutcome, MoveError> {
        self.check_turn(seat)?;
        if self.state.table.pending_skip {
            return Err(MoveError::SkipPending);
        }

        self.state.opening_color_open = false;

        let penalty = self.state.table.pending_penalty;
        let count = if penalty > 0 { penalty as usize } else { 1 };

        let outcome = self.state.piles.draw(seat, count);
        self.state.give_cards(seat, &outcome.cards);
        self.announce_draw(seat, &outcome);

        if penalty > 0 {
            self.state.table.pending_penalty = 0;
            self.notify(GameEvent::PenaltyDrawn {
                seat,
                count: outcome.received(),
            });
        }

        EffectResolver::expire_shadow(&mut self.state);
        self.state.record(
            seat,
            Action::Draw {
                requested: outcome.requested,
                received: outcome.received(),
            },
        );
        self.strategist.observe_draw(seat);

        debug!(%seat, requested = count, received = outcome.received(), "draw accepted");
        self.advance_turn(seat);

        Ok(outcome)
    }

    /// Accept an owed skip.
    pub fn pass_turn(&mut self, seat: Seat) -> Result<(), MoveError> {
        self.check_turn(seat)?;
        if !self.state.table.pending_skip {
            return Err(MoveError::NothingToPass);
        }

        self.state.opening_color_open = false;
        self.state.table.pending_skip = false;
        EffectResolver::expire_shadow(&mut self.state);
        self.state.record(seat, Action::Pass);
        self.notify(GameEvent::SkipConsumed { seat });

        debug!(%seat, "skip consumed");
        self.advance_turn(seat);
        Ok(())
    }

    /// Name the color for an opening Ace (human seat, before its first action).
    pub fn choose_opening_color(&mut self, seat: Seat, suit: Suit) -> Result<(), MoveError> {
        if !self.state.opening_color_open {
            return Err(MoveError::OpeningColorClosed);
        }
        let first = self.state.seating.first();
        if seat != first {
            return Err(MoveError::NotYourTurn { seat, current: first });
        }

        self.state.opening_color_open = false;
        self.state.table.active_color = suit;
        self.notify(GameEvent::ColorChanged { suit });
        debug!(%seat, %suit, "opening color chosen");
        Ok(())
    }

    /// Let the strategist act for a computer-controlled seat.
    ///
    /// A play the rules reject is logged and replaced with a draw (or a
    /// pass when a skip is owed).
    pub fn advance_ai_turn(&mut self, seat: Seat) -> Result<AiTurn, MoveError> {
        self.check_turn(seat)?;
        if !self.is_ai_seat(seat) {
            return Err(MoveError::NotAiSeat(seat));
        }

        match self.strategist.decide(&self.state, seat) {
            Decision::Play(play) => match self.submit_move(seat, &play.cards, play.chosen_suit) {
                Ok(outcome) => Ok(AiTurn::Played(outcome)),
                Err(err) => {
                    warn!(%seat, %err, cards = ?play.cards, "strategist play rejected, falling back");
                    if self.state.table.pending_skip {
                        self.pass_turn(seat).map(|()| AiTurn::Passed)
                    } else {
                        self.request_draw(seat).map(AiTurn::Drew)
                    }
                }
            },
            Decision::Draw => self.request_draw(seat).map(AiTurn::Drew),
            Decision::Pass => self.pass_turn(seat).map(|()| AiTurn::Passed),
        }
    }

    /// Advance computer-controlled seats until a human seat is active or the
    /// match ends. Returns the turns taken.
    pub fn run_ai_turns(&mut self) -> Result<Vec<(Seat, AiTurn)>, MoveError> {
        let mut turns = Vec::new();

        while !self.is_game_over() && self.is_ai_seat(self.state.current) {
            if turns.len() >= MAX_AI_TURNS {
                warn!(turns = turns.len(), "AI turn limit reached");
                break;
            }
            let seat = self.state.current;
            let turn = self.advance_ai_turn(seat)?;
            turns.push((seat, turn));
        }

        Ok(turns)
    }

    // === Internals ===

    fn check_turn(&self, seat: Seat) -> Result<(), MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        if seat.index() >= self.state.player_count() {
            return Err(MoveError::NotYourTurn {
                seat,
                current: self.state.current,
            });
        }
        if self.state.is_finished(seat) {
            return Err(MoveError::SeatFinished(seat));
        }
        if seat != self.state.current {
            return Err(MoveError::NotYourTurn {
                seat,
                current: self.state.current,
            });
        }
        Ok(())
    }

    /// Hand the turn to the next unfinished seat after `from`.
    fn advance_turn(&mut self, from: Seat) -> Seat {
        if let Some(next) = self.state.next_seat(from) {
            self.state.current = next;
        }
        self.state.turn_number += 1;

        debug!(seat = %self.state.current, turn = self.state.turn_number, "turn advanced");
        self.state.current
    }

    /// Place finished seats; report the match once it is over.
    fn settle(&mut self) -> Vec<Seat> {
        let placed = Arbiter::settle(&mut self.state);

        for &seat in &placed {
            let rank = self.state.players[seat].finish_rank.unwrap_or(self.state.rankings.len());
            self.notify(GameEvent::SeatFinished { seat, rank });
        }

        if self.state.is_over() && !self.reported {
            self.reported = true;
            self.report_match();
        }

        placed
    }

    fn report_match(&mut self) {
        let seat_results = self
            .state
            .rankings
            .iter()
            .enumerate()
            .map(|(i, &seat)| {
                let player = &self.state.players[seat];
                SeatResult {
                    seat,
                    finish_rank: player.finish_rank.unwrap_or(i + 1),
                    moves_played: player.moves_played,
                    human: self.config.is_human(seat),
                }
            })
            .collect();

        let report = MatchReport {
            seat_results,
            start_ms: self.start_ms,
            end_ms: unix_millis(),
            hand_size: self.state.hand_size,
            num_players: self.state.player_count(),
        };

        info!(rankings = ?self.state.rankings, duration_ms = report.duration_ms(), "match complete");
        self.reporter.report(&report);
        self.notify(GameEvent::GameOver {
            rankings: self.state.rankings.clone(),
        });
    }

    fn notify(&mut self, event: GameEvent) {
        self.notifier.notify(&event);
    }

    fn announce_draw(&mut self, seat: Seat, outcome: &DrawOutcome) {
        if outcome.recycled {
            self.notify(GameEvent::Recycled);
        }
        if outcome.exhausted {
            self.notify(GameEvent::StockExhausted {
                seat,
                requested: outcome.requested,
                received: outcome.received(),
            });
        }
    }

    fn announce_resolution(&mut self, seat: Seat, resolution: &Resolution) {
        match &resolution.effect {
            CardEffect::Penalty { .. } => self.notify(GameEvent::PenaltyIncreased {
                total: self.state.table.pending_penalty,
            }),
            CardEffect::Skip => self.notify(GameEvent::SkipImposed { by: seat }),
            CardEffect::ChooseColor { suit } => self.notify(GameEvent::ColorChanged { suit: *suit }),
            CardEffect::QueenPair { shadow } => self.notify(GameEvent::QueenPair { seat, queen: *shadow }),
            CardEffect::QueenPenalty { .. } => self.notify(GameEvent::QueenPenalty { seat }),
            CardEffect::Plain => {}
        }

        self.announce_draw(seat, &resolution.drawn);

        if let FinishCheck::PowerCardBlocked { drawn } = resolution.finish {
            debug!(%seat, %drawn, "finish on a power card blocked");
            self.notify(GameEvent::FinishBlocked { seat });
        }
    }

    /// Forced draw for the first seat before play starts.
    fn opening_draw(&mut self, seat: Seat, count: usize) -> DrawOutcome {
        let outcome = self.state.piles.draw(seat, count);
        self.state.give_cards(seat, &outcome.cards);
        self.announce_draw(seat, &outcome);
        self.state.record(
            seat,
            Action::Draw {
                requested: outcome.requested,
                received: outcome.received(),
            },
        );
        self.strategist.observe_draw(seat);
        outcome
    }

    /// Apply the start card's effect to the first seat.
    fn apply_opening_card(&mut self) {
        let first = self.state.seating.first();
        let start = self.state.table.active_card;

        match start.rank {
            Rank::Ace => {
                if self.config.is_human(first) {
                    self.state.opening_color_open = true;
                } else {
                    let suit = self.strategist.choose_suit(self.state.hand(first));
                    self.state.table.active_color = suit;
                    self.notify(GameEvent::ColorChanged { suit });
                }
            }
            Rank::Two => {
                self.state.table.pending_penalty = crate::rules::PENALTY_PER_TWO;
                self.notify(GameEvent::PenaltyIncreased {
                    total: crate::rules::PENALTY_PER_TWO,
                });

                let outcome = self.opening_draw(first, crate::rules::PENALTY_PER_TWO as usize);
                self.state.table.pending_penalty = 0;
                self.notify(GameEvent::PenaltyDrawn {
                    seat: first,
                    count: outcome.received(),
                });
                self.advance_turn(first);
            }
            Rank::Queen => {
                self.opening_draw(first, crate::rules::QUEEN_PENALTY);
                self.notify(GameEvent::QueenPenalty { seat: first });
            }
            Rank::Jack => {
                self.state.record(first, Action::Pass);
                self.notify(GameEvent::SkipConsumed { seat: first });
                self.advance_turn(first);
            }
            _ => {}
        }

        debug!(start = %start, current = %self.state.current, "opening card applied");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::card::full_deck;
    use crate::core::rng::ScriptedShuffler;
    use crate::core::state::{Player, TableState};

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    /// Two-seat builder whose start card is `start` (scripted deal).
    fn builder_with_start(start: Card, hand_size: usize) -> EngineBuilder {
        // Seats take the first 2 * hand_size cards; the start card follows.
        let mut front: Vec<Card> = full_deck()
            .into_iter()
            .filter(|c| !c.is_power() && *c != start)
            .take(2 * hand_size)
            .collect();
        front.push(start);

        EngineBuilder::new(2)
            .hand_size(hand_size)
            .shuffler(Box::new(ScriptedShuffler::new().then(front)))
    }

    fn engine_with_start(start: Card, hand_size: usize) -> Engine {
        builder_with_start(start, hand_size).build().unwrap()
    }

    /// Draws into a shared list every draw it is told about.
    struct DrawWatcher(Arc<Mutex<Vec<Seat>>>);

    impl Strategist for DrawWatcher {
        fn decide(&self, _state: &GameState, _seat: Seat) -> Decision {
            Decision::Draw
        }

        fn choose_suit(&self, _remaining: &[Card]) -> Suit {
            Suit::Spades
        }

        fn observe_draw(&mut self, seat: Seat) {
            self.0.lock().unwrap().push(seat);
        }
    }

    /// Replace hands and table; the remaining cards form the stock.
    fn set_position(engine: &mut Engine, active: Card, hands: Vec<Vec<Card>>) {
        let state = engine.state_mut();
        let mut used: Vec<Card> = hands.iter().flatten().copied().collect();
        used.push(active);
        let stock = full_deck().into_iter().filter(|c| !used.contains(c)).collect();
        state.piles.set_piles(stock, vec![]);

        for (i, hand) in hands.into_iter().enumerate() {
            let seat = Seat::new(i as u8);
            state.players[seat] = Player::new(seat, hand);
        }
        state.table = TableState::new(active);
        state.current = Seat::new(0);
        assert!(state.is_conserved());
    }

    #[test]
    fn test_opening_two_penalizes_first_seat() {
        let engine = engine_with_start(card(Suit::Hearts, Rank::Two), 5);

        assert_eq!(engine.state().hand(Seat::new(0)).len(), 7);
        assert_eq!(engine.state().table.pending_penalty, 0);
        assert_eq!(engine.current_seat(), Seat::new(1));
        assert!(engine.state().is_conserved());
    }

    #[test]
    fn test_opening_jack_skips_first_seat() {
        let engine = engine_with_start(card(Suit::Clubs, Rank::Jack), 5);

        assert_eq!(engine.current_seat(), Seat::new(1));
        assert_eq!(engine.state().hand(Seat::new(0)).len(), 5);
        assert!(!engine.state().table.pending_skip);
    }

    #[test]
    fn test_opening_queen_draws_one() {
        let engine = engine_with_start(card(Suit::Clubs, Rank::Queen), 5);

        assert_eq!(engine.current_seat(), Seat::new(0));
        assert_eq!(engine.state().hand(Seat::new(0)).len(), 6);
    }

    #[test]
    fn test_opening_draws_are_observed() {
        for (start, drawn) in [(Rank::Two, 2), (Rank::Queen, 1)] {
            let draws = Arc::new(Mutex::new(Vec::new()));
            let engine = builder_with_start(card(Suit::Clubs, start), 5)
                .strategist(Box::new(DrawWatcher(draws.clone())))
                .build()
                .unwrap();

            assert_eq!(*draws.lock().unwrap(), vec![Seat::new(0)]);
            let record = engine.state().history().last().unwrap();
            assert_eq!(record.seat, Seat::new(0));
            assert_eq!(
                record.action,
                Action::Draw {
                    requested: drawn,
                    received: drawn,
                }
            );
        }
    }

    #[test]
    fn test_legal_plays_unknown_seat_is_empty() {
        // Seat 0 is dealt mostly spades.
        let engine = engine_with_start(card(Suit::Spades, Rank::Seven), 5);

        assert!(engine.legal_plays(Seat::new(5)).is_empty());
        assert!(!engine.legal_plays(Seat::new(0)).is_empty());
    }

    #[test]
    fn test_opening_ace_human_chooses() {
        let mut engine = engine_with_start(card(Suit::Diamonds, Rank::Ace), 5);
        assert_eq!(engine.state().table.active_color, Suit::Diamonds);

        assert!(matches!(
            engine.choose_opening_color(Seat::new(1), Suit::Clubs),
            Err(MoveError::NotYourTurn { .. })
        ));
        engine.choose_opening_color(Seat::new(0), Suit::Clubs).unwrap();
        assert_eq!(engine.state().table.active_color, Suit::Clubs);
        assert_eq!(
            engine.choose_opening_color(Seat::new(0), Suit::Hearts),
            Err(MoveError::OpeningColorClosed)
        );
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut engine = engine_with_start(card(Suit::Hearts, Rank::Seven), 3);
        set_position(
            &mut engine,
            card(Suit::Hearts, Rank::Seven),
            vec![
                vec![card(Suit::Clubs, Rank::Nine), card(Suit::Hearts, Rank::Nine)],
                vec![card(Suit::Spades, Rank::Nine)],
            ],
        );
        let before_hand = engine.state().hand(Seat::new(0)).to_vec();
        let before_table = engine.state().table.clone();

        assert_eq!(
            engine.submit_move(Seat::new(0), &[card(Suit::Clubs, Rank::Eight)], None),
            Err(MoveError::CardNotHeld(card(Suit::Clubs, Rank::Eight)))
        );
        assert_eq!(
            engine.submit_move(Seat::new(0), &[card(Suit::Clubs, Rank::Nine)], None),
            Err(MoveError::NoMatch(card(Suit::Clubs, Rank::Nine)))
        );
        assert!(matches!(
            engine.submit_move(Seat::new(1), &[card(Suit::Spades, Rank::Nine)], None),
            Err(MoveError::NotYourTurn { .. })
        ));
        assert_eq!(engine.pass_turn(Seat::new(0)), Err(MoveError::NothingToPass));

        assert_eq!(engine.state().hand(Seat::new(0)), &before_hand[..]);
        assert_eq!(engine.state().table, before_table);
        assert_eq!(engine.current_seat(), Seat::new(0));
    }

    #[test]
    fn test_draw_rejected_while_skip_owed() {
        let mut engine = engine_with_start(card(Suit::Hearts, Rank::Seven), 3);
        engine.state_mut().table.pending_skip = true;

        assert_eq!(engine.request_draw(Seat::new(0)), Err(MoveError::SkipPending));
        engine.pass_turn(Seat::new(0)).unwrap();
        assert!(!engine.state().table.pending_skip);
        assert_eq!(engine.current_seat(), Seat::new(1));
    }

    #[test]
    fn test_human_seat_not_driven_by_ai() {
        let mut engine = engine_with_start(card(Suit::Hearts, Rank::Seven), 3);
        assert!(matches!(
            engine.advance_ai_turn(Seat::new(0)),
            Err(MoveError::NotAiSeat(_))
        ));
    }

    #[test]
    fn test_plain_finish_ends_two_seat_game() {
        let mut engine = engine_with_start(card(Suit::Hearts, Rank::Seven), 3);
        set_position(
            &mut engine,
            card(Suit::Hearts, Rank::Seven),
            vec![vec![card(Suit::Hearts, Rank::Nine)], vec![card(Suit::Spades, Rank::Nine)]],
        );

        let outcome = engine
            .submit_move(Seat::new(0), &[card(Suit::Hearts, Rank::Nine)], None)
            .unwrap();

        assert_eq!(outcome.finish, FinishCheck::Emptied);
        assert_eq!(outcome.placed, vec![Seat::new(0), Seat::new(1)]);
        assert!(engine.is_game_over());
        assert_eq!(engine.result().and_then(|r| r.winner()), Some(Seat::new(0)));
        assert_eq!(engine.request_draw(Seat::new(1)), Err(MoveError::GameOver));
    }
}
