//! Heuristic decision making for computer-controlled seats.
//!
//! ## Decision Pipeline
//!
//! `HeuristicStrategist` tries each rule in order and takes the first that
//! yields a play:
//! 1. Forced responses (answer a skip with a Jack, a penalty with a 2)
//! 2. Endgame caution (shed power cards while a plain card can still finish)
//! 3. Pressure on a next seat that is close to finishing
//! 4. Targeted pressure on a struggling or nearly-done human
//! 5. Queen pairs
//! 6. Aces, when the suit they name is well stocked
//! 7. Fallback preferences
//!
//! Only when no legal play exists does it draw.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::history::PlayHistory;
use crate::core::action::Play;
use crate::core::card::{Card, Rank, Suit};
use crate::core::config::AiConfig;
use crate::core::seat::Seat;
use crate::core::state::GameState;
use crate::rules::validator::legal_plays;

/// Power ranks in the order the strategist prefers to part with them.
const POWER_PREFERENCE: [Rank; 4] = [Rank::Two, Rank::Jack, Rank::Queen, Rank::Ace];

/// What a computer-controlled seat does with its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Play cards (Aces carry their chosen suit).
    Play(Play),
    /// Draw the owed penalty, or one card.
    Draw,
    /// Accept an owed skip.
    Pass,
}

/// Decision policy for computer-controlled seats.
///
/// The engine asks for a decision only when the seat is active, and feeds
/// every human action back through the `observe_*` hooks.
pub trait Strategist: Send {
    /// Choose an action for `seat` in the given state.
    fn decide(&self, state: &GameState, seat: Seat) -> Decision;

    /// Choose the next color for an Ace, given the cards that remain in hand.
    fn choose_suit(&self, remaining: &[Card]) -> Suit;

    /// A seat played cards.
    fn observe_play(&mut self, _seat: Seat, _cards: &[Card]) {}

    /// A seat drew.
    fn observe_draw(&mut self, _seat: Seat) {}
}

/// Rule-based strategist.
///
/// ## Example
///
/// ```
/// use take_two::ai::{Decision, HeuristicStrategist, Strategist};
/// use take_two::core::{AiConfig, Seat};
/// use take_two::engine::EngineBuilder;
///
/// let engine = EngineBuilder::new(2).seed(7).human_seats(vec![]).build().unwrap();
/// let strategist = HeuristicStrategist::new(AiConfig::default(), None);
///
/// let seat = engine.current_seat();
/// let decision = strategist.decide(engine.state(), seat);
/// assert!(matches!(decision, Decision::Play(_) | Decision::Draw | Decision::Pass));
/// ```
#[derive(Clone, Debug)]
pub struct HeuristicStrategist {
    config: AiConfig,
    history: PlayHistory,

    /// Seat whose habits are tracked.
    human: Option<Seat>,
}

impl HeuristicStrategist {
    /// Create a strategist tracking `human` (if any).
    #[must_use]
    pub fn new(config: AiConfig, human: Option<Seat>) -> Self {
        Self {
            config,
            history: PlayHistory::new(),
            human,
        }
    }

    /// Replace the observed history.
    #[must_use]
    pub fn with_history(mut self, history: PlayHistory) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn history(&self) -> &PlayHistory {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    // === Pipeline Stages ===

    fn forced_response(&self, state: &GameState, hand: &[Card]) -> Option<Decision> {
        let table = &state.table;

        if table.pending_skip {
            return Some(match find_rank(hand, Rank::Jack) {
                Some(jack) => Decision::Play(Play::single(jack)),
                None => Decision::Pass,
            });
        }

        if table.pending_penalty > 0 {
            return Some(match find_rank(hand, Rank::Two) {
                Some(two) => Decision::Play(Play::single(two)),
                None => Decision::Draw,
            });
        }

        None
    }

    fn endgame(&self, hand: &[Card], singles: &[Card]) -> Option<Play> {
        if hand.len() > self.config.endgame_hand_size {
            return None;
        }

        if let [last] = hand {
            if !last.is_power() && singles.contains(last) {
                return Some(Play::single(*last));
            }
        }

        if hand.iter().any(|c| !c.is_power()) {
            return preferred_power(singles).map(Play::single);
        }

        None
    }

    fn pressure(&self, state: &GameState, seat: Seat, singles: &[Card]) -> Option<Play> {
        let next = state.next_seat(seat)?;
        if state.hand(next).len() > self.config.pressure_hand_size {
            return None;
        }

        attacking_card(singles).map(Play::single)
    }

    fn target_human(&self, state: &GameState, seat: Seat, singles: &[Card]) -> Option<Play> {
        let human = self.human.filter(|&h| h != seat && !state.is_finished(h))?;

        let low_hand = state.hand(human).len() <= self.config.human_low_hand;
        if !low_hand && !self.history.is_struggling(&self.config) {
            return None;
        }

        if state.next_seat(seat) == Some(human) {
            if let Some(card) = attacking_card(singles) {
                return Some(Play::single(card));
            }
        }

        let weak = self.history.favorite_suit()?;
        singles
            .iter()
            .find(|c| !c.is_power() && c.suit == weak)
            .map(|&c| Play::single(c))
    }

    fn ace(&self, hand: &[Card], singles: &[Card]) -> Option<Play> {
        singles.iter().filter(|c| c.rank == Rank::Ace).find_map(|&ace| {
            let remaining = without(hand, &[ace]);
            let suit = self.choose_suit(&remaining);
            let kept = remaining.iter().filter(|c| c.suit == suit).count();

            (kept >= self.config.ace_suit_reserve).then(|| Play::single(ace).with_suit(suit))
        })
    }

    fn fallback(&self, hand: &[Card], singles: &[Card]) -> Option<Play> {
        let plain: Vec<Card> = singles.iter().copied().filter(|c| !c.is_power()).collect();

        if plain.is_empty() {
            return preferred_power(singles).map(Play::single);
        }

        if let Some(weak) = self.history.favorite_suit() {
            if let Some(&card) = plain.iter().find(|c| c.suit == weak) {
                return Some(Play::single(card));
            }
        }

        let groups = suit_groups(hand);
        plain
            .iter()
            .copied()
            .fold(None, |best: Option<Card>, card| match best {
                Some(b) if groups[&b.suit] >= groups[&card.suit] => Some(b),
                _ => Some(card),
            })
            .map(Play::single)
    }

    /// Attach the chosen suit when the play ends on an Ace.
    fn finish_play(&self, play: Play, hand: &[Card]) -> Play {
        match play.last() {
            Some(card) if card.rank == Rank::Ace && play.chosen_suit.is_none() => {
                let suit = self.choose_suit(&without(hand, &play.cards));
                play.with_suit(suit)
            }
            _ => play,
        }
    }
}

impl Strategist for HeuristicStrategist {
    fn decide(&self, state: &GameState, seat: Seat) -> Decision {
        let hand = state.hand(seat);

        if let Some(decision) = self.forced_response(state, hand) {
            return decision;
        }

        let legal = legal_plays(hand, &state.table);
        if legal.is_empty() {
            return Decision::Draw;
        }

        let singles: Vec<Card> = legal
            .iter()
            .filter(|p| !p.is_pair())
            .filter_map(Play::last)
            .collect();

        let choice = self
            .endgame(hand, &singles)
            .or_else(|| self.pressure(state, seat, &singles))
            .or_else(|| self.target_human(state, seat, &singles))
            .or_else(|| legal.iter().find(|p| p.is_pair()).cloned())
            .or_else(|| self.ace(hand, &singles))
            .or_else(|| self.fallback(hand, &singles));

        match choice {
            Some(play) => Decision::Play(self.finish_play(play, hand)),
            None => Decision::Draw,
        }
    }

    fn choose_suit(&self, remaining: &[Card]) -> Suit {
        let groups = suit_groups(remaining);

        // Most cards in hand, then most played by the human, then suit order.
        let mut best = Suit::ALL[0];
        let mut best_key = (0usize, 0u32);
        for suit in Suit::ALL {
            let key = (
                groups.get(&suit).copied().unwrap_or(0),
                self.history.suit_count(suit),
            );
            if key > best_key {
                best = suit;
                best_key = key;
            }
        }
        best
    }

    fn observe_play(&mut self, seat: Seat, cards: &[Card]) {
        if self.human == Some(seat) {
            self.history = std::mem::take(&mut self.history).with_play(cards);
        }
    }

    fn observe_draw(&mut self, seat: Seat) {
        if self.human == Some(seat) {
            self.history = std::mem::take(&mut self.history).with_draw();
        }
    }
}

// === Helpers ===

fn find_rank(hand: &[Card], rank: Rank) -> Option<Card> {
    hand.iter().copied().find(|c| c.rank == rank)
}

/// A Jack, else a 2.
fn attacking_card(singles: &[Card]) -> Option<Card> {
    find_rank(singles, Rank::Jack).or_else(|| find_rank(singles, Rank::Two))
}

fn preferred_power(singles: &[Card]) -> Option<Card> {
    POWER_PREFERENCE
        .iter()
        .find_map(|&rank| find_rank(singles, rank))
}

/// Cards per suit.
fn suit_groups(cards: &[Card]) -> FxHashMap<Suit, usize> {
    let mut groups = FxHashMap::default();
    for suit in Suit::ALL {
        groups.insert(suit, 0);
    }
    for card in cards {
        *groups.entry(card.suit).or_insert(0) += 1;
    }
    groups
}

fn without(hand: &[Card], played: &[Card]) -> Vec<Card> {
    hand.iter().copied().filter(|c| !played.contains(c)).collect()
}
