//! Advisory notifications for the host.
//!
//! The engine emits a `GameEvent` for every change a player would want to
//! be told about. Events are never read back by the engine; `Display`
//! renders the status line a UI can show as-is.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Suit};
use crate::core::seat::Seat;

/// Something worth telling the players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A 2 raised the pending penalty.
    PenaltyIncreased { total: u32 },

    /// A seat absorbed the pending penalty.
    PenaltyDrawn { seat: Seat, count: usize },

    /// A Jack put the next seat on notice.
    SkipImposed { by: Seat },

    /// A seat lost its turn to a skip.
    SkipConsumed { seat: Seat },

    /// The active color changed.
    ColorChanged { suit: Suit },

    /// A Queen pair was played.
    QueenPair { seat: Seat, queen: Card },

    /// A single Queen cost its player a card.
    QueenPenalty { seat: Seat },

    /// The discard pile was shuffled back into the stock.
    Recycled,

    /// A draw came up short.
    StockExhausted { seat: Seat, requested: usize, received: usize },

    /// A seat emptied its hand on a power card and drew instead.
    FinishBlocked { seat: Seat },

    /// A seat placed.
    SeatFinished { seat: Seat, rank: usize },

    /// Every seat is placed.
    GameOver { rankings: Vec<Seat> },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PenaltyIncreased { total } => write!(f, "Penalty increased to {total}"),
            GameEvent::PenaltyDrawn { seat, count } => {
                write!(f, "{seat} drew {count} penalty cards")
            }
            GameEvent::SkipImposed { by } => write!(f, "{by} played a Jack: next player is skipped"),
            GameEvent::SkipConsumed { seat } => write!(f, "{seat} was skipped"),
            GameEvent::ColorChanged { suit } => write!(f, "Color changed to {suit}"),
            GameEvent::QueenPair { seat, queen } => write!(f, "{seat} paired {queen}"),
            GameEvent::QueenPenalty { seat } => write!(f, "{seat} drew 1 card for a single Queen"),
            GameEvent::Recycled => f.write_str("Discard pile reshuffled into the draw pile"),
            GameEvent::StockExhausted {
                seat,
                requested,
                received,
            } => write!(f, "No cards left: {seat} drew {received} of {requested}"),
            GameEvent::FinishBlocked { seat } => {
                write!(f, "{seat} cannot finish on a power card and draws 1")
            }
            GameEvent::SeatFinished { seat, rank } => write!(f, "{seat} finished in place {rank}"),
            GameEvent::GameOver { rankings } => match rankings.last() {
                Some(last) => write!(f, "Game over: {last} is left holding cards"),
                None => f.write_str("Game over"),
            },
        }
    }
}

/// Sink for game events.
pub trait Notifier: Send {
    fn notify(&mut self, event: &GameEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _event: &GameEvent) {}
}

/// Shared in-memory event list.
///
/// Clones share the same buffer, so a host can hand one clone to the engine
/// and read the other.
///
/// ```
/// use take_two::engine::{EventLog, GameEvent, Notifier};
///
/// let log = EventLog::new();
/// let mut sink = log.clone();
/// sink.notify(&GameEvent::PenaltyIncreased { total: 4 });
///
/// assert_eq!(log.messages(), vec!["Penalty increased to 4".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event received so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Rendered status lines.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }

    /// Drop everything received so far.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Rank;

    #[test]
    fn test_messages() {
        assert_eq!(GameEvent::PenaltyIncreased { total: 4 }.to_string(), "Penalty increased to 4");
        assert_eq!(GameEvent::ColorChanged { suit: Suit::Hearts }.to_string(), "Color changed to ♥");
        assert_eq!(
            GameEvent::QueenPair {
                seat: Seat::new(0),
                queen: Card::new(Suit::Spades, Rank::Queen)
            }
            .to_string(),
            "Seat 0 paired Q♠"
        );
        assert_eq!(
            GameEvent::GameOver {
                rankings: vec![Seat::new(1), Seat::new(0)]
            }
            .to_string(),
            "Game over: Seat 0 is left holding cards"
        );
    }

    #[test]
    fn test_event_log_shares_buffer() {
        let log = EventLog::new();
        let mut sink = log.clone();

        sink.notify(&GameEvent::SkipConsumed { seat: Seat::new(2) });
        assert_eq!(log.events().len(), 1);

        log.clear();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::StockExhausted {
            seat: Seat::new(1),
            requested: 4,
            received: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
