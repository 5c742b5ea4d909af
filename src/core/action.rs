//! Actions a seat can take on its turn, and the record kept of them.
//!
//! A turn ends in exactly one of:
//! - `Play`: one card, or a Queen pair (Queen first, partner second)
//! - `Draw`: take the owed penalty, or one card when nothing can be played
//! - `Pass`: forfeit the turn to an owed skip

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{Card, Rank, Suit};
use super::seat::Seat;

/// Cards put down in a single play, plus the suit chosen for an Ace.
///
/// ## Example
///
/// ```
/// use take_two::core::{Card, Play, Rank, Suit};
///
/// let queen = Card::new(Suit::Spades, Rank::Queen);
/// let king = Card::new(Suit::Spades, Rank::King);
/// let pair = Play::pair(queen, king);
/// assert!(pair.is_pair());
/// assert_eq!(pair.last(), Some(king));
///
/// let ace = Play::single(Card::new(Suit::Hearts, Rank::Ace)).with_suit(Suit::Clubs);
/// assert_eq!(ace.chosen_suit, Some(Suit::Clubs));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Play {
    /// Played cards, in submission order.
    /// SmallVec holds the one- and two-card cases without heap allocation.
    pub cards: SmallVec<[Card; 2]>,

    /// Next color, required when the last card is an Ace.
    pub chosen_suit: Option<Suit>,
}

impl Play {
    /// Play a single card.
    #[must_use]
    pub fn single(card: Card) -> Self {
        Self {
            cards: SmallVec::from_slice(&[card]),
            chosen_suit: None,
        }
    }

    /// Play a Queen together with a partner card.
    #[must_use]
    pub fn pair(queen: Card, partner: Card) -> Self {
        Self {
            cards: SmallVec::from_slice(&[queen, partner]),
            chosen_suit: None,
        }
    }

    /// Build a play from an arbitrary card list.
    #[must_use]
    pub fn from_cards(cards: &[Card], chosen_suit: Option<Suit>) -> Self {
        Self {
            cards: SmallVec::from_slice(cards),
            chosen_suit,
        }
    }

    /// Attach the suit chosen for an Ace.
    #[must_use]
    pub fn with_suit(mut self, suit: Suit) -> Self {
        self.chosen_suit = Some(suit);
        self
    }

    /// Check if this is a two-card play.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2
    }

    /// The card that becomes active.
    #[must_use]
    pub fn last(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Check if any played card is a power card.
    #[must_use]
    pub fn has_power(&self) -> bool {
        self.cards.iter().any(|c| c.is_power())
    }

    /// Count played cards of a rank.
    #[must_use]
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank == rank).count()
    }
}

/// What a seat did with its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Cards were played.
    Play(Play),
    /// Cards were drawn (`requested` may exceed the cards received when
    /// the stock ran out).
    Draw { requested: usize, received: usize },
    /// An owed skip was accepted.
    Pass,
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(seat: Seat, action: Action, turn: u32) -> Self {
        Self { seat, action, turn }
    }
}
