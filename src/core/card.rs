//! Playing cards: suits, ranks, and the 52-card deck.
//!
//! A `Card` is immutable once created. Its `CardId` is unique within a
//! deck, so two cards compare equal only if they are the same physical card.
//!
//! ## Power Cards
//!
//! Ace, 2, Jack and Queen carry special effects and can never complete a
//! winning play. Every other rank is a "plain" card.

use serde::{Deserialize, Serialize};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Card suit (the "color" a play must follow).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits in a fixed order. Used for deck generation and tie-breaking.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Position of this suit in `Suit::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Symbol used in status messages.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in deck order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Check if this rank carries a special effect.
    #[must_use]
    pub const fn is_power(self) -> bool {
        matches!(self, Rank::Ace | Rank::Two | Rank::Jack | Rank::Queen)
    }

    /// Short label ("A", "2", ..., "K").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque unique card token within a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A physical playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Create the canonical card for a suit and rank.
    ///
    /// The ID is derived from suit and rank, so `Card::new(s, r)` always
    /// refers to the same card of a standard deck.
    ///
    /// ```
    /// use take_two::core::{Card, Rank, Suit};
    ///
    /// let queen = Card::new(Suit::Spades, Rank::Queen);
    /// assert!(queen.is_power());
    /// assert_eq!(queen.to_string(), "Q♠");
    /// ```
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            id: CardId((suit as u8) * 13 + rank as u8),
            suit,
            rank,
        }
    }

    /// Check if this card carries a special effect.
    #[must_use]
    pub const fn is_power(self) -> bool {
        self.rank.is_power()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Generate a fresh, ordered 52-card deck (suit-major).
#[must_use]
pub fn full_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_deck_is_unique() {
        let deck = full_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let ids: HashSet<_> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_power_ranks() {
        let power: Vec<_> = Rank::ALL.iter().filter(|r| r.is_power()).collect();
        assert_eq!(power, vec![&Rank::Ace, &Rank::Two, &Rank::Jack, &Rank::Queen]);
        assert!(!Card::new(Suit::Hearts, Rank::King).is_power());
    }

    #[test]
    fn test_card_identity() {
        let a = Card::new(Suit::Clubs, Rank::Seven);
        let b = Card::new(Suit::Clubs, Rank::Seven);
        let c = Card::new(Suit::Hearts, Rank::Seven);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.id, CardId::new(3 * 13 + 6));
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "10♥");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ace).to_string(), "A♦");
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(Suit::Diamonds, Rank::Jack);
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
