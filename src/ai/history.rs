//! Observed play habits of the human seat.
//!
//! `PlayHistory` is a small value type updated only through accumulators
//! that return a new value, so the strategist's view of the human can be
//! snapshotted and tested without running a match.

use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Suit};
use crate::core::config::AiConfig;

/// What the strategist has seen the human do.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayHistory {
    /// Cards played per suit, indexed by `Suit::index`.
    suit_counts: [u32; 4],

    /// Accepted plays.
    plays: u32,

    /// Draw actions (penalty or voluntary).
    draws: u32,

    /// Draws since the last play.
    consecutive_draws: u32,
}

impl PlayHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a play of `cards`.
    ///
    /// ```
    /// use take_two::ai::PlayHistory;
    /// use take_two::core::{Card, Rank, Suit};
    ///
    /// let history = PlayHistory::new()
    ///     .with_play(&[Card::new(Suit::Hearts, Rank::Five)])
    ///     .with_play(&[Card::new(Suit::Hearts, Rank::Nine)]);
    ///
    /// assert_eq!(history.favorite_suit(), Some(Suit::Hearts));
    /// assert_eq!(history.plays(), 2);
    /// ```
    #[must_use]
    pub fn with_play(mut self, cards: &[Card]) -> Self {
        for card in cards {
            self.suit_counts[card.suit.index()] += 1;
        }
        self.plays += 1;
        self.consecutive_draws = 0;
        self
    }

    /// Record a draw.
    #[must_use]
    pub fn with_draw(mut self) -> Self {
        self.draws += 1;
        self.consecutive_draws += 1;
        self
    }

    #[must_use]
    pub fn plays(&self) -> u32 {
        self.plays
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    #[must_use]
    pub fn consecutive_draws(&self) -> u32 {
        self.consecutive_draws
    }

    /// Cards played in a suit.
    #[must_use]
    pub fn suit_count(&self, suit: Suit) -> u32 {
        self.suit_counts[suit.index()]
    }

    /// Draws per play (plays floored at 1).
    #[must_use]
    pub fn draw_ratio(&self) -> f64 {
        f64::from(self.draws) / f64::from(self.plays.max(1))
    }

    /// Check if the human is having a hard time.
    #[must_use]
    pub fn is_struggling(&self, config: &AiConfig) -> bool {
        self.consecutive_draws >= config.struggling_draw_streak
            || self.draw_ratio() > config.struggling_draw_ratio
    }

    /// The suit the human has played most, if they have played at all.
    ///
    /// Ties resolve to the earlier suit in `Suit::ALL`.
    #[must_use]
    pub fn favorite_suit(&self) -> Option<Suit> {
        let mut best: Option<(Suit, u32)> = None;
        for suit in Suit::ALL {
            let count = self.suit_count(suit);
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((suit, count));
            }
        }
        best.map(|(suit, _)| suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Rank;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    #[test]
    fn test_empty_history() {
        let history = PlayHistory::new();
        assert_eq!(history.favorite_suit(), None);
        assert_eq!(history.draw_ratio(), 0.0);
        assert!(!history.is_struggling(&AiConfig::default()));
    }

    #[test]
    fn test_play_resets_draw_streak() {
        let history = PlayHistory::new()
            .with_draw()
            .with_play(&[card(Suit::Clubs, Rank::Four)]);

        assert_eq!(history.consecutive_draws(), 0);
        assert_eq!(history.draws(), 1);
    }

    #[test]
    fn test_struggling_by_streak() {
        let config = AiConfig::default();
        let mut history = PlayHistory::new();
        for rank in [Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven] {
            history = history.with_play(&[card(Suit::Hearts, rank)]);
        }

        let one = history.clone().with_draw();
        assert!(!one.is_struggling(&config));

        let two = one.with_draw();
        assert!(two.is_struggling(&config));
    }

    #[test]
    fn test_struggling_by_ratio() {
        let config = AiConfig::default();
        // 1 draw, 2 plays: ratio 0.5
        let history = PlayHistory::new()
            .with_draw()
            .with_play(&[card(Suit::Hearts, Rank::Three)])
            .with_play(&[card(Suit::Hearts, Rank::Four)]);

        assert_eq!(history.consecutive_draws(), 0);
        assert!(history.is_struggling(&config));
    }

    #[test]
    fn test_favorite_suit_counts_pairs() {
        let history = PlayHistory::new()
            .with_play(&[card(Suit::Spades, Rank::Queen), card(Suit::Spades, Rank::King)])
            .with_play(&[card(Suit::Diamonds, Rank::Nine)]);

        assert_eq!(history.suit_count(Suit::Spades), 2);
        assert_eq!(history.favorite_suit(), Some(Suit::Spades));
    }

    #[test]
    fn test_history_serialization() {
        let history = PlayHistory::new()
            .with_play(&[card(Suit::Clubs, Rank::Ten)])
            .with_draw();
        let json = serde_json::to_string(&history).unwrap();
        let deserialized: PlayHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history, deserialized);
    }
}
