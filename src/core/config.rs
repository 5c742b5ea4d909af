//! Match and strategist configuration.
//!
//! - `GameConfig`: table size, hand size, seed, which seats are human
//! - `AiConfig`: thresholds used by the heuristic strategist
//!
//! Both are plain serde values with builder-style setters so hosts can load
//! them from whatever settings format they use.

use serde::{Deserialize, Serialize};

use super::card::DECK_SIZE;
use super::seat::Seat;
use crate::error::ConfigError;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 2;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 4;

/// Configuration for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats at the table (2-4).
    pub player_count: usize,

    /// Cards dealt to each seat.
    pub hand_size: usize,

    /// Shuffle seed. `None` draws a fresh seed when the match starts.
    pub seed: Option<u64>,

    /// Seats driven by the host (prompted) rather than the strategist.
    /// The first entry is the seat whose habits the strategist tracks.
    pub human_seats: Vec<Seat>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            hand_size: 7,
            seed: None,
            human_seats: vec![Seat::new(0)],
        }
    }
}

impl GameConfig {
    /// Set the number of seats.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the dealt hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the set of human seats. An empty list runs an all-AI match.
    #[must_use]
    pub fn with_human_seats(mut self, seats: Vec<Seat>) -> Self {
        self.human_seats = seats;
        self
    }

    /// Check if a seat is driven by the host.
    #[must_use]
    pub fn is_human(&self, seat: Seat) -> bool {
        self.human_seats.contains(&seat)
    }

    /// The seat whose play history feeds the strategist, if any.
    #[must_use]
    pub fn tracked_human(&self) -> Option<Seat> {
        self.human_seats.first().copied()
    }

    /// Validate the configuration before dealing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }

        // Every seat gets a full hand and one card is turned up.
        let needed = self.player_count * self.hand_size + 1;
        if self.hand_size == 0 || needed > DECK_SIZE {
            return Err(ConfigError::HandSize {
                hand_size: self.hand_size,
                player_count: self.player_count,
            });
        }

        if let Some(seat) = self
            .human_seats
            .iter()
            .find(|s| s.index() >= self.player_count)
        {
            return Err(ConfigError::UnknownSeat(*seat));
        }

        Ok(())
    }
}

/// Thresholds for the heuristic strategist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Hand size at or below which the strategist sheds power cards first.
    pub endgame_hand_size: usize,

    /// Next-seat hand size at or below which Jacks and 2s are preferred.
    pub pressure_hand_size: usize,

    /// Consecutive draws after which the human counts as struggling.
    pub struggling_draw_streak: u32,

    /// Draw-to-play ratio above which the human counts as struggling.
    pub struggling_draw_ratio: f64,

    /// Human hand size at or below which the strategist targets them.
    pub human_low_hand: usize,

    /// Cards of the chosen suit an Ace must leave behind to be worth playing.
    pub ace_suit_reserve: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endgame_hand_size: 3,
            pressure_hand_size: 2,
            struggling_draw_streak: 2,
            struggling_draw_ratio: 0.4,
            human_low_hand: 4,
            ace_suit_reserve: 2,
        }
    }
}

impl AiConfig {
    /// Set the endgame threshold.
    #[must_use]
    pub fn with_endgame_hand_size(mut self, size: usize) -> Self {
        self.endgame_hand_size = size;
        self
    }

    /// Set the pressure threshold.
    #[must_use]
    pub fn with_pressure_hand_size(mut self, size: usize) -> Self {
        self.pressure_hand_size = size;
        self
    }

    /// Set the struggling ratio.
    #[must_use]
    pub fn with_struggling_draw_ratio(mut self, ratio: f64) -> Self {
        self.struggling_draw_ratio = ratio;
        self
    }
}
