//! Win condition arbitration.
//!
//! After every hand mutation the arbiter scans the seats still in play.
//! A seat holding no cards is placed next in `rankings`; once a single
//! seat remains it is placed last and the match is over.
//!
//! The power-card finishing rule is enforced by the effect resolver before
//! the arbiter runs, so an empty hand here is always a valid finish.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::seat::Seat;
use crate::core::state::GameState;

/// Final placement of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Seats in finishing order, first place first.
    pub rankings: Vec<Seat>,
}

impl GameResult {
    /// The first seat to empty its hand.
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.rankings.first().copied()
    }

    /// The seat left holding cards.
    #[must_use]
    pub fn loser(&self) -> Option<Seat> {
        self.rankings.last().copied()
    }

    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        self.winner() == Some(seat)
    }

    /// 1-based place of a seat.
    #[must_use]
    pub fn place_of(&self, seat: Seat) -> Option<usize> {
        self.rankings.iter().position(|&s| s == seat).map(|i| i + 1)
    }
}

/// Detects finishes and closes out the match.
pub struct Arbiter;

impl Arbiter {
    /// Place every active seat with an empty hand, in seating order.
    ///
    /// Returns the newly placed seats (including an auto-placed last seat).
    pub fn settle(state: &mut GameState) -> Vec<Seat> {
        let mut placed = Vec::new();
        if state.is_over() {
            return placed;
        }

        let emptied: Vec<Seat> = state
            .active_seats()
            .filter(|&seat| state.hand(seat).is_empty())
            .collect();

        for seat in emptied {
            Self::place(state, seat);
            placed.push(seat);
        }

        if state.player_count() - state.rankings.len() == 1 {
            let last = state.active_seats().next();
            if let Some(last) = last {
                Self::place(state, last);
                placed.push(last);
                info!(rankings = ?state.rankings, "game over");
            }
        }

        placed
    }

    fn place(state: &mut GameState, seat: Seat) {
        state.rankings.push(seat);
        let rank = state.rankings.len();

        let player = &mut state.players[seat];
        player.finished = true;
        player.finish_rank = Some(rank);

        info!(%seat, rank, "seat finished");
    }

    /// The final result, once the match is over.
    #[must_use]
    pub fn result(state: &GameState) -> Option<GameResult> {
        state.is_over().then(|| GameResult {
            rankings: state.rankings.clone(),
        })
    }
}
