//! Game state: the table, the piles, and every seat's hand.
//!
//! ## TableState
//!
//! What every seat must respond to:
//! - Active card and active color
//! - Pending penalty (from 2s) and pending skip (from Jacks)
//! - Queen-pair shadow (second match target after a Queen pair)
//!
//! ## GameState
//!
//! Complete match state:
//! - Table state
//! - Pile manager (stock and discard pile)
//! - Players (hands, finish status)
//! - Current seat, seating order, rankings
//! - Action history
//!
//! Card conservation holds for every reachable state:
//! `stock + discard + hands + active card + shadow == 52`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::card::{Card, Suit, DECK_SIZE};
use super::seat::{Seat, SeatMap};
use crate::piles::{Deal, PileManager};
use crate::rules::scheduler::SeatingOrder;

/// Shared table state every move is judged against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    /// Top card of the play area.
    pub active_card: Card,

    /// Suit the next play must follow (unless it matches by rank).
    pub active_color: Suit,

    /// Cards owed by the next seat from stacked 2s.
    pub pending_penalty: u32,

    /// The next seat loses its turn unless it plays a Jack.
    pub pending_skip: bool,

    /// Queen from the last Queen pair; a second match target for one turn.
    pub queen_pair_shadow: Option<Card>,
}

impl TableState {
    /// Table with `card` face up and no obligations.
    #[must_use]
    pub fn new(card: Card) -> Self {
        Self {
            active_card: card,
            active_color: card.suit,
            pending_penalty: 0,
            pending_skip: false,
            queen_pair_shadow: None,
        }
    }
}

/// One seat's private state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,

    /// Unordered hand.
    pub hand: Vec<Card>,

    /// The seat has left play (absorbing).
    pub finished: bool,

    /// 1-based finishing place, once finished.
    pub finish_rank: Option<usize>,

    /// Accepted plays so far.
    pub moves_played: u32,
}

impl Player {
    /// Create a seat with the given hand.
    #[must_use]
    pub fn new(seat: Seat, hand: Vec<Card>) -> Self {
        Self {
            seat,
            hand,
            finished: false,
            finish_rank: None,
            moves_played: 0,
        }
    }

    /// Check if the hand holds a card.
    #[must_use]
    pub fn holds(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Remove a card from the hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(pos) = self.hand.iter().position(|&c| c == card) {
            self.hand.swap_remove(pos);
            true
        } else {
            false
        }
    }

    /// Number of cards held.
    #[must_use]
    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }
}

/// Where a seat is in the turn cycle.
///
/// The transient `MoveChosen`/`Resolved` stages happen inside a single
/// engine call and are never observable between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatPhase {
    /// Waiting for other seats.
    Idle,
    /// This seat must act now.
    AwaitingMove,
    /// The seat has left play.
    Finished,
}

/// Full match state.
#[derive(Debug)]
pub struct GameState {
    /// Shared table.
    pub table: TableState,

    /// Stock and discard pile.
    pub piles: PileManager,

    /// Per-seat hands and progress.
    pub players: SeatMap<Player>,

    /// Seat whose turn it is.
    pub current: Seat,

    /// Finished seats, first place first.
    pub rankings: Vec<Seat>,

    /// Fixed traversal order.
    pub seating: SeatingOrder,

    /// Cards dealt per seat.
    pub hand_size: usize,

    /// Seed the deal was shuffled with, when known.
    pub seed: Option<u64>,

    /// Turn counter (starts at 1).
    pub turn_number: u32,

    /// Seat 0 may still choose the color of an opening Ace.
    pub opening_color_open: bool,

    /// Every accepted action, oldest first.
    history: Vector<ActionRecord>,
}

impl GameState {
    /// Assemble the state right after a deal, before opening-card rules.
    #[must_use]
    pub fn from_deal(
        piles: PileManager,
        deal: Deal,
        seating: SeatingOrder,
        hand_size: usize,
        seed: Option<u64>,
    ) -> Self {
        let Deal { hands, start_card } = deal;
        let players = SeatMap::new(hands.seat_count(), |seat| Player::new(seat, hands[seat].clone()));
        let current = seating.first();

        Self {
            table: TableState::new(start_card),
            piles,
            players,
            current,
            rankings: Vec::new(),
            seating,
            hand_size,
            seed,
            turn_number: 1,
            opening_color_open: false,
            history: Vector::new(),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.seat_count()
    }

    /// Get a seat's hand.
    #[must_use]
    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.players[seat].hand
    }

    /// Add cards to a seat's hand.
    pub fn give_cards(&mut self, seat: Seat, cards: &[Card]) {
        self.players[seat].hand.extend_from_slice(cards);
    }

    /// Check if the match has ended (every seat placed).
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.rankings.len() >= self.player_count()
    }

    /// Check if a seat has finished.
    #[must_use]
    pub fn is_finished(&self, seat: Seat) -> bool {
        self.players[seat].finished
    }

    /// Where a seat is in the turn cycle.
    #[must_use]
    pub fn seat_phase(&self, seat: Seat) -> SeatPhase {
        if self.players[seat].finished {
            SeatPhase::Finished
        } else if seat == self.current && !self.is_over() {
            SeatPhase::AwaitingMove
        } else {
            SeatPhase::Idle
        }
    }

    /// Next unfinished seat after `seat`, if any.
    #[must_use]
    pub fn next_seat(&self, seat: Seat) -> Option<Seat> {
        self.seating.next_turn(seat, &self.rankings)
    }

    /// Seats still in play, in seating order.
    pub fn active_seats(&self) -> impl Iterator<Item = Seat> + '_ {
        self.seating
            .seats()
            .iter()
            .copied()
            .filter(move |&s| !self.players[s].finished)
    }

    /// Total cards accounted for across piles, hands, and the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let hands: usize = self.players.values().map(Player::hand_len).sum();
        let shadow = usize::from(self.table.queen_pair_shadow.is_some());

        self.piles.draw_pile_len() + self.piles.discard_pile_len() + hands + 1 + shadow
    }

    /// Check the card conservation invariant.
    #[must_use]
    pub fn is_conserved(&self) -> bool {
        self.card_count() == DECK_SIZE
    }

    // === Action History ===

    /// Record an accepted action for the current turn.
    pub fn record(&mut self, seat: Seat, action: Action) {
        self.history
            .push_back(ActionRecord::new(seat, action, self.turn_number));
    }

    /// Every accepted action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }
}
