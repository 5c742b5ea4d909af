//! Core types: cards, seats, state, actions, RNG, configuration.
//!
//! These are the value types every other module works on. Rules live in
//! `rules`, pile handling in `piles`, and decision making in `ai`.

pub mod action;
pub mod card;
pub mod config;
pub mod rng;
pub mod seat;
pub mod state;

pub use action::{Action, ActionRecord, Play};
pub use card::{full_deck, Card, CardId, Rank, Suit, DECK_SIZE};
pub use config::{AiConfig, GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{GameRng, ScriptedShuffler, Shuffler};
pub use seat::{Seat, SeatMap};
pub use state::{GameState, Player, SeatPhase, TableState};
