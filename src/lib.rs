//! # take-two
//!
//! Game engine for "Take Two", a shedding card game for 2-4 seats where the
//! last player holding cards loses.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: The whole match lives in one `GameState` value.
//!    Every host operation validates first and mutates second, so a
//!    rejected move leaves nothing behind.
//!
//! 2. **Closed Effects**: Card effects are a closed enum, matched
//!    exhaustively by the resolver.
//!
//! 3. **Injected Collaborators**: Shuffling, the computer opponent, match
//!    reporting and status notifications are traits handed to the engine.
//!    Tests substitute deterministic shuffles and recording sinks.
//!
//! ## Modules
//!
//! - `core`: Cards, seats, state, actions, RNG, configuration
//! - `piles`: Draw pile and discard pile (deal, draw, recycle)
//! - `rules`: Move validation, effect resolution, turn order, finishing
//! - `ai`: Heuristic computer opponents
//! - `engine`: The facade hosts drive a match through
//! - `stats`: Match reports and the statistics ledger
//! - `error`: Rejection and configuration errors

pub mod ai;
pub mod core;
pub mod engine;
pub mod error;
pub mod piles;
pub mod rules;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, AiConfig, Card, CardId, GameConfig, GameRng, GameState, Play, Player, Rank, Seat,
    SeatMap, Suit, TableState,
};

pub use crate::ai::{Decision, HeuristicStrategist, PlayHistory, Strategist};

pub use crate::engine::{AiTurn, Engine, EngineBuilder, EventLog, GameEvent, Notifier, PlayOutcome};

pub use crate::error::{ConfigError, MoveError};

pub use crate::piles::{DrawOutcome, PileManager};

pub use crate::rules::{CardEffect, FinishCheck, GameResult, SeatingOrder};

pub use crate::stats::{Badge, MatchReport, StatsLedger, StatsReporter};
