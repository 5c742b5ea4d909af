//! Error taxonomy.
//!
//! Every rejection is recoverable: the engine returns the error and leaves
//! the match exactly as it was. Hosts translate these codes into UI text.

use thiserror::Error;

use crate::core::{Card, Seat};

/// Reasons a submitted move, draw, or pass is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Card matches neither active color, active rank, nor the Queen-pair shadow.
    #[error("{0} matches neither the active color nor the active card")]
    NoMatch(Card),

    /// A "2" penalty is owed and the candidate is not a "2".
    #[error("a penalty of {0} is pending; only a 2 can be played")]
    PenaltyPending(u32),

    /// A skip is owed and the candidate is not a Jack.
    #[error("a skip is pending; only a Jack can be played")]
    SkipPending,

    /// Two-card combo is not a valid Queen pair.
    #[error("not a valid Queen pair: {0}")]
    IllegalPair(&'static str),

    /// The match has already ended.
    #[error("the game is over")]
    GameOver,

    /// Another seat is active.
    #[error("it is not {seat}'s turn ({current} is active)")]
    NotYourTurn { seat: Seat, current: Seat },

    /// The seat has already finished.
    #[error("{0} has already finished")]
    SeatFinished(Seat),

    /// The seat does not hold the card.
    #[error("{0} is not in hand")]
    CardNotHeld(Card),

    /// No cards were submitted.
    #[error("a play needs at least one card")]
    EmptyPlay,

    /// More than two cards were submitted.
    #[error("at most two cards can be played at once, got {0}")]
    TooManyCards(usize),

    /// An Ace was played without choosing the next color.
    #[error("playing an Ace requires choosing a suit")]
    SuitChoiceRequired,

    /// A pass was requested with no skip owed.
    #[error("nothing to pass: no skip is pending")]
    NothingToPass,

    /// The seat is host-controlled; the strategist cannot act for it.
    #[error("{0} is not computer-controlled")]
    NotAiSeat(Seat),

    /// The opening color can no longer be chosen.
    #[error("the opening color can no longer be chosen")]
    OpeningColorClosed,
}

/// Reasons a match configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be 2-4, got {0}")]
    PlayerCount(usize),

    #[error("cannot deal {hand_size} cards to {player_count} players from one deck")]
    HandSize { hand_size: usize, player_count: usize },

    #[error("{0} is not at the table")]
    UnknownSeat(Seat),
}
