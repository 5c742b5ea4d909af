//! Move legality.
//!
//! Rules, in priority order:
//! 1. A pending penalty admits only 2s.
//! 2. A pending skip admits only Jacks.
//! 3. A single card matches the active color, the active rank, or the
//!    Queen-pair shadow. Ace on Ace is always allowed.
//! 4. Two cards must form a Queen pair: Queen first, then a same-suit
//!    plain card, with the Queen on the active color.
//!
//! The validator only answers "is this legal"; forced draws and passes are
//! the caller's business.

use crate::core::action::Play;
use crate::core::card::{Card, Rank};
use crate::core::state::TableState;
use crate::error::MoveError;

/// Shape of a legal play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayKind {
    Single,
    QueenPair,
}

/// Check if a single card may be played on the table, ignoring obligations.
#[must_use]
pub fn matches_table(card: Card, table: &TableState) -> bool {
    let active = table.active_card;

    if card.suit == table.active_color || card.rank == active.rank {
        return true;
    }

    // Ace on Ace regardless of color (covered by the rank match, kept
    // explicit since it is the only cross-color rule for Aces)
    if card.rank == Rank::Ace && active.rank == Rank::Ace {
        return true;
    }

    table
        .queen_pair_shadow
        .is_some_and(|shadow| card.suit == shadow.suit || card.rank == shadow.rank)
}

/// Check a play against the table, without the Ace suit-choice requirement.
pub fn check_play(play: &Play, table: &TableState) -> Result<PlayKind, MoveError> {
    match play.cards.len() {
        0 => return Err(MoveError::EmptyPlay),
        1 | 2 => {}
        n => return Err(MoveError::TooManyCards(n)),
    }

    if table.pending_penalty > 0 && play.cards.iter().any(|c| c.rank != Rank::Two) {
        return Err(MoveError::PenaltyPending(table.pending_penalty));
    }

    if table.pending_skip && play.cards.iter().any(|c| c.rank != Rank::Jack) {
        return Err(MoveError::SkipPending);
    }

    if let [card] = play.cards.as_slice() {
        // Obligations above already proved the card answers them.
        if table.pending_penalty > 0 || table.pending_skip || matches_table(*card, table) {
            return Ok(PlayKind::Single);
        }
        return Err(MoveError::NoMatch(*card));
    }

    check_queen_pair(play.cards[0], play.cards[1], table)?;
    Ok(PlayKind::QueenPair)
}

/// Full legality check, including the Ace suit choice.
pub fn validate(play: &Play, table: &TableState) -> Result<PlayKind, MoveError> {
    let kind = check_play(play, table)?;

    if play.last().is_some_and(|c| c.rank == Rank::Ace) && play.chosen_suit.is_none() {
        return Err(MoveError::SuitChoiceRequired);
    }

    Ok(kind)
}

fn check_queen_pair(queen: Card, partner: Card, table: &TableState) -> Result<(), MoveError> {
    if queen.rank != Rank::Queen {
        return Err(MoveError::IllegalPair("first card must be a Queen"));
    }
    if partner.is_power() {
        return Err(MoveError::IllegalPair("partner must not be a power card"));
    }
    if partner.suit != queen.suit {
        return Err(MoveError::IllegalPair("partner must share the Queen's suit"));
    }
    if queen.suit != table.active_color {
        return Err(MoveError::IllegalPair("Queen must match the active color"));
    }
    Ok(())
}

/// Enumerate every legal play from a hand (Aces without a chosen suit).
#[must_use]
pub fn legal_plays(hand: &[Card], table: &TableState) -> Vec<Play> {
    let mut plays: Vec<Play> = hand
        .iter()
        .map(|&card| Play::single(card))
        .filter(|play| check_play(play, table).is_ok())
        .collect();

    for &queen in hand.iter().filter(|c| c.rank == Rank::Queen) {
        for &partner in hand.iter().filter(|c| c.id != queen.id) {
            let pair = Play::pair(queen, partner);
            if check_play(&pair, table).is_ok() {
                plays.push(pair);
            }
        }
    }

    plays
}
