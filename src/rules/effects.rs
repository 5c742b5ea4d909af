//! Card effects and their resolution.
//!
//! `CardEffect` is the closed set of consequences a legal play can have.
//! `EffectResolver` applies a play to the game state:
//! 1. Cards leave the hand; the old active card (and any live shadow) go
//!    to the discard pile; the last played card becomes active
//! 2. The active color is updated
//! 3. The rank-specific effect is applied
//! 4. The finishing rule is checked
//!
//! Turn advancement and rankings are left to the scheduler and arbiter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validator::PlayKind;
use crate::core::action::Play;
use crate::core::card::{Card, Rank, Suit};
use crate::core::seat::Seat;
use crate::core::state::GameState;
use crate::piles::DrawOutcome;

/// Cards a single Queen costs the seat that plays it.
pub const QUEEN_PENALTY: usize = 1;

/// Cards each 2 adds to the pending penalty.
pub const PENALTY_PER_TWO: u32 = 2;

/// The consequence of a legal play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Plain card: the active color follows the card.
    Plain,

    /// Ace: the acting seat names the next color.
    ChooseColor { suit: Suit },

    /// Single Queen: the acting seat draws a penalty.
    QueenPenalty { draw: usize },

    /// Queen pair: color is kept, the Queen stays live as a match target.
    QueenPair { shadow: Card },

    /// Jack: the next seat is skipped unless it answers with a Jack.
    Skip,

    /// 2s: the pending penalty grows.
    Penalty { amount: u32 },
}

impl CardEffect {
    /// Determine the effect of a validated play.
    ///
    /// `chosen_suit` is only consulted for Aces; a missing choice falls
    /// back to the Ace's own suit.
    #[must_use]
    pub fn of(play: &Play, kind: PlayKind) -> Self {
        let Some(last) = play.last() else {
            return CardEffect::Plain;
        };

        if kind == PlayKind::QueenPair {
            return CardEffect::QueenPair {
                shadow: play.cards[0],
            };
        }

        match last.rank {
            Rank::Ace => CardEffect::ChooseColor {
                suit: play.chosen_suit.unwrap_or(last.suit),
            },
            Rank::Queen => CardEffect::QueenPenalty {
                draw: QUEEN_PENALTY,
            },
            Rank::Jack => CardEffect::Skip,
            Rank::Two => CardEffect::Penalty {
                amount: PENALTY_PER_TWO * play.count_rank(Rank::Two) as u32,
            },
            _ => CardEffect::Plain,
        }
    }
}

/// Outcome of the finishing rule for the acting seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinishCheck {
    /// The seat still holds cards.
    Continuing,

    /// The hand emptied on plain cards (or no compensating card existed).
    Emptied,

    /// The hand emptied on a power card; the seat drew a card instead.
    PowerCardBlocked { drawn: Card },
}

/// Everything a resolved play changed, for the engine to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub effect: CardEffect,

    /// Active color before the play.
    pub previous_color: Suit,

    /// Cards drawn by the acting seat (Queen penalty or finishing rule).
    pub drawn: DrawOutcome,

    pub finish: FinishCheck,
}

/// Applies validated plays to game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a validated play by `seat`.
    ///
    /// The caller must have validated the play and checked the seat holds
    /// every card; this never fails.
    pub fn resolve(state: &mut GameState, seat: Seat, play: &Play, kind: PlayKind) -> Resolution {
        let effect = CardEffect::of(play, kind);
        let previous_color = state.table.active_color;

        for &card in &play.cards {
            state.players[seat].remove(card);
        }

        Self::move_to_table(state, play, &effect);

        state.table.active_color = match &effect {
            CardEffect::ChooseColor { suit } => *suit,
            CardEffect::QueenPair { .. } => previous_color,
            _ => state.table.active_card.suit,
        };

        let mut drawn = DrawOutcome::default();
        match &effect {
            CardEffect::QueenPenalty { draw } => {
                drawn = state.piles.draw(seat, *draw);
                state.give_cards(seat, &drawn.cards);
            }
            CardEffect::Skip => state.table.pending_skip = true,
            CardEffect::Penalty { amount } => state.table.pending_penalty += amount,
            CardEffect::Plain | CardEffect::ChooseColor { .. } | CardEffect::QueenPair { .. } => {}
        }

        let finish = Self::check_finish(state, seat, play, &mut drawn);

        debug!(
            %seat,
            active = %state.table.active_card,
            color = %state.table.active_color,
            penalty = state.table.pending_penalty,
            skip = state.table.pending_skip,
            ?effect,
            "resolved play"
        );

        Resolution {
            effect,
            previous_color,
            drawn,
            finish,
        }
    }

    /// Retire the live shadow and the old active card, then lay the play.
    fn move_to_table(state: &mut GameState, play: &Play, effect: &CardEffect) {
        if let Some(shadow) = state.table.queen_pair_shadow.take() {
            state.piles.discard(shadow);
        }

        let previous = state.table.active_card;
        state.piles.discard(previous);

        let (last, rest) = match play.cards.split_last() {
            Some(split) => split,
            None => return,
        };

        for &card in rest {
            match effect {
                CardEffect::QueenPair { shadow } if *shadow == card => {
                    state.table.queen_pair_shadow = Some(card);
                }
                _ => state.piles.discard(card),
            }
        }

        state.table.active_card = *last;
    }

    /// Apply the finishing rule: a hand emptied by a power card draws one.
    fn check_finish(state: &mut GameState, seat: Seat, play: &Play, drawn: &mut DrawOutcome) -> FinishCheck {
        if !state.players[seat].hand.is_empty() {
            return FinishCheck::Continuing;
        }

        if !play.has_power() {
            return FinishCheck::Emptied;
        }

        let compensation = state.piles.draw(seat, 1);
        state.give_cards(seat, &compensation.cards);

        let result = match compensation.cards.first() {
            Some(&card) => FinishCheck::PowerCardBlocked { drawn: card },
            // Nothing left to draw: the finish stands.
            None => FinishCheck::Emptied,
        };

        drawn.requested += compensation.requested;
        drawn.recycled |= compensation.recycled;
        drawn.exhausted |= compensation.exhausted;
        drawn.cards.extend(compensation.cards);

        result
    }

    /// Close the Queen-pair window without a play (draw or pass).
    pub fn expire_shadow(state: &mut GameState) {
        if let Some(shadow) = state.table.queen_pair_shadow.take() {
            state.piles.discard(shadow);
        }
    }
}
