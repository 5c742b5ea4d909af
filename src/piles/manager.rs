//! Pile manager for the shared draw and discard piles.
//!
//! The `PileManager` owns the stock (draw pile) and the discard pile. It:
//! - Shuffles a fresh deck and deals hands in seating order
//! - Draws from the front of the stock, recycling the discard pile when
//!   the stock cannot cover a request
//! - Accepts cards leaving play into the discard pile
//!
//! Randomness comes only from the injected `Shuffler`.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::core::card::{full_deck, Card};
use crate::core::rng::Shuffler;
use crate::core::seat::{Seat, SeatMap};
use crate::error::ConfigError;
use crate::rules::scheduler::SeatingOrder;

/// Result of dealing a fresh deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    /// Dealt hands, one per seat.
    pub hands: SeatMap<Vec<Card>>,
    /// The first face-up card.
    pub start_card: Card,
}

/// Result of a draw request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    /// Cards handed out, in draw order.
    pub cards: Vec<Card>,
    /// How many cards were asked for.
    pub requested: usize,
    /// The discard pile was shuffled back into the stock.
    pub recycled: bool,
    /// Both piles ran dry before the request was covered.
    pub exhausted: bool,
}

impl DrawOutcome {
    /// Number of cards actually drawn.
    #[must_use]
    pub fn received(&self) -> usize {
        self.cards.len()
    }
}

/// Owns the stock and the discard pile.
///
/// ## Usage
///
/// ```
/// use take_two::core::{GameRng, Seat};
/// use take_two::piles::PileManager;
/// use take_two::rules::SeatingOrder;
///
/// let mut piles = PileManager::new(Box::new(GameRng::new(42)));
/// let deal = piles.deal(&SeatingOrder::new(2), 5).unwrap();
///
/// assert_eq!(deal.hands[Seat::new(0)].len(), 5);
/// assert_eq!(piles.draw_pile_len(), 52 - 2 * 5 - 1);
///
/// let outcome = piles.draw(Seat::new(1), 2);
/// assert_eq!(outcome.received(), 2);
/// ```
pub struct PileManager {
    /// Stock; index 0 is the next card drawn.
    draw_pile: VecDeque<Card>,

    /// Cards out of play, oldest first. Never contains the active card.
    discard_pile: Vec<Card>,

    shuffler: Box<dyn Shuffler>,

    /// How many times the discard pile has been recycled.
    recycles: u32,
}

impl std::fmt::Debug for PileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PileManager")
            .field("draw_pile", &self.draw_pile.len())
            .field("discard_pile", &self.discard_pile.len())
            .field("recycles", &self.recycles)
            .finish_non_exhaustive()
    }
}

impl PileManager {
    /// Create empty piles around a shuffle source.
    #[must_use]
    pub fn new(shuffler: Box<dyn Shuffler>) -> Self {
        Self {
            draw_pile: VecDeque::new(),
            discard_pile: Vec::new(),
            shuffler,
            recycles: 0,
        }
    }

    /// Shuffle a fresh 52-card deck and deal it.
    ///
    /// Seats receive `hand_size` consecutive cards each, in seating order.
    /// The next card is the start card; the remainder becomes the stock and
    /// the discard pile starts empty.
    pub fn deal(&mut self, seating: &SeatingOrder, hand_size: usize) -> Result<Deal, ConfigError> {
        let seat_count = seating.seat_count();
        if hand_size == 0 || seat_count * hand_size + 1 > crate::core::DECK_SIZE {
            return Err(ConfigError::HandSize {
                hand_size,
                player_count: seat_count,
            });
        }

        let mut deck = full_deck();
        self.shuffler.shuffle_cards(&mut deck);
        let mut deck: VecDeque<Card> = deck.into();

        let mut hands: SeatMap<Vec<Card>> = SeatMap::with_default(seat_count);
        for &seat in seating.seats() {
            hands[seat] = deck.drain(..hand_size).collect();
        }

        let start_card = deck
            .pop_front()
            .ok_or(ConfigError::HandSize {
                hand_size,
                player_count: seat_count,
            })?;

        self.draw_pile = deck;
        self.discard_pile.clear();
        self.recycles = 0;

        debug!(
            seats = seat_count,
            hand_size,
            start = %start_card,
            stock = self.draw_pile.len(),
            "dealt new match"
        );

        Ok(Deal { hands, start_card })
    }

    /// Draw up to `count` cards for `seat`.
    ///
    /// If the stock holds fewer than `count` cards and the discard pile is
    /// not empty, the discard pile is shuffled and appended to the stock
    /// first. When both piles are exhausted, fewer cards (possibly none)
    /// are returned and `exhausted` is set; this never fails.
    pub fn draw(&mut self, seat: Seat, count: usize) -> DrawOutcome {
        let mut outcome = DrawOutcome {
            requested: count,
            ..DrawOutcome::default()
        };

        if self.draw_pile.len() < count && !self.discard_pile.is_empty() {
            self.recycle();
            outcome.recycled = true;
        }

        let take = count.min(self.draw_pile.len());
        outcome.cards = self.draw_pile.drain(..take).collect();
        outcome.exhausted = outcome.cards.len() < count;

        if outcome.exhausted {
            warn!(
                %seat,
                requested = count,
                received = outcome.cards.len(),
                "stock exhausted"
            );
        } else {
            debug!(%seat, count, "drew cards");
        }

        outcome
    }

    /// Put a card out of play.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Shuffle the discard pile and append it to the stock.
    fn recycle(&mut self) {
        let mut cards = std::mem::take(&mut self.discard_pile);
        self.shuffler.shuffle_cards(&mut cards);

        debug!(cards = cards.len(), "recycled discard pile into stock");

        self.draw_pile.extend(cards);
        self.recycles += 1;
    }

    /// Cards left in the stock.
    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Stock contents, next card first.
    pub fn draw_pile(&self) -> impl Iterator<Item = &Card> {
        self.draw_pile.iter()
    }

    /// Discard pile contents, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// How many times the discard pile has been recycled.
    #[must_use]
    pub fn recycles(&self) -> u32 {
        self.recycles
    }

    /// Replace both piles (used to set up specific table positions).
    pub fn set_piles(&mut self, draw_pile: Vec<Card>, discard_pile: Vec<Card>) {
        self.draw_pile = draw_pile.into();
        self.discard_pile = discard_pile;
    }
}
