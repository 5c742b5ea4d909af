//! Deterministic random number generation and the injectable shuffle seam.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Replayable**: Unseeded matches record the seed they drew
//! - **Injectable**: The Pile Manager only sees the `Shuffler` trait, so
//!   tests can substitute a `ScriptedShuffler` that stacks the deck
//!
//! ```
//! use take_two::core::{full_deck, GameRng, Shuffler};
//!
//! let mut a = full_deck();
//! let mut b = full_deck();
//! GameRng::new(7).shuffle_cards(&mut a);
//! GameRng::new(7).shuffle_cards(&mut b);
//! assert_eq!(a, b);
//! ```

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::card::{Card, CardId};

/// A source of card-order randomness.
///
/// The Pile Manager calls this for the initial deal and for every recycle
/// of the discard pile. Implementations must produce a permutation of the
/// input (no cards added or dropped).
pub trait Shuffler: Send {
    /// Reorder `cards` in place.
    fn shuffle_cards(&mut self, cards: &mut [Card]);
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG from a fresh, non-deterministic seed.
    ///
    /// Returns the RNG and the seed it was built from so a match can be
    /// replayed later.
    #[must_use]
    pub fn from_entropy() -> (Self, u64) {
        let seed: u64 = rand::random();
        (Self::new(seed), seed)
    }

    /// The seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

impl Shuffler for GameRng {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        self.shuffle(cards);
    }
}

/// Shuffler that replays recorded card orders.
///
/// Each shuffle call consumes the next script. Scripted cards that are
/// present in the input move to the front, in script order; the remaining
/// cards keep their relative order behind them. Once the scripts run out
/// the input order is left untouched.
///
/// ```
/// use take_two::core::{Card, Rank, ScriptedShuffler, Shuffler, Suit};
///
/// let two = Card::new(Suit::Hearts, Rank::Two);
/// let mut cards = vec![Card::new(Suit::Spades, Rank::Ace), two];
/// let mut shuffler = ScriptedShuffler::new().then(vec![two]);
/// shuffler.shuffle_cards(&mut cards);
/// assert_eq!(cards[0], two);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedShuffler {
    scripts: VecDeque<Vec<Card>>,
    calls: usize,
}

impl ScriptedShuffler {
    /// Create a shuffler with no scripts (identity order).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the card order for the next shuffle call.
    #[must_use]
    pub fn then(mut self, front: Vec<Card>) -> Self {
        self.scripts.push_back(front);
        self
    }

    /// Number of shuffle calls observed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Shuffler for ScriptedShuffler {
    fn shuffle_cards(&mut self, cards: &mut [Card]) {
        self.calls += 1;
        let Some(front) = self.scripts.pop_front() else {
            return;
        };

        let wanted: Vec<CardId> = front.iter().map(|c| c.id).collect();
        let mut ordered: Vec<Card> = front
            .iter()
            .filter(|c| cards.iter().any(|x| x.id == c.id))
            .copied()
            .collect();
        ordered.extend(cards.iter().filter(|c| !wanted.contains(&c.id)).copied());

        cards.copy_from_slice(&ordered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{full_deck, Rank, Suit};

    #[test]
    fn test_determinism() {
        let mut a = full_deck();
        let mut b = full_deck();
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        // Successive shuffles (deal, then recycles) stay in lockstep
        for _ in 0..3 {
            rng1.shuffle_cards(&mut a);
            rng2.shuffle_cards(&mut b);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_entropy_seed_replays() {
        let (mut rng, seed) = GameRng::from_entropy();
        assert_eq!(rng.seed(), seed);

        let mut a = full_deck();
        let mut b = full_deck();
        rng.shuffle_cards(&mut a);
        GameRng::new(seed).shuffle_cards(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_deal_differently() {
        let mut a = full_deck();
        let mut b = full_deck();
        GameRng::new(1).shuffle_cards(&mut a);
        GameRng::new(2).shuffle_cards(&mut b);

        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut deck = full_deck();
        rng.shuffle_cards(&mut deck);

        assert_ne!(deck, full_deck());
        let mut ids: Vec<_> = deck.iter().map(|c| c.id).collect();
        ids.sort();
        let expected: Vec<_> = full_deck().iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_scripted_moves_cards_to_front() {
        let king = Card::new(Suit::Clubs, Rank::King);
        let two = Card::new(Suit::Hearts, Rank::Two);
        let mut shuffler = ScriptedShuffler::new().then(vec![king, two]);

        let mut deck = full_deck();
        shuffler.shuffle_cards(&mut deck);

        assert_eq!(deck[0], king);
        assert_eq!(deck[1], two);
        assert_eq!(deck[2], Card::new(Suit::Spades, Rank::Ace));
        assert_eq!(deck.len(), 52);
        assert_eq!(shuffler.calls(), 1);
    }

    #[test]
    fn test_scripted_ignores_absent_cards_and_runs_out() {
        let absent = Card::new(Suit::Clubs, Rank::King);
        let present = Card::new(Suit::Spades, Rank::Five);
        let mut shuffler = ScriptedShuffler::new().then(vec![absent, present]);

        let mut cards = vec![Card::new(Suit::Spades, Rank::Four), present];
        shuffler.shuffle_cards(&mut cards);
        assert_eq!(cards, vec![present, Card::new(Suit::Spades, Rank::Four)]);

        // No scripts left: identity
        shuffler.shuffle_cards(&mut cards);
        assert_eq!(cards, vec![present, Card::new(Suit::Spades, Rank::Four)]);
        assert_eq!(shuffler.calls(), 2);
    }
}
