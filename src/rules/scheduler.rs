//! Turn scheduling over a fixed seating order.
//!
//! Play moves counterclockwise around the table. For four seats that is
//! `0 -> 3 -> 1 -> 2 -> 0`; smaller tables use natural order. The order is
//! fixed when the match starts and finished seats are stepped over.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::seat::Seat;

/// The fixed traversal order of seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingOrder {
    order: SmallVec<[Seat; 4]>,
}

impl SeatingOrder {
    /// Build the counterclockwise order for a table of `seat_count` seats.
    ///
    /// ```
    /// use take_two::core::Seat;
    /// use take_two::rules::SeatingOrder;
    ///
    /// let order = SeatingOrder::new(4);
    /// let seats: Vec<u8> = order.seats().iter().map(|s| s.0).collect();
    /// assert_eq!(seats, vec![0, 3, 1, 2]);
    /// ```
    #[must_use]
    pub fn new(seat_count: usize) -> Self {
        assert!(seat_count > 0, "Must have at least 1 seat");

        let order = if seat_count == 4 {
            SmallVec::from_slice(&[Seat::new(0), Seat::new(3), Seat::new(1), Seat::new(2)])
        } else {
            Seat::all(seat_count).collect()
        };

        Self { order }
    }

    /// Seats in traversal order.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.order
    }

    /// Number of seats at the table.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.order.len()
    }

    /// The seat that acts first.
    #[must_use]
    pub fn first(&self) -> Seat {
        self.order[0]
    }

    /// Find the next seat after `current` that has not finished.
    ///
    /// Returns `None` when every other seat has finished. `current` itself
    /// may be finished (the seat that just emptied its hand).
    #[must_use]
    pub fn next_turn(&self, current: Seat, rankings: &[Seat]) -> Option<Seat> {
        let start = self.order.iter().position(|&s| s == current)?;
        let len = self.order.len();

        (1..len)
            .map(|step| self.order[(start + step) % len])
            .find(|seat| !rankings.contains(seat))
    }

    /// The seat immediately after `current` that has not finished, or
    /// `current` itself when it is the only one left.
    #[must_use]
    pub fn next_active(&self, current: Seat, rankings: &[Seat]) -> Seat {
        self.next_turn(current, rankings).unwrap_or(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(ids: &[u8]) -> Vec<Seat> {
        ids.iter().map(|&i| Seat::new(i)).collect()
    }

    #[test]
    fn test_natural_order_small_tables() {
        assert_eq!(SeatingOrder::new(2).seats(), &seats(&[0, 1])[..]);
        assert_eq!(SeatingOrder::new(3).seats(), &seats(&[0, 1, 2])[..]);
    }

    #[test]
    fn test_four_seat_cycle() {
        let order = SeatingOrder::new(4);
        let none: [Seat; 0] = [];

        assert_eq!(order.next_turn(Seat::new(0), &none), Some(Seat::new(3)));
        assert_eq!(order.next_turn(Seat::new(3), &none), Some(Seat::new(1)));
        assert_eq!(order.next_turn(Seat::new(1), &none), Some(Seat::new(2)));
        assert_eq!(order.next_turn(Seat::new(2), &none), Some(Seat::new(0)));
    }

    #[test]
    fn test_skips_finished_seats() {
        let order = SeatingOrder::new(4);
        let finished = seats(&[2]);

        assert_eq!(order.next_turn(Seat::new(1), &finished), Some(Seat::new(0)));
        assert_eq!(order.next_turn(Seat::new(3), &finished), Some(Seat::new(1)));

        let finished = seats(&[1, 2]);
        assert_eq!(order.next_turn(Seat::new(3), &finished), Some(Seat::new(0)));
    }

    #[test]
    fn test_from_finished_seat() {
        let order = SeatingOrder::new(3);
        let finished = seats(&[1]);

        assert_eq!(order.next_turn(Seat::new(1), &finished), Some(Seat::new(2)));
    }

    #[test]
    fn test_last_seat_standing() {
        let order = SeatingOrder::new(3);
        let finished = seats(&[0, 2]);

        assert_eq!(order.next_turn(Seat::new(1), &finished), None);
        assert_eq!(order.next_active(Seat::new(1), &finished), Seat::new(1));
    }

    #[test]
    fn test_unknown_seat() {
        let order = SeatingOrder::new(2);
        assert_eq!(order.next_turn(Seat::new(5), &[]), None);
    }
}
