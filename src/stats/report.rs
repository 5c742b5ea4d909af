//! End-of-match reporting.
//!
//! The engine hands a `MatchReport` to its `StatsReporter` exactly once,
//! when the last seat is placed. What happens to it (leaderboards, files,
//! remote storage) is up to the host.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::seat::Seat;

/// How one seat did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatResult {
    pub seat: Seat,

    /// 1-based place.
    pub finish_rank: usize,

    /// Accepted plays over the match.
    pub moves_played: u32,

    /// The seat was host-driven.
    pub human: bool,
}

/// Summary of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// One entry per seat, in finishing order.
    pub seat_results: Vec<SeatResult>,

    /// Unix time in milliseconds when the match was dealt.
    pub start_ms: u64,

    /// Unix time in milliseconds when the last seat was placed.
    pub end_ms: u64,

    pub hand_size: usize,
    pub num_players: usize,
}

impl MatchReport {
    /// Match length in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// The seat that finished first.
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.seat_results.first().map(|r| r.seat)
    }

    /// Result for a seat.
    #[must_use]
    pub fn result_for(&self, seat: Seat) -> Option<&SeatResult> {
        self.seat_results.iter().find(|r| r.seat == seat)
    }

    /// The first host-driven seat, if any.
    #[must_use]
    pub fn human_result(&self) -> Option<&SeatResult> {
        self.seat_results.iter().filter(|r| r.human).min_by_key(|r| r.seat)
    }
}

/// Receives completed matches.
pub trait StatsReporter: Send {
    fn report(&mut self, report: &MatchReport);
}

/// Ignores every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullReporter;

impl StatsReporter for NullReporter {
    fn report(&mut self, _report: &MatchReport) {}
}

/// Share a reporter between the engine and the host.
impl<R: StatsReporter> StatsReporter for Arc<Mutex<R>> {
    fn report(&mut self, report: &MatchReport) {
        if let Ok(mut inner) = self.lock() {
            inner.report(report);
        }
    }
}

/// Current Unix time in milliseconds (0 if the clock is before 1970).
#[must_use]
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
