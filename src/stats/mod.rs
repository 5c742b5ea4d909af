//! Match statistics.
//!
//! ## Key Types
//!
//! - `MatchReport`: what the engine reports once per completed match
//! - `StatsReporter`: sink for reports
//! - `StatsLedger`: in-memory aggregate with badge levels

pub mod ledger;
pub mod report;

pub use ledger::{format_duration, Badge, GameRecord, GlobalSummary, PlayerStats, StatsLedger, HISTORY_LIMIT};
pub use report::{unix_millis, MatchReport, NullReporter, SeatResult, StatsReporter};
