//! In-memory statistics and badge levels.
//!
//! `StatsLedger` aggregates completed matches for named human players:
//! - Totals (games, wins, losses) and the longest match
//! - Per-player games, wins, losses, best time, win rate, badge
//! - The most recent matches, newest first, capped at `HISTORY_LIMIT`
//!
//! A match counts as a win only when the tracked human finished first.
//! Storage is the host's concern; the ledger is a serde value.

use std::collections::VecDeque;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::report::{MatchReport, StatsReporter};

/// Matches kept in the history.
pub const HISTORY_LIMIT: usize = 50;

/// Achievement level, earned by games played and games won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Badge {
    Rookie,
    Apprentice,
    Challenger,
    Strategist,
    Mastermind,
    Legend,
    Mythical,
    Grandmaster,
}

impl Badge {
    /// Every badge, lowest first.
    pub const ALL: [Badge; 8] = [
        Badge::Rookie,
        Badge::Apprentice,
        Badge::Challenger,
        Badge::Strategist,
        Badge::Mastermind,
        Badge::Legend,
        Badge::Mythical,
        Badge::Grandmaster,
    ];

    /// Minimum `(games, wins)` to hold this badge.
    #[must_use]
    pub const fn threshold(self) -> (u32, u32) {
        match self {
            Badge::Rookie => (0, 0),
            Badge::Apprentice => (1, 0),
            Badge::Challenger => (3, 1),
            Badge::Strategist => (5, 2),
            Badge::Mastermind => (10, 5),
            Badge::Legend => (15, 8),
            Badge::Mythical => (25, 15),
            Badge::Grandmaster => (50, 30),
        }
    }

    /// Highest badge earned with the given record.
    ///
    /// Badges are climbed in order; the first unmet threshold stops the climb.
    ///
    /// ```
    /// use take_two::stats::Badge;
    ///
    /// assert_eq!(Badge::for_record(0, 0), Badge::Rookie);
    /// assert_eq!(Badge::for_record(4, 1), Badge::Challenger);
    /// assert_eq!(Badge::for_record(50, 30), Badge::Grandmaster);
    /// ```
    #[must_use]
    pub fn for_record(games: u32, wins: u32) -> Self {
        Badge::ALL
            .iter()
            .take_while(|b| {
                let (min_games, min_wins) = b.threshold();
                games >= min_games && wins >= min_wins
            })
            .last()
            .copied()
            .unwrap_or(Badge::Rookie)
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One player's aggregate record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,

    /// Shortest match in milliseconds, once any match is recorded.
    pub best_time_ms: Option<u64>,
}

impl PlayerStats {
    /// Wins as a percentage of games (0 with no games).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.games) * 100.0
        }
    }

    #[must_use]
    pub fn badge(&self) -> Badge {
        Badge::for_record(self.games, self.wins)
    }
}

/// A single completed match, from the tracked player's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player_name: String,
    pub won: bool,
    pub duration_ms: u64,

    /// 1-based place of the tracked player.
    pub placement: usize,

    pub num_players: usize,
    pub hand_size: usize,

    /// Unix time in milliseconds when the match ended.
    pub ended_at_ms: u64,
}

/// Aggregate statistics across every player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub total_games: u32,
    pub total_wins: u32,
    pub total_losses: u32,
    pub longest_game_ms: u64,

    /// `(player, wins)` with the most wins.
    pub most_wins: Option<(String, u32)>,

    /// `(player, losses)` with the most losses.
    pub most_losses: Option<(String, u32)>,

    pub win_rate: f64,
}

/// In-memory statistics store.
///
/// ## Example
///
/// ```
/// use take_two::core::Seat;
/// use take_two::stats::{Badge, MatchReport, SeatResult, StatsLedger, StatsReporter};
///
/// let mut ledger = StatsLedger::new("Robin");
/// ledger.report(&MatchReport {
///     seat_results: vec![
///         SeatResult { seat: Seat::new(0), finish_rank: 1, moves_played: 6, human: true },
///         SeatResult { seat: Seat::new(1), finish_rank: 2, moves_played: 5, human: false },
///     ],
///     start_ms: 0,
///     end_ms: 90_000,
///     hand_size: 7,
///     num_players: 2,
/// });
///
/// let stats = ledger.player("Robin").unwrap();
/// assert_eq!(stats.wins, 1);
/// assert_eq!(stats.badge(), Badge::Apprentice);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsLedger {
    /// Name recorded for the next reports.
    current_player: String,

    total_games: u32,
    total_wins: u32,
    total_losses: u32,
    longest_game_ms: u64,

    players: FxHashMap<String, PlayerStats>,

    /// Newest first.
    history: VecDeque<GameRecord>,
}

impl StatsLedger {
    /// Create an empty ledger recording matches for `player_name`.
    #[must_use]
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            current_player: player_name.into(),
            ..Self::default()
        }
    }

    /// Record subsequent matches under another name.
    pub fn set_player(&mut self, player_name: impl Into<String>) {
        self.current_player = player_name.into();
    }

    #[must_use]
    pub fn current_player(&self) -> &str {
        &self.current_player
    }

    /// Record a match for the current player.
    ///
    /// Matches without a human seat are ignored.
    pub fn record(&mut self, report: &MatchReport) {
        let Some(human) = report.human_result() else {
            debug!("match without a human seat not recorded");
            return;
        };

        let won = human.finish_rank == 1;
        let duration = report.duration_ms();

        self.total_games += 1;
        if won {
            self.total_wins += 1;
        } else {
            self.total_losses += 1;
        }
        self.longest_game_ms = self.longest_game_ms.max(duration);

        let stats = self.players.entry(self.current_player.clone()).or_default();
        stats.games += 1;
        if won {
            stats.wins += 1;
        } else {
            stats.losses += 1;
        }
        stats.best_time_ms = Some(stats.best_time_ms.map_or(duration, |best| best.min(duration)));

        self.history.push_front(GameRecord {
            player_name: self.current_player.clone(),
            won,
            duration_ms: duration,
            placement: human.finish_rank,
            num_players: report.num_players,
            hand_size: report.hand_size,
            ended_at_ms: report.end_ms,
        });
        self.history.truncate(HISTORY_LIMIT);

        debug!(
            player = %self.current_player,
            won,
            placement = human.finish_rank,
            duration_ms = duration,
            "recorded match"
        );
    }

    /// Stats for a player, if they have played.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerStats> {
        self.players.get(name)
    }

    /// Badge for a player (Rookie if unknown).
    #[must_use]
    pub fn badge(&self, name: &str) -> Badge {
        self.player(name).map_or(Badge::Rookie, PlayerStats::badge)
    }

    /// Recent matches, newest first.
    pub fn history(&self) -> impl Iterator<Item = &GameRecord> {
        self.history.iter()
    }

    /// Totals across every player.
    #[must_use]
    pub fn summary(&self) -> GlobalSummary {
        let most = |key: fn(&PlayerStats) -> u32| {
            let mut best: Option<(String, u32)> = None;
            let mut names: Vec<&String> = self.players.keys().collect();
            names.sort();
            for name in names {
                let count = key(&self.players[name]);
                if count > 0 && best.as_ref().map_or(true, |(_, c)| count > *c) {
                    best = Some((name.clone(), count));
                }
            }
            best
        };

        GlobalSummary {
            total_games: self.total_games,
            total_wins: self.total_wins,
            total_losses: self.total_losses,
            longest_game_ms: self.longest_game_ms,
            most_wins: most(|s: &PlayerStats| s.wins),
            most_losses: most(|s: &PlayerStats| s.losses),
            win_rate: if self.total_games == 0 {
                0.0
            } else {
                f64::from(self.total_wins) / f64::from(self.total_games) * 100.0
            },
        }
    }
}

impl StatsReporter for StatsLedger {
    fn report(&mut self, report: &MatchReport) {
        self.record(report);
    }
}

/// Render a duration as "4m 5s" or "12s" ("N/A" for zero).
#[must_use]
pub fn format_duration(ms: u64) -> String {
    if ms == 0 {
        return "N/A".to_string();
    }

    let seconds = ms / 1000;
    let minutes = seconds / 60;
    let rest = seconds % 60;

    if minutes > 0 {
        format!("{minutes}m {rest}s")
    } else {
        format!("{rest}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seat::Seat;
    use crate::stats::report::SeatResult;

    fn report(human_rank: usize, duration_ms: u64) -> MatchReport {
        let ai_rank = if human_rank == 1 { 2 } else { 1 };
        let mut seat_results = vec![
            SeatResult {
                seat: Seat::new(0),
                finish_rank: human_rank,
                moves_played: 5,
                human: true,
            },
            SeatResult {
                seat: Seat::new(1),
                finish_rank: ai_rank,
                moves_played: 5,
                human: false,
            },
        ];
        seat_results.sort_by_key(|r| r.finish_rank);

        MatchReport {
            seat_results,
            start_ms: 10_000,
            end_ms: 10_000 + duration_ms,
            hand_size: 7,
            num_players: 2,
        }
    }

    #[test]
    fn test_badge_thresholds() {
        assert_eq!(Badge::for_record(1, 0), Badge::Apprentice);
        assert_eq!(Badge::for_record(3, 0), Badge::Apprentice);
        assert_eq!(Badge::for_record(5, 2), Badge::Strategist);
        assert_eq!(Badge::for_record(10, 4), Badge::Strategist);
        assert_eq!(Badge::for_record(25, 15), Badge::Mythical);
        assert_eq!(Badge::for_record(100, 29), Badge::Mythical);
    }

    #[test]
    fn test_record_win_and_loss() {
        let mut ledger = StatsLedger::new("Sam");
        ledger.record(&report(1, 30_000));
        ledger.record(&report(2, 45_000));

        let stats = ledger.player("Sam").unwrap();
        assert_eq!(stats.games, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.best_time_ms, Some(30_000));
        assert!((stats.win_rate() - 50.0).abs() < f64::EPSILON);

        let summary = ledger.summary();
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.longest_game_ms, 45_000);
        assert_eq!(summary.most_wins, Some(("Sam".to_string(), 1)));
    }

    #[test]
    fn test_history_newest_first_and_capped() {
        let mut ledger = StatsLedger::new("Sam");
        for i in 0..(HISTORY_LIMIT as u64 + 5) {
            ledger.record(&report(2, 1_000 + i));
        }

        assert_eq!(ledger.history().count(), HISTORY_LIMIT);
        let newest = ledger.history().next().unwrap();
        assert_eq!(newest.duration_ms, 1_000 + HISTORY_LIMIT as u64 + 4);
        assert_eq!(newest.placement, 2);
    }

    #[test]
    fn test_players_tracked_separately() {
        let mut ledger = StatsLedger::new("Sam");
        ledger.record(&report(1, 5_000));
        ledger.set_player("Kim");
        ledger.record(&report(2, 5_000));
        ledger.record(&report(2, 5_000));

        assert_eq!(ledger.badge("Sam"), Badge::Apprentice);
        assert_eq!(ledger.player("Kim").unwrap().losses, 2);
        assert_eq!(ledger.summary().most_losses, Some(("Kim".to_string(), 2)));
        assert_eq!(ledger.badge("nobody"), Badge::Rookie);
    }

    #[test]
    fn test_all_ai_match_ignored() {
        let mut ledger = StatsLedger::new("Sam");
        let mut all_ai = report(1, 5_000);
        for result in &mut all_ai.seat_results {
            result.human = false;
        }

        ledger.record(&all_ai);
        assert_eq!(ledger.summary().total_games, 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "N/A");
        assert_eq!(format_duration(12_400), "12s");
        assert_eq!(format_duration(245_000), "4m 5s");
    }

    #[test]
    fn test_ledger_serialization() {
        let mut ledger = StatsLedger::new("Sam");
        ledger.record(&report(1, 5_000));

        let json = serde_json::to_string(&ledger).unwrap();
        let deserialized: StatsLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, deserialized);
    }
}
