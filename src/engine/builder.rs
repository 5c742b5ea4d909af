//! Engine construction.

use tracing::info;

use super::events::{Notifier, NullNotifier};
use super::Engine;
use crate::ai::{HeuristicStrategist, Strategist};
use crate::core::config::{AiConfig, GameConfig};
use crate::core::rng::{GameRng, Shuffler};
use crate::core::seat::Seat;
use crate::core::state::GameState;
use crate::error::ConfigError;
use crate::piles::PileManager;
use crate::rules::scheduler::SeatingOrder;
use crate::stats::{unix_millis, NullReporter, StatsReporter};

/// Builder for a new match.
///
/// Every collaborator is optional: the defaults are a ChaCha shuffle seeded
/// from `GameConfig::seed` (or entropy), the heuristic strategist, and
/// sinks that discard reports and events.
///
/// ```
/// use take_two::core::Seat;
/// use take_two::engine::EngineBuilder;
///
/// let engine = EngineBuilder::new(4)
///     .hand_size(5)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.state().player_count(), 4);
/// assert_eq!(engine.state().seed, Some(42));
/// assert!(engine.is_ai_seat(Seat::new(3)));
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    ai_config: AiConfig,
    shuffler: Option<Box<dyn Shuffler>>,
    strategist: Option<Box<dyn Strategist>>,
    reporter: Option<Box<dyn StatsReporter>>,
    notifier: Option<Box<dyn Notifier>>,
}

impl EngineBuilder {
    /// Start a match for `player_count` seats with default settings.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self::from_config(GameConfig::default().with_players(player_count))
    }

    /// Start from a complete configuration.
    #[must_use]
    pub fn from_config(config: GameConfig) -> Self {
        Self {
            config,
            ai_config: AiConfig::default(),
            shuffler: None,
            strategist: None,
            reporter: None,
            notifier: None,
        }
    }

    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Seats driven by the host. An empty list runs an all-AI match.
    #[must_use]
    pub fn human_seats(mut self, seats: Vec<Seat>) -> Self {
        self.config.human_seats = seats;
        self
    }

    /// Thresholds for the default strategist.
    #[must_use]
    pub fn ai_config(mut self, config: AiConfig) -> Self {
        self.ai_config = config;
        self
    }

    /// Replace the shuffle source (the seed is then only recorded).
    #[must_use]
    pub fn shuffler(mut self, shuffler: Box<dyn Shuffler>) -> Self {
        self.shuffler = Some(shuffler);
        self
    }

    #[must_use]
    pub fn strategist(mut self, strategist: Box<dyn Strategist>) -> Self {
        self.strategist = Some(strategist);
        self
    }

    #[must_use]
    pub fn reporter(mut self, reporter: Box<dyn StatsReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Deal the match and apply the opening card.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let mut config = self.config;
        config.validate()?;

        let shuffler: Box<dyn Shuffler> = match (self.shuffler, config.seed) {
            (Some(shuffler), _) => shuffler,
            (None, Some(seed)) => Box::new(GameRng::new(seed)),
            (None, None) => {
                let (rng, seed) = GameRng::from_entropy();
                config.seed = Some(seed);
                Box::new(rng)
            }
        };

        let seating = SeatingOrder::new(config.player_count);
        let mut piles = PileManager::new(shuffler);
        let deal = piles.deal(&seating, config.hand_size)?;
        let state = GameState::from_deal(piles, deal, seating, config.hand_size, config.seed);

        let strategist = self
            .strategist
            .unwrap_or_else(|| Box::new(HeuristicStrategist::new(self.ai_config, config.tracked_human())));

        info!(
            players = config.player_count,
            hand_size = config.hand_size,
            seed = ?config.seed,
            start = %state.table.active_card,
            "new game"
        );

        let mut engine = Engine {
            state,
            config,
            strategist,
            reporter: self.reporter.unwrap_or_else(|| Box::new(NullReporter)),
            notifier: self.notifier.unwrap_or_else(|| Box::new(NullNotifier)),
            start_ms: unix_millis(),
            reported: false,
        };
        engine.apply_opening_card();

        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_rejected() {
        assert_eq!(
            EngineBuilder::new(5).build().err(),
            Some(ConfigError::PlayerCount(5))
        );
        assert!(matches!(
            EngineBuilder::new(4).hand_size(13).build().err(),
            Some(ConfigError::HandSize { .. })
        ));
        assert_eq!(
            EngineBuilder::new(2).human_seats(vec![Seat::new(3)]).build().err(),
            Some(ConfigError::UnknownSeat(Seat::new(3)))
        );
    }

    #[test]
    fn test_unseeded_build_records_seed() {
        let engine = EngineBuilder::new(3).build().unwrap();
        assert!(engine.state().seed.is_some());
        assert!(engine.state().is_conserved());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = EngineBuilder::new(4).seed(9).build().unwrap();
        let b = EngineBuilder::new(4).seed(9).build().unwrap();

        for seat in Seat::all(4) {
            assert_eq!(a.state().hand(seat), b.state().hand(seat));
        }
        assert_eq!(a.state().table, b.state().table);
    }
}
