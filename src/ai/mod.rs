//! Computer opponents.
//!
//! ## Key Types
//!
//! - `Strategist`: trait the engine calls for computer-controlled seats
//! - `HeuristicStrategist`: rule-based default implementation
//! - `PlayHistory`: observed habits of the human seat

pub mod heuristic;
pub mod history;

pub use heuristic::{Decision, HeuristicStrategist, Strategist};
pub use history::PlayHistory;
