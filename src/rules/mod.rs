//! Game rules: legality, effects, turn order, and finishing.
//!
//! The engine drives these in a fixed sequence for every accepted move:
//! validator, effect resolver, arbiter, scheduler. None of them decides
//! who is human; that is a host policy carried by `GameConfig`.

pub mod arbiter;
pub mod effects;
pub mod scheduler;
pub mod validator;

pub use arbiter::{Arbiter, GameResult};
pub use effects::{CardEffect, EffectResolver, FinishCheck, Resolution, PENALTY_PER_TWO, QUEEN_PENALTY};
pub use scheduler::SeatingOrder;
pub use validator::{check_play, legal_plays, matches_table, validate, PlayKind};
