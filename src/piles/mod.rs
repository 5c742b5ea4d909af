//! Draw and discard piles.
//!
//! ## Key Types
//!
//! - `PileManager`: owns the stock and the discard pile
//! - `Deal`: hands and start card produced by a fresh deal
//! - `DrawOutcome`: cards handed out by a draw, with recycle/exhaustion flags

pub mod manager;

pub use manager::{Deal, DrawOutcome, PileManager};
