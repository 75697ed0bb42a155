//! Random-sampling search for platformer movement inputs.
//!
//! Candidate input sequences are drawn at random, replayed through a
//! per-frame movement model on one axis, filtered against a goal position,
//! deduplicated by outcome, and ranked.

pub mod collector;
pub mod config;
pub mod inputs;
pub mod permutations;
pub mod physics;
pub mod ranking;
pub mod report;
pub mod search;
pub mod simulate;
pub mod util;

pub use collector::{Collector, Offer};
pub use config::{Axis, ConfigError, GoalDirection, SimConfig};
pub use inputs::{InputSequence, InputSymbol, Run};
pub use search::{run_search, SearchOptions, SearchReport};
pub use simulate::{simulate, CandidateResult, Outcome};
