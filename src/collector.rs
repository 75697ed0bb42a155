//! Goal filtering and dominance deduplication of simulated results.
//!
//! Retained results have pairwise distinct (position, velocity) outcomes, each
//! held by the first result seen with the fewest runs. Lookups are a linear
//! scan; the retained set stays small next to the candidate count.

use serde::Serialize;

use crate::config::{GoalDirection, SimConfig};
use crate::simulate::CandidateResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    OutsideGoal,
    Added,
    /// An equal outcome was held by a result with more runs; it was dropped
    /// and the new result appended at the end.
    Replaced,
    /// An equal outcome is already held with no more runs than this one.
    Dominated,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollectorTally {
    pub offered: u64,
    pub outside_goal: u64,
    pub added: u64,
    pub replaced: u64,
    pub dominated: u64,
}

#[derive(Clone, Debug)]
pub struct Collector {
    goal_position: f64,
    goal_direction: GoalDirection,
    retained: Vec<CandidateResult>,
    tally: CollectorTally,
}

impl Collector {
    pub fn new(goal_position: f64, goal_direction: GoalDirection) -> Self {
        Self {
            goal_position,
            goal_direction,
            retained: Vec::new(),
            tally: CollectorTally::default(),
        }
    }

    pub fn for_config(config: &SimConfig) -> Self {
        Self::new(config.goal_position, config.goal_direction)
    }

    pub fn offer(&mut self, result: CandidateResult) -> Offer {
        self.tally.offered += 1;

        if !self
            .goal_direction
            .admits(result.position, self.goal_position)
        {
            self.tally.outside_goal += 1;
            return Offer::OutsideGoal;
        }

        let existing = self
            .retained
            .iter()
            .position(|held| held.same_outcome(&result));

        match existing {
            Some(idx) if result.inputs.run_count() < self.retained[idx].inputs.run_count() => {
                self.retained.remove(idx);
                self.retained.push(result);
                self.tally.replaced += 1;
                Offer::Replaced
            }
            Some(_) => {
                self.tally.dominated += 1;
                Offer::Dominated
            }
            None => {
                self.retained.push(result);
                self.tally.added += 1;
                Offer::Added
            }
        }
    }

    pub fn retained(&self) -> &[CandidateResult] {
        &self.retained
    }

    pub fn tally(&self) -> CollectorTally {
        self.tally
    }

    pub fn into_results(self) -> Vec<CandidateResult> {
        self.retained
    }
}
