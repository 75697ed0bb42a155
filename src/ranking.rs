//! Result ordering. Reports print best last, so "preferred" means "later".
//!
//! Ranking is two full stable sorts rather than one combined comparator: the
//! sort applied last is the dominant key and equal keys keep the order left
//! by the first sort (and, below that, collection order).

use std::cmp::Ordering;

use crate::config::{GoalDirection, SimConfig};
use crate::simulate::CandidateResult;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankPolicy {
    pub goal_direction: GoalDirection,
    pub goal_speed: f64,
    pub prioritize_speed: bool,
}

impl RankPolicy {
    pub fn for_config(config: &SimConfig) -> Self {
        Self {
            goal_direction: config.goal_direction,
            goal_speed: config.goal_speed,
            prioritize_speed: config.prioritize_speed,
        }
    }
}

#[inline]
fn directed(order: Ordering, descending: bool) -> Ordering {
    if descending {
        order.reverse()
    } else {
        order
    }
}

/// Position key: descending for `+` goals, ascending for `-` goals.
pub fn sort_by_position(results: &mut [CandidateResult], goal_direction: GoalDirection) {
    let descending = goal_direction == GoalDirection::Increasing;
    results.sort_by(|a, b| directed(a.position.total_cmp(&b.position), descending));
}

/// Speed key, distance from `goal_speed`: descending for `-` goals,
/// ascending for `+` goals.
pub fn sort_by_speed_error(
    results: &mut [CandidateResult],
    goal_direction: GoalDirection,
    goal_speed: f64,
) {
    let descending = goal_direction == GoalDirection::Decreasing;
    results.sort_by(|a, b| {
        let a_err = (a.velocity - goal_speed).abs();
        let b_err = (b.velocity - goal_speed).abs();
        directed(a_err.total_cmp(&b_err), descending)
    });
}

pub fn rank(results: &mut [CandidateResult], policy: &RankPolicy) {
    if policy.prioritize_speed {
        sort_by_position(results, policy.goal_direction);
        sort_by_speed_error(results, policy.goal_direction, policy.goal_speed);
    } else {
        sort_by_speed_error(results, policy.goal_direction, policy.goal_speed);
        sort_by_position(results, policy.goal_direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{InputSequence, InputSymbol, Run};
    use crate::simulate::Outcome;
    use proptest::prelude::*;

    fn result(position: f64, velocity: f64) -> CandidateResult {
        CandidateResult::new(
            Outcome { position, velocity },
            InputSequence::new(vec![Run::new(1, InputSymbol::Neutral)]),
        )
    }

    fn outcomes(results: &[CandidateResult]) -> Vec<(f64, f64)> {
        results.iter().map(|r| (r.position, r.velocity)).collect()
    }

    #[test]
    fn position_first_increasing_goal() {
        let mut results = vec![
            result(12.0, 80.0),
            result(15.0, 90.0),
            result(12.0, 90.0),
            result(20.0, 60.0),
        ];
        rank(
            &mut results,
            &RankPolicy {
                goal_direction: GoalDirection::Increasing,
                goal_speed: 90.0,
                prioritize_speed: false,
            },
        );
        // Speed pass (ascending error) puts 12/90 ahead of 12/80; the position
        // pass (descending) is dominant and keeps that tie order.
        assert_eq!(
            outcomes(&results),
            vec![(20.0, 60.0), (15.0, 90.0), (12.0, 90.0), (12.0, 80.0)]
        );
    }

    #[test]
    fn speed_first_decreasing_goal() {
        let mut results = vec![
            result(-3.0, 10.0),
            result(-5.0, 0.0),
            result(-4.0, 10.0),
            result(-1.0, -30.0),
        ];
        rank(
            &mut results,
            &RankPolicy {
                goal_direction: GoalDirection::Decreasing,
                goal_speed: 0.0,
                prioritize_speed: true,
            },
        );
        // Position pass ascending, then speed error descending (dominant).
        assert_eq!(
            outcomes(&results),
            vec![(-1.0, -30.0), (-4.0, 10.0), (-3.0, 10.0), (-5.0, 0.0)]
        );
    }

    #[test]
    fn full_ties_keep_collection_order() {
        let mut results = vec![result(7.0, 95.0), result(7.0, 85.0), result(7.0, 95.0)];
        results[0].inputs = InputSequence::new(vec![Run::new(1, InputSymbol::Left)]);
        results[1].inputs = InputSequence::new(vec![Run::new(1, InputSymbol::Right)]);
        rank(
            &mut results,
            &RankPolicy {
                goal_direction: GoalDirection::Increasing,
                goal_speed: 90.0,
                prioritize_speed: true,
            },
        );
        assert_eq!(results[0].inputs.runs()[0].symbol, InputSymbol::Left);
        assert_eq!(results[1].inputs.runs()[0].symbol, InputSymbol::Right);
        assert_eq!(results[2].inputs.runs()[0].symbol, InputSymbol::Neutral);
    }

    fn policy_strategy() -> impl Strategy<Value = RankPolicy> {
        (any::<bool>(), any::<bool>(), -50i32..50).prop_map(|(inc, speed, goal)| RankPolicy {
            goal_direction: if inc {
                GoalDirection::Increasing
            } else {
                GoalDirection::Decreasing
            },
            goal_speed: goal as f64,
            prioritize_speed: speed,
        })
    }

    proptest! {
        #[test]
        fn dominant_key_is_monotonic_and_ties_follow_secondary(
            raw in prop::collection::vec((-20i32..20, -20i32..20), 0..60),
            policy in policy_strategy(),
        ) {
            let mut results: Vec<_> = raw
                .iter()
                .map(|&(p, v)| result(p as f64, v as f64))
                .collect();
            rank(&mut results, &policy);

            let pos_desc = policy.goal_direction == GoalDirection::Increasing;
            let speed_desc = policy.goal_direction == GoalDirection::Decreasing;
            let speed_key = |r: &CandidateResult| (r.velocity - policy.goal_speed).abs();
            let pos_key = |r: &CandidateResult| r.position;

            for pair in results.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let (dominant, secondary) = if policy.prioritize_speed {
                    (
                        directed(speed_key(a).total_cmp(&speed_key(b)), speed_desc),
                        directed(pos_key(a).total_cmp(&pos_key(b)), pos_desc),
                    )
                } else {
                    (
                        directed(pos_key(a).total_cmp(&pos_key(b)), pos_desc),
                        directed(speed_key(a).total_cmp(&speed_key(b)), speed_desc),
                    )
                };
                prop_assert_ne!(dominant, Ordering::Greater);
                if dominant == Ordering::Equal {
                    prop_assert_ne!(secondary, Ordering::Greater);
                }
            }
        }
    }
}
