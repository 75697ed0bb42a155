use anyhow::{anyhow, Context, Result};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use crate::collector::{Collector, CollectorTally};
use crate::config::{Axis, GoalDirection, SimConfig};
use crate::inputs::InputSequence;
use crate::permutations::generate_sequences;
use crate::ranking::{rank, RankPolicy};
use crate::simulate::{simulate, CandidateResult};

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchOptions {
    /// Seed for sequence generation; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Simulation threads; rayon's global pool when absent.
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    pub seed: u64,
    pub axis: Axis,
    pub frames: u32,
    pub goal_position: f64,
    pub goal_direction: GoalDirection,
    pub goal_speed: f64,
    pub prioritize_speed: bool,
    pub jobs: Option<usize>,
    pub total_permutations: usize,
    pub shown_permutations: usize,
    pub tally: CollectorTally,
    pub processing_time_s: f64,
    /// Ranked, most preferred last.
    pub results: Vec<CandidateResult>,
}

pub fn run_search(config: &SimConfig, options: &SearchOptions) -> Result<SearchReport> {
    config.validate()?;
    if options.jobs == Some(0) {
        return Err(anyhow!("--jobs must be >= 1 when provided"));
    }

    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg64::seed_from_u64(seed);
    search_with_rng(config, &mut rng, seed, options.jobs)
}

/// Run the pipeline with a caller-provided rng. `seed` is only recorded.
pub fn search_with_rng<R: Rng + ?Sized>(
    config: &SimConfig,
    rng: &mut R,
    seed: u64,
    jobs: Option<usize>,
) -> Result<SearchReport> {
    let start = Instant::now();

    tracing::info!(
        axis = config.axis.as_str(),
        frames = config.frames,
        permutations = config.permutations,
        seed,
        "building permutations"
    );
    let sequences = generate_sequences(rng, config.axis, config.frames, config.permutations);

    tracing::info!(count = sequences.len(), "simulating inputs");
    let results = simulate_all(config, sequences, jobs)?;

    let mut collector = Collector::for_config(config);
    for result in results {
        collector.offer(result);
    }
    let tally = collector.tally();
    tracing::debug!(
        outside_goal = tally.outside_goal,
        added = tally.added,
        replaced = tally.replaced,
        dominated = tally.dominated,
        "collected results"
    );

    let mut ranked = collector.into_results();
    rank(&mut ranked, &RankPolicy::for_config(config));

    let elapsed = start.elapsed();
    tracing::info!(
        shown = ranked.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "search complete"
    );

    Ok(SearchReport {
        seed,
        axis: config.axis,
        frames: config.frames,
        goal_position: config.goal_position,
        goal_direction: config.goal_direction,
        goal_speed: config.goal_speed,
        prioritize_speed: config.prioritize_speed,
        jobs,
        total_permutations: tally.offered as usize,
        shown_permutations: ranked.len(),
        tally,
        processing_time_s: elapsed.as_secs_f64(),
        results: ranked,
    })
}

/// Simulate every sequence, keeping input order so collection sees the same
/// arrival order at any thread count.
fn simulate_all(
    config: &SimConfig,
    sequences: Vec<InputSequence>,
    jobs: Option<usize>,
) -> Result<Vec<CandidateResult>> {
    let run_one = |inputs: InputSequence| {
        let outcome = simulate(&inputs, config);
        CandidateResult::new(outcome, inputs)
    };

    let results: Vec<CandidateResult> = if let Some(jobs) = jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| sequences.into_par_iter().map(run_one).collect())
    } else {
        sequences.into_par_iter().map(run_one).collect()
    };
    Ok(results)
}
