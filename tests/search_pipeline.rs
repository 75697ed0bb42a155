use anyhow::{anyhow, Result};
use movement_sim::collector::Collector;
use movement_sim::config::{Axis, ConfigError, GoalDirection, SimConfig};
use movement_sim::inputs::InputSequence;
use movement_sim::permutations::generate_sequences;
use movement_sim::report::{write_report, write_summary};
use movement_sim::search::{run_search, search_with_rng, SearchOptions};
use movement_sim::simulate::{simulate, CandidateResult};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::fs;

const Y_CONFIG: &str = "\
frames: 14
permutations: 4000
axis: y
pos_init: 0
speed_init: 0
jump_timer: 11
jump_speed: -105
goal_position: -15
goal_direction: '-'
goal_speed: 0
prioritize_speed: true
ducking: false
on_ground: false
cold_core: false
holdable_slow: false
in_space: false
auto_jump: false
";

#[test]
fn config_file_to_summary_json() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config_path = tmp.path().join("config.yaml");
    fs::write(&config_path, Y_CONFIG)?;

    let config = SimConfig::load(&config_path)?;
    assert_eq!(config.axis, Axis::Y);
    assert_eq!(config.goal_direction, GoalDirection::Decreasing);

    let report = run_search(
        &config,
        &SearchOptions {
            seed: Some(0xDEAD_BEEF),
            jobs: Some(2),
        },
    )?;
    assert_eq!(report.total_permutations, 4000);
    if report.results.is_empty() {
        return Err(anyhow!("a held jump reaches -15 within 14 frames; expected results"));
    }

    let summary_path = tmp.path().join("out/summary.json");
    write_summary(&summary_path, &report)?;
    let summary: serde_json::Value = serde_json::from_slice(&fs::read(&summary_path)?)?;
    assert_eq!(summary["seed"], 0xDEAD_BEEFu64);
    assert_eq!(summary["axis"], "y");
    assert_eq!(summary["goal_direction"], "-");
    assert_eq!(
        summary["results"].as_array().map(Vec::len),
        Some(report.results.len())
    );

    let mut text = Vec::new();
    write_report(&mut text, &report, Some(5))?;
    let text = String::from_utf8(text)?;
    assert!(text.contains("total permutations: 4000"));
    Ok(())
}

#[test]
fn reported_results_replay_to_the_same_outcome() -> Result<()> {
    let config = SimConfig::from_yaml_str(Y_CONFIG)?;
    let report = run_search(
        &config,
        &SearchOptions {
            seed: Some(77),
            jobs: None,
        },
    )?;

    for result in &report.results {
        let replayed = simulate(&result.inputs, &config);
        assert_eq!(replayed.position, result.position);
        assert_eq!(replayed.velocity, result.velocity);

        let reparsed = InputSequence::parse(&result.inputs.compact(), config.axis, config.frames)?;
        assert_eq!(&reparsed, &result.inputs);
    }
    Ok(())
}

#[test]
fn search_matches_a_hand_rolled_pipeline() -> Result<()> {
    let config = SimConfig {
        frames: 9,
        permutations: 1500,
        goal_position: 2.0,
        ..SimConfig::example(Axis::X)
    };

    let mut rng = Pcg64::seed_from_u64(5);
    let report = search_with_rng(&config, &mut rng, 5, Some(3))?;

    let mut rng = Pcg64::seed_from_u64(5);
    let mut collector = Collector::for_config(&config);
    for inputs in generate_sequences(&mut rng, config.axis, config.frames, config.permutations) {
        let outcome = simulate(&inputs, &config);
        collector.offer(CandidateResult::new(outcome, inputs));
    }
    let mut expected = collector.into_results();
    movement_sim::ranking::rank(
        &mut expected,
        &movement_sim::ranking::RankPolicy::for_config(&config),
    );

    assert_eq!(report.results, expected);
    Ok(())
}

#[test]
fn bad_goal_direction_is_reported_by_name() {
    let doc = Y_CONFIG.replace("goal_direction: '-'", "goal_direction: down");
    match SimConfig::from_yaml_str(&doc) {
        Err(err @ ConfigError::InvalidGoalDirection { .. }) => {
            assert!(err.to_string().contains("down"));
        }
        other => panic!("expected InvalidGoalDirection, got {other:?}"),
    }
}
