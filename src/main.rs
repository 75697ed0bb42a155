use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use movement_sim::config::{Axis, SimConfig};
use movement_sim::inputs::InputSequence;
use movement_sim::report::{format_result, write_report, write_summary, Tee};
use movement_sim::search::{run_search, SearchOptions};
use movement_sim::simulate::{simulate, trace, CandidateResult};
use movement_sim::util::parse_seed;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "movement-sim")]
#[command(about = "Brute-force random search for movement input sequences that reach a goal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample random input sequences and report the ones that reach the goal
    Run {
        #[arg(long, default_value = "config.yaml")]
        config: PathBuf,
        /// Decimal or 0x-prefixed hex; random when omitted
        #[arg(long)]
        seed: Option<String>,
        #[arg(long)]
        jobs: Option<usize>,
        /// Only print the best N results
        #[arg(long)]
        limit: Option<usize>,
        /// Also write the text report to this file (replaced if present)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the full report as JSON
        #[arg(long)]
        summary: Option<PathBuf>,
    },
    /// Simulate one input sequence, e.g. --inputs "12r,3,5l"
    Replay {
        #[arg(long, default_value = "config.yaml")]
        config: PathBuf,
        #[arg(long)]
        inputs: String,
        /// Print the state after every frame
        #[arg(long, default_value_t = false)]
        frames: bool,
    },
    /// Print a starting config document
    ExampleConfig {
        #[arg(long, value_enum, default_value_t = CliAxis::X)]
        axis: CliAxis,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAxis {
    X,
    Y,
}

impl From<CliAxis> for Axis {
    fn from(value: CliAxis) -> Self {
        match value {
            CliAxis::X => Axis::X,
            CliAxis::Y => Axis::Y,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let Cli { command } = Cli::parse();

    match command {
        Commands::Run {
            config,
            seed,
            jobs,
            limit,
            out,
            summary,
        } => {
            let sim_config = SimConfig::load(&config)?;
            let seed = seed.as_deref().map(parse_seed).transpose()?;
            let report = run_search(&sim_config, &SearchOptions { seed, jobs })?;

            let stdout = io::stdout().lock();
            if let Some(path) = out {
                let file = File::create(&path)
                    .with_context(|| format!("failed creating {}", path.display()))?;
                let mut sink = Tee::new(stdout, BufWriter::new(file));
                write_report(&mut sink, &report, limit)?;
            } else {
                let mut sink = stdout;
                write_report(&mut sink, &report, limit)?;
            }

            if let Some(path) = summary {
                write_summary(&path, &report)?;
                tracing::info!(path = %path.display(), "wrote summary");
            }
        }
        Commands::Replay {
            config,
            inputs,
            frames,
        } => {
            let sim_config = SimConfig::load(&config)?;
            let sequence = InputSequence::parse(&inputs, sim_config.axis, sim_config.frames)
                .with_context(|| format!("invalid --inputs '{inputs}'"))?;

            let mut stdout = io::stdout().lock();
            if frames {
                for (idx, state) in trace(&sequence, &sim_config).iter().enumerate() {
                    writeln!(
                        stdout,
                        "frame={} position={} velocity={}",
                        idx + 1,
                        state.position,
                        state.velocity
                    )?;
                }
            }
            let result = CandidateResult::new(simulate(&sequence, &sim_config), sequence);
            let reached = sim_config
                .goal_direction
                .admits(result.position, sim_config.goal_position);
            writeln!(stdout, "{}", format_result(&result))?;
            writeln!(stdout, "runs={}", result.inputs.run_count())?;
            writeln!(stdout, "goal_reached={reached}")?;
        }
        Commands::ExampleConfig { axis } => {
            print!("{}", SimConfig::example(axis.into()).to_yaml()?);
        }
    }

    Ok(())
}
