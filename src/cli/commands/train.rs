//! Train command - run the TD agent on the grid and print what it learned

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{format_percent, print_section, print_stats_table},
    config::{AgentConfig, DEFAULT_SEED, Dynamics},
    grid::Cell,
    pipeline::{
        ConsoleObserver, MetricsObserver, ProgressObserver, TrainingConfig, TrainingPipeline,
        TrainingReport,
    },
    td::GridWorld,
};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "gridworld",
    version,
    about = "Train a tabular TD agent on a 3x4 grid world"
)]
pub struct TrainArgs {
    /// Number of training rounds (one step or one backup each)
    #[arg(long, short = 'r', default_value_t = 50)]
    pub rounds: usize,

    /// Learning rate α for the value backup
    #[arg(long, short = 'a', default_value_t = 0.3)]
    pub learning_rate: f64,

    /// Probability of taking a random action
    #[arg(long, short = 'e', default_value_t = 0.2)]
    pub exploration_rate: f64,

    /// Random seed
    #[arg(long, short = 's', default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Row of the first episode's start cell
    #[arg(long, default_value_t = 0)]
    pub start_row: usize,

    /// Column of the first episode's start cell
    #[arg(long, default_value_t = 2)]
    pub start_col: usize,

    /// Request stochastic transitions (not supported; rejected)
    #[arg(long)]
    pub stochastic: bool,

    /// Only print value tables, not every step
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Show a progress bar instead of step lines
    #[arg(long)]
    pub progress: bool,

    /// Print the final report as JSON instead of the summary table
    #[arg(long)]
    pub json: bool,
}

impl TrainArgs {
    /// Agent configuration described by these arguments
    pub fn agent_config(&self) -> AgentConfig {
        let dynamics = if self.stochastic {
            Dynamics::Stochastic
        } else {
            Dynamics::Deterministic
        };
        AgentConfig::new()
            .with_learning_rate(self.learning_rate)
            .with_exploration_rate(self.exploration_rate)
            .with_start(Cell::new(self.start_row, self.start_col))
            .with_dynamics(dynamics)
            .with_seed(self.seed)
    }
}

/// Run training as described by `args`, printing progress and results.
pub fn execute(args: TrainArgs) -> Result<()> {
    run(&args).map(|_| ())
}

/// Like [`execute`], but hands back the report.
pub fn run(args: &TrainArgs) -> Result<TrainingReport> {
    let config = args.agent_config();
    let mut agent = GridWorld::new(config.clone()).context("invalid agent configuration")?;

    tracing::debug!(?config, rounds = args.rounds, "starting training");

    let mut metrics = MetricsObserver::new();
    let report = {
        let console = ConsoleObserver::stdout().with_steps(!args.quiet && !args.progress);
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            rounds: args.rounds,
        })
        .with_observer(Box::new(console))
        .with_observer(Box::new(&mut metrics));
        if args.progress {
            pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
        }
        pipeline.run(&mut agent).context("training failed")?
    };

    if args.json {
        println!("{}", report.to_json_pretty()?);
    } else {
        print_summary(&report, &config, &metrics);
    }

    Ok(report)
}

fn print_summary(report: &TrainingReport, config: &AgentConfig, metrics: &MetricsObserver) {
    let summary = metrics.summary();
    print_section("Training summary");
    print_stats_table(&[
        ("Rounds", report.rounds.to_string()),
        ("Learning rate", config.learning_rate.to_string()),
        ("Exploration rate", config.exploration_rate.to_string()),
        ("Seed", config.seed.to_string()),
        ("Episodes", report.episodes.to_string()),
        ("Wins", report.wins.to_string()),
        ("Losses", report.losses.to_string()),
        ("Win rate", format_percent(report.win_rate())),
        (
            "Mean episode length",
            format!("{:.2}", report.mean_episode_length),
        ),
        ("Explore steps", summary.explore_steps.to_string()),
        ("Greedy steps", summary.greedy_steps.to_string()),
        (
            "Exploration share",
            format_percent(metrics.exploration_fraction()),
        ),
        ("Final position", report.final_position.to_string()),
    ]);
}
