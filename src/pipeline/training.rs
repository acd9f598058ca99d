//! Training pipeline for the grid world agent

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    grid::Cell,
    ports::Observer,
    td::{GridWorld, Round},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training rounds. Each round is either one step or one
    /// backup-and-restart.
    pub rounds: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { rounds: 50 }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Rounds played
    pub rounds: usize,

    /// Episodes that were backed up
    pub episodes: usize,

    /// Episodes that ended on the win cell
    pub wins: usize,

    /// Episodes that ended on the lose cell
    pub losses: usize,

    /// Steps taken across all rounds, including any unfinished episode
    pub steps: usize,

    /// Mean steps per backed-up episode (0.0 when none finished)
    pub mean_episode_length: f64,

    /// Where the agent stood after the last round
    pub final_position: Cell,

    /// Final value table, `values[row][col]`
    pub values: Vec<Vec<f64>>,
}

impl TrainingReport {
    /// Fraction of finished episodes that were wins
    pub fn win_rate(&self) -> f64 {
        if self.episodes > 0 {
            self.wins as f64 / self.episodes as f64
        } else {
            0.0
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the agent for a fixed number of rounds and reports to observers
///
/// Observers may be owned or borrowed (`Box::new(&mut metrics)`); a borrowed
/// observer can be read once the pipeline is dropped.
pub struct TrainingPipeline<'a> {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> TrainingPipeline<'a> {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer + 'a>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run every round against `agent`.
    ///
    /// A round on a terminal cell backs up, restarts and notifies
    /// `on_episode_end`; any other round takes one step and notifies
    /// `on_step`.
    pub fn run<R: Rng>(&mut self, agent: &mut GridWorld<R>) -> Result<TrainingReport> {
        let mut episodes = 0;
        let mut wins = 0;
        let mut losses = 0;
        let mut steps = 0;
        let mut finished_steps = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.rounds)?;
        }

        for round in 0..self.config.rounds {
            match agent.play_round() {
                Round::Step(record) => {
                    steps += 1;
                    for observer in &mut self.observers {
                        observer.on_step(round, &record)?;
                    }
                }
                Round::EpisodeEnd(summary) => {
                    episodes += 1;
                    finished_steps += summary.steps;
                    if summary.is_win() {
                        wins += 1;
                    } else if summary.is_loss() {
                        losses += 1;
                    }
                    for observer in &mut self.observers {
                        observer.on_episode_end(round, &summary, agent.values())?;
                    }
                }
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end(agent.values())?;
        }

        let mean_episode_length = if episodes > 0 {
            finished_steps as f64 / episodes as f64
        } else {
            0.0
        };

        tracing::info!(
            rounds = self.config.rounds,
            episodes,
            wins,
            losses,
            "training finished"
        );

        Ok(TrainingReport {
            rounds: self.config.rounds,
            episodes,
            wins,
            losses,
            steps,
            mean_episode_length,
            final_position: agent.state(),
            values: agent.values().rows(),
        })
    }
}
