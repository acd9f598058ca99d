//! The grid world TD agent
//!
//! The agent walks the grid with an ε-greedy policy over its value table,
//! records every cell it enters, and at the end of an episode pushes all of
//! those cells toward the episode's reward.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    config::AgentConfig,
    grid::{self, Action, Cell},
    td::value_table::ValueTable,
};

/// An action considered by greedy selection, with where it leads and the
/// value of that cell at the time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub action: Action,
    pub next: Cell,
    pub value: f64,
}

/// How an action was picked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Explore,
    /// Greedy pick; `candidates` follows the `Action::ALL` scan order.
    Greedy { candidates: [Candidate; 4] },
}

impl Decision {
    pub fn is_greedy(&self) -> bool {
        matches!(self, Decision::Greedy { .. })
    }
}

/// One time step of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub from: Cell,
    pub action: Action,
    pub to: Cell,
    pub decision: Decision,
}

/// What happened when an episode was backed up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Cell the episode ended on
    pub terminal: Cell,
    pub reward: f64,
    /// Number of steps taken, i.e. the trajectory length
    pub steps: usize,
}

impl EpisodeSummary {
    pub fn is_win(&self) -> bool {
        self.terminal == grid::WIN
    }

    pub fn is_loss(&self) -> bool {
        self.terminal == grid::LOSE
    }
}

/// Result of a single training round.
#[derive(Debug, Clone, PartialEq)]
pub enum Round {
    /// The agent moved one step.
    Step(StepRecord),
    /// The agent was on a terminal cell, so it backed up and restarted.
    EpisodeEnd(EpisodeSummary),
}

/// Tabular TD agent on the fixed grid.
///
/// The random source is injected so callers control the exploration stream.
/// [`GridWorld::new`] seeds a [`StdRng`] from the configuration.
#[derive(Debug, Clone)]
pub struct GridWorld<R = StdRng> {
    learning_rate: f64,
    exploration_rate: f64,
    state: Cell,
    trajectory: Vec<Cell>,
    values: ValueTable,
    rng: R,
}

impl GridWorld<StdRng> {
    /// Create an agent whose generator is seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`AgentConfig::validate`] if the configuration
    /// is rejected.
    pub fn new(config: AgentConfig) -> Result<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GridWorld<R> {
    /// Create an agent that draws from `rng`. `config.seed` is ignored.
    pub fn with_rng(config: AgentConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            learning_rate: config.learning_rate,
            exploration_rate: config.exploration_rate,
            state: config.start,
            trajectory: Vec::new(),
            values: ValueTable::new(),
            rng,
        })
    }

    pub fn state(&self) -> Cell {
        self.state
    }

    /// Cells entered during the current episode, oldest first.
    pub fn trajectory(&self) -> &[Cell] {
        &self.trajectory
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn is_terminal(&self) -> bool {
        grid::is_terminal(self.state)
    }

    /// ε-greedy action choice from the current cell.
    ///
    /// One uniform draw decides between exploring and exploiting; exploring
    /// takes a second draw from the same generator.
    pub fn choose_action(&mut self) -> (Action, Decision) {
        if self.rng.random::<f64>() <= self.exploration_rate {
            // ALL is never empty
            let action = Action::ALL
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(Action::Up);
            debug!(from = %self.state, %action, "exploring");
            (action, Decision::Explore)
        } else {
            let scanned = candidates(&self.values, self.state);
            let action = pick_greedy(&scanned);
            debug!(from = %self.state, %action, "greedy");
            (
                action,
                Decision::Greedy {
                    candidates: scanned,
                },
            )
        }
    }

    /// Take one step: choose, record the next cell, move there.
    ///
    /// Does not check whether the agent is already on a terminal cell.
    pub fn step(&mut self) -> StepRecord {
        let (action, decision) = self.choose_action();
        let from = self.state;
        let to = grid::transition(from, action);
        self.trajectory.push(to);
        self.state = to;
        StepRecord {
            from,
            action,
            to,
            decision,
        }
    }

    /// Apply the episode reward of the current cell to the trajectory.
    pub fn backup(&mut self) -> EpisodeSummary {
        let reward = grid::reward(self.state);
        self.values.backup(&self.trajectory, reward, self.learning_rate);
        info!(
            terminal = %self.state,
            reward,
            steps = self.trajectory.len(),
            "episode backed up"
        );
        EpisodeSummary {
            terminal: self.state,
            reward,
            steps: self.trajectory.len(),
        }
    }

    /// Clear the trajectory and move to [`grid::RESTART`].
    pub fn reset(&mut self) {
        self.trajectory.clear();
        self.state = grid::RESTART;
    }

    /// Run one training round.
    ///
    /// On a terminal cell the round backs up and restarts; anywhere else it
    /// takes one step.
    pub fn play_round(&mut self) -> Round {
        if self.is_terminal() {
            let summary = self.backup();
            self.reset();
            Round::EpisodeEnd(summary)
        } else {
            Round::Step(self.step())
        }
    }
}

/// Every action from `from`, in `Action::ALL` order, with the value of the
/// cell it leads to.
pub fn candidates(values: &ValueTable, from: Cell) -> [Candidate; 4] {
    Action::ALL.map(|action| {
        let next = grid::transition(from, action);
        let value = values.get(next);
        debug!(%from, %action, %next, value, "candidate");
        Candidate {
            action,
            next,
            value,
        }
    })
}

/// Greedy pick among `candidates`.
///
/// Scans in order with a running best that starts at 0.0. Any candidate
/// whose value is `>=` the running best replaces the current choice, so the
/// last of several equal maxima wins. If every value is negative nothing
/// clears the 0.0 bar; the highest-valued action is then taken, the first
/// one on ties.
pub fn pick_greedy(candidates: &[Candidate]) -> Action {
    let mut best_value = 0.0;
    let mut chosen = None;
    for candidate in candidates {
        if candidate.value >= best_value {
            best_value = f64::max(candidate.value, best_value);
            chosen = Some(candidate.action);
        }
    }

    chosen.unwrap_or_else(|| {
        let mut fallback = Action::ALL[0];
        let mut fallback_value = f64::NEG_INFINITY;
        for candidate in candidates {
            if candidate.value > fallback_value {
                fallback_value = candidate.value;
                fallback = candidate.action;
            }
        }
        fallback
    })
}

/// Greedy choice over the four actions from `from`.
pub fn greedy_action(values: &ValueTable, from: Cell) -> Action {
    pick_greedy(&candidates(values, from))
}
