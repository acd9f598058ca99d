//! Agent configuration.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    grid::{self, Cell},
};

/// Seed used when none is supplied, so runs are reproducible by default.
pub const DEFAULT_SEED: u64 = 42;

/// Transition dynamics of the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dynamics {
    #[default]
    Deterministic,
    /// Accepted by the type but rejected by [`AgentConfig::validate`].
    Stochastic,
}

/// Configuration for creating a [`crate::td::GridWorld`] agent.
///
/// # Examples
///
/// ```
/// use gridworld::{AgentConfig, grid::Cell};
///
/// let config = AgentConfig::new()
///     .with_learning_rate(0.3)
///     .with_exploration_rate(0.0)
///     .with_start(Cell::new(0, 2))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Step size α of the backup
    pub learning_rate: f64,
    /// Probability ε of taking a uniformly random action
    pub exploration_rate: f64,
    /// Cell the first episode starts from
    pub start: Cell,
    pub dynamics: Dynamics,
    /// Seed for the agent's random number generator
    pub seed: u64,
}

impl AgentConfig {
    /// Create a configuration with the default values:
    /// - learning rate 0.3
    /// - exploration rate 0.2
    /// - start (0, 2)
    /// - deterministic dynamics
    /// - seed 42
    pub fn new() -> Self {
        Self {
            learning_rate: 0.3,
            exploration_rate: 0.2,
            start: Cell::new(0, 2),
            dynamics: Dynamics::Deterministic,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn with_start(mut self, start: Cell) -> Self {
        self.start = start;
        self
    }

    pub fn with_dynamics(mut self, dynamics: Dynamics) -> Self {
        self.dynamics = dynamics;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the preconditions the agent relies on.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRate`] if either rate is NaN, infinite or outside [0, 1]
    /// - [`Error::InvalidStart`] if the start cell is off the grid or on the obstacle
    /// - [`Error::UnsupportedDynamics`] for [`Dynamics::Stochastic`]
    pub fn validate(&self) -> Result<()> {
        check_rate("learning rate", self.learning_rate)?;
        check_rate("exploration rate", self.exploration_rate)?;
        if !grid::is_valid_cell(self.start) {
            return Err(Error::InvalidStart { cell: self.start });
        }
        if self.dynamics != Dynamics::Deterministic {
            return Err(Error::UnsupportedDynamics);
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidRate { name, value })
    }
}
