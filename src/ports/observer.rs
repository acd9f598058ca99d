//! Observer port - abstraction for watching a training run
//!
//! Observers receive training events without the training loop knowing
//! whether they print, draw a progress bar or collect metrics.

use crate::{
    Result,
    td::{EpisodeSummary, StepRecord, ValueTable},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_rounds)` - once at the beginning
/// 2. For each round, exactly one of:
///    - `on_step(round, record)` - the agent moved
///    - `on_episode_end(round, summary, values)` - the agent backed up and restarted
/// 3. `on_training_end(values)` - once at the end
///
/// # Examples
///
/// ```
/// use gridworld::{ports::Observer, td::{EpisodeSummary, ValueTable}};
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(
///         &mut self,
///         _round: usize,
///         _summary: &EpisodeSummary,
///         _values: &ValueTable,
///     ) -> gridworld::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called once before the first round.
    fn on_training_start(&mut self, _total_rounds: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a round in which the agent took a step.
    fn on_step(&mut self, _round: usize, _record: &StepRecord) -> Result<()> {
        Ok(())
    }

    /// Called after a round in which an episode was backed up.
    ///
    /// `values` is the table right after the backup. By this point the agent
    /// has already been moved to the restart cell.
    fn on_episode_end(
        &mut self,
        _round: usize,
        _summary: &EpisodeSummary,
        _values: &ValueTable,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last round.
    fn on_training_end(&mut self, _values: &ValueTable) -> Result<()> {
        Ok(())
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_training_start(&mut self, total_rounds: usize) -> Result<()> {
        (**self).on_training_start(total_rounds)
    }

    fn on_step(&mut self, round: usize, record: &StepRecord) -> Result<()> {
        (**self).on_step(round, record)
    }

    fn on_episode_end(
        &mut self,
        round: usize,
        summary: &EpisodeSummary,
        values: &ValueTable,
    ) -> Result<()> {
        (**self).on_episode_end(round, summary, values)
    }

    fn on_training_end(&mut self, values: &ValueTable) -> Result<()> {
        (**self).on_training_end(values)
    }
}
