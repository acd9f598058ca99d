//! Common test utilities for the grid world test suite.

use std::{cell::RefCell, rc::Rc};

use gridworld::{
    Result,
    grid::Cell,
    ports::Observer,
    td::{EpisodeSummary, StepRecord, ValueTable},
};

/// Everything a training run reported, in order.
#[derive(Debug, Default)]
pub struct Recording {
    pub steps: Vec<(usize, StepRecord)>,
    pub episodes: Vec<(usize, EpisodeSummary, ValueTable)>,
    pub final_values: Option<ValueTable>,
}

impl Recording {
    /// Every cell the agent stepped onto.
    pub fn visited(&self) -> Vec<Cell> {
        self.steps.iter().map(|(_, record)| record.to).collect()
    }
}

/// Observer that copies events into a shared [`Recording`].
///
/// The pipeline owns its observers, so the test keeps the other handle.
pub struct RecordingObserver(pub Rc<RefCell<Recording>>);

impl RecordingObserver {
    pub fn pair() -> (Self, Rc<RefCell<Recording>>) {
        let recording = Rc::new(RefCell::new(Recording::default()));
        (Self(Rc::clone(&recording)), recording)
    }
}

impl Observer for RecordingObserver {
    fn on_step(&mut self, round: usize, record: &StepRecord) -> Result<()> {
        self.0.borrow_mut().steps.push((round, *record));
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        round: usize,
        summary: &EpisodeSummary,
        values: &ValueTable,
    ) -> Result<()> {
        self.0
            .borrow_mut()
            .episodes
            .push((round, summary.clone(), values.clone()));
        Ok(())
    }

    fn on_training_end(&mut self, values: &ValueTable) -> Result<()> {
        self.0.borrow_mut().final_values = Some(values.clone());
        Ok(())
    }
}
