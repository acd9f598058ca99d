//! Observer implementations for training runs
//!
//! Observers allow composable reporting during training without coupling
//! the training loop to specific output formats.

use std::io::{self, Stdout, Write};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result, grid,
    ports::Observer,
    td::{Decision, EpisodeSummary, StepRecord, ValueTable},
};

/// Console observer - prints the run the way a person would follow it
///
/// Every round gets a line. After each backup and at the end of training
/// the value table is drawn. Step lines can be turned off with
/// [`ConsoleObserver::with_steps`].
pub struct ConsoleObserver<W = Stdout> {
    out: W,
    show_steps: bool,
}

impl ConsoleObserver<Stdout> {
    /// Console observer writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for ConsoleObserver<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_steps: true,
        }
    }

    /// Whether to print a line for every step
    pub fn with_steps(mut self, show_steps: bool) -> Self {
        self.show_steps = show_steps;
        self
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).map_err(|source| Error::Io {
            operation: "write training output".to_string(),
            source,
        })
    }
}

impl<W: Write> Observer for ConsoleObserver<W> {
    fn on_step(&mut self, round: usize, record: &StepRecord) -> Result<()> {
        if !self.show_steps {
            return Ok(());
        }
        let mode = if record.decision.is_greedy() {
            "greedy"
        } else {
            "explore"
        };
        let mut text = format!(
            "Round {round}: {} --{}--> {} ({mode})\n",
            record.from, record.action, record.to
        );
        if let Decision::Greedy { candidates } = &record.decision {
            for candidate in candidates {
                text.push_str(&format!(
                    "    {:<5} -> {} value {}\n",
                    candidate.action.as_str(),
                    candidate.next,
                    candidate.value
                ));
            }
        }
        self.emit(&text)
    }

    fn on_episode_end(
        &mut self,
        round: usize,
        summary: &EpisodeSummary,
        values: &ValueTable,
    ) -> Result<()> {
        let header = format!(
            "Round {round}: episode ended on {} with reward {} after {} steps",
            summary.terminal, summary.reward, summary.steps
        );
        self.emit(&format!(
            "{header}, restarting at {}\n{values}",
            grid::RESTART
        ))
    }

    fn on_training_end(&mut self, values: &ValueTable) -> Result<()> {
        self.emit(&format!("Final values:\n{values}"))?;
        self.out.flush().map_err(|source| Error::Io {
            operation: "flush training output".to_string(),
            source,
        })
    }
}

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    wins: usize,
    losses: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            wins: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("W:{} L:{}", self.wins, self.losses)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_rounds: usize) -> Result<()> {
        let pb = ProgressBar::new(total_rounds as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_step(&mut self, round: usize, _record: &StepRecord) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(round as u64 + 1);
        }
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        round: usize,
        summary: &EpisodeSummary,
        _values: &ValueTable,
    ) -> Result<()> {
        if summary.is_win() {
            self.wins += 1;
        } else if summary.is_loss() {
            self.losses += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(round as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self, _values: &ValueTable) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Summary statistics collected by [`MetricsObserver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub explore_steps: usize,
    pub greedy_steps: usize,
    pub episode_lengths: Vec<usize>,
}

/// Metrics observer - tracks outcomes and exploration behaviour
#[derive(Debug, Default)]
pub struct MetricsObserver {
    wins: usize,
    losses: usize,
    explore_steps: usize,
    greedy_steps: usize,
    episode_lengths: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    /// Fraction of finished episodes that ended on the win cell
    pub fn win_rate(&self) -> f64 {
        if self.episodes() > 0 {
            self.wins as f64 / self.episodes() as f64
        } else {
            0.0
        }
    }

    /// Fraction of steps taken by exploring
    pub fn exploration_fraction(&self) -> f64 {
        let total = self.explore_steps + self.greedy_steps;
        if total > 0 {
            self.explore_steps as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            episodes: self.episodes(),
            wins: self.wins,
            losses: self.losses,
            explore_steps: self.explore_steps,
            greedy_steps: self.greedy_steps,
            episode_lengths: self.episode_lengths.clone(),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_step(&mut self, _round: usize, record: &StepRecord) -> Result<()> {
        if record.decision.is_greedy() {
            self.greedy_steps += 1;
        } else {
            self.explore_steps += 1;
        }
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _round: usize,
        summary: &EpisodeSummary,
        _values: &ValueTable,
    ) -> Result<()> {
        if summary.is_win() {
            self.wins += 1;
        } else if summary.is_loss() {
            self.losses += 1;
        }
        self.episode_lengths.push(summary.steps);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{Action, Cell},
        td::candidates,
    };

    fn greedy_from_start() -> Decision {
        Decision::Greedy {
            candidates: candidates(&ValueTable::new(), Cell::new(0, 2)),
        }
    }

    fn step(decision: Decision) -> StepRecord {
        StepRecord {
            from: Cell::new(0, 2),
            action: Action::Right,
            to: grid::WIN,
            decision,
        }
    }

    fn win_summary(steps: usize) -> EpisodeSummary {
        EpisodeSummary {
            terminal: grid::WIN,
            reward: 1.0,
            steps,
        }
    }

    #[test]
    fn console_prints_steps_and_tables() {
        let mut observer = ConsoleObserver::new(Vec::new());
        let mut values = ValueTable::new();
        values.backup(&[grid::WIN], 1.0, 0.3);

        observer.on_step(0, &step(greedy_from_start())).unwrap();
        observer.on_episode_end(1, &win_summary(1), &values).unwrap();
        observer.on_training_end(&values).unwrap();

        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert!(text.contains("Round 0: (0, 2) --right--> (0, 3) (greedy)"));
        assert!(text.contains("    up    -> (0, 2) value 0\n"));
        assert!(text.contains("    down  -> (1, 2) value 0\n"));
        assert!(text.contains("    left  -> (0, 1) value 0\n"));
        assert!(text.contains("    right -> (0, 3) value 0\n"));
        assert!(text.contains("Round 1: episode ended on (0, 3) with reward 1"));
        assert!(text.contains("restarting at (2, 0)"));
        assert!(text.contains("Final values:"));
        assert_eq!(text.matches("| 0.3    |").count(), 2);
    }

    #[test]
    fn console_explore_step_has_no_candidates() {
        let mut observer = ConsoleObserver::new(Vec::new());
        observer.on_step(4, &step(Decision::Explore)).unwrap();
        let text = String::from_utf8(observer.into_inner()).unwrap();
        assert_eq!(text, "Round 4: (0, 2) --right--> (0, 3) (explore)\n");
    }

    #[test]
    fn console_reports_write_failures() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut observer = ConsoleObserver::new(Broken);
        let err = observer.on_training_end(&ValueTable::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::Io { ref operation, .. } if operation == "write training output"
        ));
    }

    #[test]
    fn console_can_hide_steps() {
        let mut observer = ConsoleObserver::new(Vec::new()).with_steps(false);
        observer.on_step(0, &step(Decision::Explore)).unwrap();
        assert!(observer.into_inner().is_empty());
    }

    #[test]
    fn metrics_count_outcomes_and_decisions() {
        let mut observer = MetricsObserver::new();
        let values = ValueTable::new();
        let loss = EpisodeSummary {
            terminal: grid::LOSE,
            reward: -1.0,
            steps: 4,
        };

        observer.on_step(0, &step(Decision::Explore)).unwrap();
        observer.on_step(1, &step(greedy_from_start())).unwrap();
        observer.on_step(2, &step(greedy_from_start())).unwrap();
        observer.on_episode_end(3, &win_summary(3), &values).unwrap();
        observer.on_episode_end(8, &loss, &values).unwrap();

        let summary = observer.summary();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.episode_lengths, vec![3, 4]);
        assert_eq!(observer.win_rate(), 0.5);
        assert!((observer.exploration_fraction() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn progress_observer_handles_full_lifecycle() {
        let mut observer = ProgressObserver::new();
        let values = ValueTable::new();
        observer.on_training_start(2).unwrap();
        observer.on_step(0, &step(greedy_from_start())).unwrap();
        observer.on_episode_end(1, &win_summary(1), &values).unwrap();
        observer.on_training_end(&values).unwrap();
        assert_eq!(observer.wins, 1);
    }
}
