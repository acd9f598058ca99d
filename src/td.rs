//! Temporal difference learning on the grid
//!
//! The update is a flat-reward backup: when an episode ends, every cell the
//! agent entered is moved toward the terminal reward,
//!
//! ```text
//! V(s) ← round₃(V(s) + α (r − V(s)))
//! ```
//!
//! applied newest visit first. No discounting and no bootstrapping from
//! successor values.
//!
//! ## Usage Example
//!
//! ```
//! use gridworld::{AgentConfig, td::{GridWorld, Round}};
//!
//! let mut agent = GridWorld::new(AgentConfig::default()).unwrap();
//! for _ in 0..50 {
//!     if let Round::EpisodeEnd(summary) = agent.play_round() {
//!         println!("episode ended on {} after {} steps", summary.terminal, summary.steps);
//!     }
//! }
//! println!("{}", agent.values());
//! ```

pub mod agent;
pub mod value_table;

pub use agent::{
    Candidate, Decision, EpisodeSummary, GridWorld, Round, StepRecord, candidates, greedy_action,
    pick_greedy,
};
pub use value_table::{ValueTable, round3, td_update};
