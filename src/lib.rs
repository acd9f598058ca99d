//! Tabular TD learning on a small grid world
//!
//! This crate provides:
//! - A fixed 3×4 grid with an obstacle, a win cell and a lose cell
//! - A value table with a flat-reward backup rule
//! - An ε-greedy agent with an injectable random number generator
//! - A round-based training pipeline with pluggable observers
//! - A command-line trainer

pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod td;

pub use config::{AgentConfig, Dynamics};
pub use error::{Error, Result};
pub use td::{GridWorld, ValueTable};
