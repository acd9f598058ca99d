//! Command-line interface for the grid world trainer

pub mod commands;
pub mod output;
