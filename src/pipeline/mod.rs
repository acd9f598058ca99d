//! Training pipeline
//!
//! This module provides:
//! - The round-by-round training loop
//! - Observers for console output, progress bars and metrics

pub mod observers;
pub mod training;

pub use observers::{ConsoleObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingReport};

pub use crate::ports::Observer;
