//! State-value table

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::grid::{self, COLS, Cell};

const FIELD_WIDTH: usize = 6;
const SEPARATOR_WIDTH: usize = 34;

/// Round to three decimal places.
///
/// Works on the exact binary value and sends ties to the even digit, so
/// `-0.3125` becomes `-0.312`. Scaling by 1000 and calling `round` would
/// instead send that tie away from zero.
pub fn round3(value: f64) -> f64 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// One backup step: `round3(v + α (r − v))`.
///
/// The target is the episode's final reward, not the successor's value.
pub fn td_update(value: f64, reward: f64, learning_rate: f64) -> f64 {
    round3(value + learning_rate * (reward - value))
}

/// Value estimate for every cell of the grid.
///
/// Every cell, obstacle included, has an entry from construction on and
/// entries are never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: BTreeMap<Cell, f64>,
    /// Cells that have been backed up at least once
    updated: BTreeSet<Cell>,
}

impl ValueTable {
    /// A table with every cell at 0.0.
    pub fn new() -> Self {
        Self {
            values: grid::cells().map(|cell| (cell, 0.0)).collect(),
            updated: BTreeSet::new(),
        }
    }

    /// Value of `cell`; 0.0 for coordinates outside the grid.
    pub fn get(&self, cell: Cell) -> f64 {
        self.values.get(&cell).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, f64)> + '_ {
        self.values.iter().map(|(&cell, &value)| (cell, value))
    }

    /// Values laid out as `rows[row][col]`.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.values
            .values()
            .copied()
            .collect::<Vec<_>>()
            .chunks(COLS)
            .map(<[f64]>::to_vec)
            .collect()
    }

    /// Push every cell of `trajectory` toward `reward`, newest visit first.
    ///
    /// A cell visited several times is updated once per visit. Cells outside
    /// the grid are ignored.
    pub fn backup(&mut self, trajectory: &[Cell], reward: f64, learning_rate: f64) {
        for cell in trajectory.iter().rev() {
            if let Some(value) = self.values.get_mut(cell) {
                *value = td_update(*value, reward, learning_rate);
                self.updated.insert(*cell);
            }
        }
    }

    /// Untouched cells print as `0`; backed-up values always carry a
    /// decimal point, so a backed-up 1 prints as `1.0`.
    fn format_value(&self, cell: Cell, value: f64) -> String {
        if self.updated.contains(&cell) {
            format!("{value:?}")
        } else {
            "0".to_string()
        }
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValueTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        let entries: Vec<(Cell, f64)> = self.iter().collect();
        for row in entries.chunks(COLS) {
            writeln!(f, "{separator}")?;
            let mut line = String::from("| ");
            for &(cell, value) in row {
                let text = self.format_value(cell, value);
                line.push_str(&format!("{text:<FIELD_WIDTH$} | "));
            }
            writeln!(f, "{line}")?;
        }
        writeln!(f, "{separator}")
    }
}
