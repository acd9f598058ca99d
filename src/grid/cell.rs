//! Grid coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Action;

/// A (row, column) coordinate on the grid.
///
/// Ordering is row-major, so iterating a `BTreeMap<Cell, _>` walks the grid
/// the same way it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell one unit away along `action`, or `None` when that would go
    /// below row or column zero.
    ///
    /// No upper-bound or obstacle checks happen here; see
    /// [`crate::grid::transition`].
    pub fn offset(self, action: Action) -> Option<Cell> {
        let (d_row, d_col) = action.delta();
        Some(Cell {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_applies_delta() {
        let cell = Cell::new(1, 2);
        assert_eq!(cell.offset(Action::Up), Some(Cell::new(0, 2)));
        assert_eq!(cell.offset(Action::Down), Some(Cell::new(2, 2)));
        assert_eq!(cell.offset(Action::Left), Some(Cell::new(1, 1)));
        assert_eq!(cell.offset(Action::Right), Some(Cell::new(1, 3)));
    }

    #[test]
    fn offset_below_zero_is_none() {
        assert_eq!(Cell::new(0, 0).offset(Action::Up), None);
        assert_eq!(Cell::new(0, 0).offset(Action::Left), None);
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Cell::new(0, 3) < Cell::new(1, 0));
        assert!(Cell::new(1, 0) < Cell::new(1, 1));
    }

    #[test]
    fn display_matches_tuple_notation() {
        assert_eq!(Cell::new(2, 0).to_string(), "(2, 0)");
    }
}
