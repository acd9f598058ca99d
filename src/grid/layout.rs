//! Static layout and transition rules

use super::{action::Action, cell::Cell};

pub const ROWS: usize = 3;
pub const COLS: usize = 4;

pub const WIN: Cell = Cell::new(0, 3);
pub const LOSE: Cell = Cell::new(1, 3);
pub const OBSTACLE: Cell = Cell::new(1, 1);

/// Where the agent is placed after every backup.
pub const RESTART: Cell = Cell::new(2, 0);

/// Whether `cell` lies inside the grid bounds. The obstacle counts as inside.
pub fn contains(cell: Cell) -> bool {
    cell.row < ROWS && cell.col < COLS
}

/// Whether the agent may stand on `cell`.
pub fn is_valid_cell(cell: Cell) -> bool {
    contains(cell) && cell != OBSTACLE
}

/// Every grid cell in row-major order, obstacle included.
pub fn cells() -> impl Iterator<Item = Cell> {
    (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Cell::new(row, col)))
}

/// Deterministic transition.
///
/// Moving off the grid or into the obstacle leaves the agent where it was.
/// That is a normal outcome, not an error.
pub fn transition(cell: Cell, action: Action) -> Cell {
    match cell.offset(action) {
        Some(next) if is_valid_cell(next) => next,
        _ => cell,
    }
}

pub fn is_terminal(cell: Cell) -> bool {
    cell == WIN || cell == LOSE
}

/// Reward paid for finishing an episode on `cell`.
pub fn reward(cell: Cell) -> f64 {
    if cell == WIN {
        1.0
    } else if cell == LOSE {
        -1.0
    } else {
        0.0
    }
}
