//! Grid world geometry
//!
//! The world is a fixed 3×4 grid with one obstacle and two terminal cells:
//!
//! ```text
//!       0   1   2   3
//!   0 | . | . | . | W |
//!   1 | . | # | . | L |
//!   2 | S | . | . | . |
//! ```
//!
//! `W` pays +1, `L` pays −1, `#` cannot be entered and `S` is where the agent
//! restarts after every finished episode.

pub mod action;
pub mod cell;
pub mod layout;

pub use action::Action;
pub use cell::Cell;
pub use layout::{
    COLS, LOSE, OBSTACLE, RESTART, ROWS, WIN, cells, contains, is_terminal, is_valid_cell, reward,
    transition,
};
