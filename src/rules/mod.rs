//! Cellular automata rules.
//!
//! The pipeline needs exactly three rules: the standard Life rule, a
//! history-keeping variant of it, and the auxiliary infection rule used
//! to isolate causally connected chunks of a pattern's evolution.

mod infect;
mod life;

pub use infect::InfectLife;
pub use life::{Life, LifeHistory};

/// A cellular automaton rule over small integer cell states.
///
/// State `0` is always the quiescent background; a cell whose whole
/// neighbourhood is `0` must stay `0`.
pub trait Rule {
    /// The state of a cell in the next generation, given its current
    /// state and the states of its eight Moore neighbours.
    fn next_state(&self, center: u8, neighbors: &[u8; 8]) -> u8;
}
