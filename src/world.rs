//! The world: a sparse, multistate grid.
//!
//! The whole pipeline treats the grid as a single, exclusively owned
//! resource driven by strictly sequential mutate-then-read calls; there is
//! no interior sharing and no concurrency.

use crate::{
    cells::{Coord, Pattern, Rect},
    rules::Rule,
};
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How cells are merged into the world by [`World::place`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlaceMode {
    /// A placed cell is turned on regardless of the previous state.
    Or,
    /// A placed cell toggles between dead and alive.
    Xor,
    /// A placed cell's state overwrites the previous state.
    Copy,
}

/// A sparse grid of small integer cell states.
///
/// State `0` is the background and is never stored.
#[derive(Clone, Debug, Default)]
pub struct World {
    cells: HashMap<Coord, u8>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world holding a two-state pattern.
    pub fn from_pattern(pattern: &Pattern) -> Self {
        Self {
            cells: pattern.iter().map(|coord| (coord, 1)).collect(),
        }
    }

    /// Removes all cells.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Whether no cell is live.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The state of the cell at `coord`.
    #[inline]
    pub fn get_cell(&self, coord: Coord) -> u8 {
        self.cells.get(&coord).copied().unwrap_or(0)
    }

    /// Sets the state of the cell at `coord`. Setting state `0` removes
    /// the cell.
    #[inline]
    pub fn set_cell(&mut self, coord: Coord, state: u8) {
        if state == 0 {
            self.cells.remove(&coord);
        } else {
            self.cells.insert(coord, state);
        }
    }

    /// Number of cells in a nonzero state.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// The minimal bounding rectangle of the nonzero cells.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.pattern().bounding_box()
    }

    /// All nonzero cells as a two-state pattern.
    ///
    /// For worlds driven by the plain Life rule this is the full contents;
    /// for multistate worlds it flattens the states away.
    pub fn pattern(&self) -> Pattern {
        self.cells.keys().collect()
    }

    /// All nonzero cells with their states, in row-major order.
    pub fn states(&self) -> Vec<(Coord, u8)> {
        let mut cells: Vec<(Coord, u8)> = self
            .cells
            .iter()
            .map(|(&coord, &state)| (coord, state))
            .collect();
        cells.sort_unstable_by_key(|&((x, y), _)| (y, x));
        cells
    }

    /// Loads stated cells, overwriting whatever is at their positions.
    pub fn load_states(&mut self, cells: &[(Coord, u8)]) {
        for &(coord, state) in cells {
            self.set_cell(coord, state);
        }
    }

    /// Merges a two-state pattern into the world.
    pub fn place(&mut self, pattern: &Pattern, mode: PlaceMode) {
        for coord in pattern.iter() {
            match mode {
                PlaceMode::Or | PlaceMode::Copy => self.set_cell(coord, 1),
                PlaceMode::Xor => {
                    let state = if self.get_cell(coord) == 0 { 1 } else { 0 };
                    self.set_cell(coord, state);
                }
            }
        }
    }

    /// Advances the world by one generation under the given rule.
    pub fn step<R: Rule>(&mut self, rule: &R) {
        let mut candidates = HashSet::new();
        for &(x, y) in self.cells.keys() {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    candidates.insert((x + dx, y + dy));
                }
            }
        }
        let mut next = HashMap::new();
        for (x, y) in candidates {
            let neighbors = [
                self.get_cell((x - 1, y - 1)),
                self.get_cell((x, y - 1)),
                self.get_cell((x + 1, y - 1)),
                self.get_cell((x - 1, y)),
                self.get_cell((x + 1, y)),
                self.get_cell((x - 1, y + 1)),
                self.get_cell((x, y + 1)),
                self.get_cell((x + 1, y + 1)),
            ];
            let state = rule.next_state(self.get_cell((x, y)), &neighbors);
            if state != 0 {
                next.insert((x, y), state);
            }
        }
        self.cells = next;
    }

    /// Advances the world by the given number of generations.
    pub fn run<R: Rule>(&mut self, rule: &R, generations: u32) {
        for _ in 0..generations {
            self.step(rule);
        }
    }
}
