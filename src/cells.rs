//! Cell sets and bounding rectangles.

use crate::{rules::Life, world::World};
use std::collections::HashSet;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`, with `y` growing downwards.
pub type Coord = (i32, i32);

/// The minimal axis-aligned rectangle around a pattern.
///
/// Undefined (absent) for an empty pattern, so it is always returned
/// as `Option<Rect>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Leftmost column.
    pub x: i32,
    /// Topmost row.
    pub y: i32,
    /// Width. Always positive.
    pub width: i32,
    /// Height. Always positive.
    pub height: i32,
}

impl Rect {
    /// Rightmost column.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    /// Bottommost row.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }
}

/// An unordered, deduplicated set of live cells.
///
/// All pipeline components pass patterns around by value; the only shared
/// mutable grid in the crate is [`World`](crate::World).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    cells: HashSet<Coord>,
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pattern has no live cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of live cells.
    #[inline]
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Whether the cell at `coord` is live.
    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Makes the cell at `coord` live.
    #[inline]
    pub fn insert(&mut self, coord: Coord) {
        self.cells.insert(coord);
    }

    /// An iterator over the live cells, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// The live cells in row-major order: by row first, then by column.
    ///
    /// Every algorithm that scans cells one by one uses this order,
    /// so results do not depend on hash iteration order.
    pub fn sorted_cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self.cells.iter().copied().collect();
        cells.sort_unstable_by_key(|&(x, y)| (y, x));
        cells
    }

    /// The minimal bounding rectangle, or `None` if the pattern is empty.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut iter = self.cells.iter();
        let &(x0, y0) = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (x0, y0, x0, y0);
        for &(x, y) in iter {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Some(Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// The pattern translated by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        self.cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
    }

    /// The union of two patterns.
    pub fn union(&self, other: &Self) -> Self {
        self.cells.union(&other.cells).copied().collect()
    }

    /// The symmetric difference of two patterns.
    pub fn xor(&self, other: &Self) -> Self {
        self.cells
            .symmetric_difference(&other.cells)
            .copied()
            .collect()
    }

    /// The Moore-neighbourhood boundary: every dead cell adjacent
    /// (including diagonally) to a live cell, in row-major order.
    pub fn boundary(&self) -> Vec<Coord> {
        let mut ring = HashSet::new();
        for &(x, y) in &self.cells {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let coord = (x + dx, y + dy);
                    if !self.cells.contains(&coord) {
                        ring.insert(coord);
                    }
                }
            }
        }
        let mut ring: Vec<Coord> = ring.into_iter().collect();
        ring.sort_unstable_by_key(|&(x, y)| (y, x));
        ring
    }

    /// The live cells shifted so that the bounding-box corner sits at the
    /// origin, in row-major order. Two translated copies of the same shape
    /// produce the same key.
    pub fn origin_key(&self) -> Vec<Coord> {
        match self.bounding_box() {
            Some(rect) => self
                .translate(-rect.x, -rect.y)
                .sorted_cells(),
            None => Vec::new(),
        }
    }

    /// The pattern evolved by the given number of generations under the
    /// standard Life rule. Pure: the receiver is left untouched.
    pub fn evolve(&self, generations: u32) -> Self {
        let mut world = World::from_pattern(self);
        world.run(&Life, generations);
        world.pattern()
    }
}

impl FromIterator<Coord> for Pattern {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a Coord> for Pattern {
    fn from_iter<T: IntoIterator<Item = &'a Coord>>(iter: T) -> Self {
        iter.into_iter().copied().collect()
    }
}
