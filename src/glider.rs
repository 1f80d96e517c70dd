//! Glider detection, timing and placement.
//!
//! A glider travels one cell diagonally every 4 generations. Each glider
//! in a pattern is summarised by its heading, the lane it travels along
//! and a timing offset; together these reconstruct the glider's exact
//! cells at any generation.

use crate::{
    cells::{Coord, Pattern},
    error::Error,
    world::World,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Exact integer division. A nonzero remainder means a glider is not
/// aligned to the lane grid, which only happens for malformed syntheses.
pub(crate) fn div_exact(numerator: i32, denominator: i32) -> Result<i32, Error> {
    if denominator == 0 || numerator.rem_euclid(denominator) != 0 {
        return Err(Error::MisalignedSynthesis(numerator, denominator));
    }
    Ok(numerator.div_euclid(denominator))
}

/// The four diagonal headings of a glider.
///
/// The order NE, SE, SW, NW is fixed: it is the order of the lane lists
/// in a [`Salvo`] and in the persisted edge record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heading {
    /// Travelling up and to the right.
    Northeast,
    /// Travelling down and to the right.
    Southeast,
    /// Travelling down and to the left.
    Southwest,
    /// Travelling up and to the left.
    Northwest,
}

impl Heading {
    /// All four headings, in salvo order.
    pub const ALL: [Heading; 4] = [
        Heading::Northeast,
        Heading::Southeast,
        Heading::Southwest,
        Heading::Northwest,
    ];

    /// Index of this heading within a salvo.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Heading::Northeast => 0,
            Heading::Southeast => 1,
            Heading::Southwest => 2,
            Heading::Northwest => 3,
        }
    }

    /// The signs of the glider's displacement: one cell along each axis
    /// every 4 generations.
    #[inline]
    pub fn velocity(self) -> (i32, i32) {
        match self {
            Heading::Northeast => (1, -1),
            Heading::Southeast => (1, 1),
            Heading::Southwest => (-1, 1),
            Heading::Northwest => (-1, -1),
        }
    }

    /// The glider's reference shape at phase 0, anchored so that the
    /// origin cell is live in every phase.
    pub fn shape(self) -> Pattern {
        let cells: &[Coord] = match self {
            Heading::Northeast => &[(-2, 0), (-1, 0), (0, 0), (0, 1), (-1, 2)],
            Heading::Southeast => &[(-1, -2), (0, -1), (-2, 0), (-1, 0), (0, 0)],
            Heading::Southwest => &[(1, -2), (0, -1), (0, 0), (1, 0), (2, 0)],
            Heading::Northwest => &[(0, 0), (1, 0), (2, 0), (0, 1), (1, 2)],
        };
        cells.iter().collect()
    }
}

/// One glider: the lane it travels along and its timing offset.
///
/// The glider crosses the heading's reference line at generation
/// `timing`, offset `lane` cells along the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaneRecord {
    /// Offset along the reference line.
    pub lane: i32,
    /// Generation at which the glider crosses the reference line.
    pub timing: i32,
}

/// A swarm of gliders: one list of lane records per heading, in the
/// fixed NE, SE, SW, NW order.
///
/// Salvos compare lexicographically, which is how the canonical
/// orientation of a synthesis is tie-broken.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Salvo {
    /// Lane records per heading, indexed by [`Heading::index`].
    pub lanes: [Vec<LaneRecord>; 4],
}

impl Salvo {
    /// Whether the salvo contains no glider at all.
    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Vec::is_empty)
    }

    /// Total number of gliders.
    pub fn glider_count(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    /// The lane records of one heading.
    pub fn get(&self, heading: Heading) -> &[LaneRecord] {
        &self.lanes[heading.index()]
    }

    /// Sorts every lane list, normalising the salvo for comparison.
    pub fn sort_lanes(&mut self) {
        for lanes in self.lanes.iter_mut() {
            lanes.sort_unstable();
        }
    }

    /// The cells of every glider at generation `t`.
    pub fn place(&self, t: i32) -> Pattern {
        let mut placed = Pattern::new();
        for &heading in Heading::ALL.iter() {
            let (vx, vy) = heading.velocity();
            for record in self.get(heading) {
                let phase = (t + record.timing).rem_euclid(4);
                let steps = (t + record.timing - phase).div_euclid(4);
                let cells = heading
                    .shape()
                    .evolve(phase as u32)
                    .translate(record.lane + steps * vx, steps * vy);
                placed = placed.union(&cells);
            }
        }
        placed
    }
}

/// Removes every glider from the world and returns their timing records.
///
/// For each heading and each of the 4 phases, every live cell is tested
/// as an anchor for the glider's current footprint: all footprint cells
/// live and the whole Moore boundary dead. Matches are erased from the
/// world immediately, so overlapping candidates are never counted twice;
/// what remains in the world afterwards is the glider-free core.
pub fn remove_gliders(world: &mut World) -> Result<Salvo, Error> {
    let cells = world.pattern().sorted_cells();
    let mut salvo = Salvo::default();

    for &heading in Heading::ALL.iter() {
        let (vx, vy) = heading.velocity();
        let mut shape = heading.shape();

        for phase in 0..4 {
            let wanted = shape.sorted_cells();
            let unwanted = shape.boundary();

            for &(x, y) in &cells {
                if !wanted
                    .iter()
                    .all(|&(dx, dy)| world.get_cell((x + dx, y + dy)) != 0)
                {
                    continue;
                }
                if unwanted
                    .iter()
                    .any(|&(dx, dy)| world.get_cell((x + dx, y + dy)) != 0)
                {
                    continue;
                }

                for &(dx, dy) in &wanted {
                    world.set_cell((x + dx, y + dy), 0);
                }

                salvo.lanes[heading.index()].push(LaneRecord {
                    lane: x - div_exact(y * vx, vy)?,
                    timing: div_exact(4 * y, vy)? + phase,
                });
            }

            shape = shape.evolve(1);
        }
    }

    Ok(salvo)
}
