//! Phase and orientation selection.
//!
//! [`canonise`] drives a pattern through a full period, encoding every
//! generation under all eight scan frames of its bounding box, and keeps
//! the single best representation together with every frame realising it.

use crate::{
    cells::{Pattern, Rect},
    codec::{self, SENTINEL},
    d8::Frame,
    error::Error,
};
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of [`canonise`]: the winning code, the phase it was found
/// at, and every frame that realises it at that phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Canonised {
    /// The canonical code, `"0"` for the empty pattern, or the internal
    /// sentinel `"#"` when no generation fits the encodable box.
    pub code: String,
    /// The latest generation at which the winning representation occurs.
    pub phase: i32,
    /// Every scan frame producing the winning representation at that
    /// generation.
    pub frames: Vec<Frame>,
}

/// Obtains a canonical representation of any object that, in some phase,
/// fits within a 40-by-40 bounding box.
///
/// Inspects `duration` consecutive generations. Ties on the representation
/// string prefer the **latest** generation; at that generation all frames
/// realising the tie are collected. The final code is prefixed with
/// `xs<population>` when `duration` is 1, `xp<duration>` otherwise.
pub fn canonise(pattern: &Pattern, duration: i32) -> Result<Canonised, Error> {
    let mut representation = String::from(SENTINEL);
    let mut latest = 0;
    let mut frames: Vec<Frame> = Vec::new();
    let mut current = pattern.clone();

    for t in 0..duration {
        let rect = match current.bounding_box() {
            Some(rect) => rect,
            None => {
                return Ok(Canonised {
                    code: String::from("0"),
                    phase: 0,
                    frames: vec![Frame::trivial()],
                })
            }
        };

        if rect.width <= codec::MAX_SIDE && rect.height <= codec::MAX_SIDE {
            for frame in rect.frames().iter() {
                let next_rep = codec::encode_orientation(&current, frame)?;
                if next_rep == representation {
                    // A later match resets the frame list, an equally late
                    // one extends it.
                    if t > latest {
                        latest = t;
                        frames = vec![*frame];
                    } else {
                        frames.push(*frame);
                    }
                } else if codec::cmp_repr(&next_rep, &representation) == Ordering::Less {
                    representation = next_rep;
                    latest = t;
                    frames = vec![*frame];
                }
            }
        }

        current = current.evolve(1);
    }

    let code = if representation == SENTINEL {
        representation
    } else if duration == 1 {
        format!("xs{}_{}", pattern.population(), representation)
    } else {
        format!("xp{}_{}", duration, representation)
    };

    Ok(Canonised {
        code,
        phase: latest,
        frames,
    })
}

/// The period and swept extent of an object, from [`analyse_object`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectAnalysis {
    /// The pattern has no live cells.
    Empty,
    /// The pattern recurs exactly after `period` generations.
    Object {
        /// Number of generations until the exact recurrence.
        period: i32,
        /// The minimal rectangle containing every generation of the cycle.
        swept: Rect,
    },
    /// No exact recurrence within the generation bound.
    Unresolved,
}

/// Finds the period and maximum dimensions of an object.
///
/// The recurrence test is exact: same population and every starting cell
/// live again at its original position. Travelling patterns therefore
/// never resolve here.
pub fn analyse_object(pattern: &Pattern, max_period: i32) -> ObjectAnalysis {
    let rect = match pattern.bounding_box() {
        Some(rect) => rect,
        None => return ObjectAnalysis::Empty,
    };
    let cells = pattern.sorted_cells();
    let (mut min_x, mut min_y) = (rect.x, rect.y);
    let (mut max_x, mut max_y) = (rect.right(), rect.bottom());
    let mut current = pattern.clone();

    for t in 0..max_period {
        current = current.evolve(1);

        if current.population() == cells.len() && cells.iter().all(|&c| current.contains(c)) {
            return ObjectAnalysis::Object {
                period: t + 1,
                swept: Rect {
                    x: min_x,
                    y: min_y,
                    width: max_x - min_x + 1,
                    height: max_y - min_y + 1,
                },
            };
        }

        match current.bounding_box() {
            Some(rect) => {
                min_x = min_x.min(rect.x);
                min_y = min_y.min(rect.y);
                max_x = max_x.max(rect.right());
                max_y = max_y.max(rect.bottom());
            }
            None => return ObjectAnalysis::Unresolved,
        }
    }

    ObjectAnalysis::Unresolved
}
