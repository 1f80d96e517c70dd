//! Synthesis-edge canonicalisation.
//!
//! Takes a raw synthesis, an object-to-be plus a swarm of incoming
//! gliders, and normalises it in time and space to a unique [`Edge`],
//! verifying along the way that the gliders reproduce the original
//! pattern exactly and never interact before the canonical instant.

use crate::{
    cells::{Pattern, Rect},
    codec::SENTINEL,
    config::Config,
    edge::Edge,
    error::Error,
    glider::{div_exact, remove_gliders, Heading, Salvo},
    phase::{analyse_object, canonise, ObjectAnalysis},
    world::{PlaceMode, World},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The terminal outcome of canonicalising one synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// A well-formed canonical edge.
    Success(Edge),
    /// No repeating object or encodable orientation was found within the
    /// generation bounds; the input may need larger bounds but is not
    /// necessarily malformed.
    Unknown,
    /// A structural invariant failed: the glider reconstruction does not
    /// cancel the original pattern, or the gliders are not cleanly
    /// separated at the canonical instant.
    Fail,
}

/// The generation at which a glider first crosses into the forbidden zone
/// around the object's swept extent. Can be positive or negative; `None`
/// when the salvo is empty.
fn canonical_time1(salvo: &Salvo, swept: &Rect) -> Result<Option<i32>, Error> {
    let corners = [
        (swept.x - 2, swept.bottom() + 2),
        (swept.x - 2, swept.y - 2),
        (swept.right() + 2, swept.y - 2),
        (swept.right() + 2, swept.bottom() + 2),
    ];

    let mut earliest = None;
    for &heading in Heading::ALL.iter() {
        let (x, y) = corners[heading.index()];
        let (vx, vy) = heading.velocity();
        for record in salvo.get(heading) {
            let tx = div_exact(4 * (x - record.lane), vx)? - record.timing - 1;
            let ty = div_exact(4 * y, vy)? - 3 - record.timing;
            let t = tx.min(ty);
            if earliest.map_or(true, |e| t < e) {
                earliest = Some(t);
            }
        }
    }
    Ok(earliest)
}

/// The canonical time for a pure glider synthesis with no surviving
/// object: the gliders are pushed back until the opposing groups are a
/// fixed margin apart along each axis.
fn canonical_time2(salvo: &Salvo) -> Result<i32, Error> {
    let (mut t_east, mut t_west, mut t_south, mut t_north) = (None, None, None, None);

    for &heading in Heading::ALL.iter() {
        let (vx, vy) = heading.velocity();
        for record in salvo.get(heading) {
            let tx = div_exact(4 * record.lane, vx)? + record.timing - 2;
            let ty = record.timing;

            let horizontal = if vx > 0 { &mut t_east } else { &mut t_west };
            *horizontal = Some(horizontal.map_or(tx, |t: i32| t.max(tx)));
            let vertical = if vy > 0 { &mut t_south } else { &mut t_north };
            *vertical = Some(vertical.map_or(ty, |t: i32| t.max(ty)));
        }
    }

    let t_ew = match (t_east, t_west) {
        (Some(e), Some(w)) => Some((-12 - w - e).div_euclid(2)),
        _ => None,
    };
    let t_ns = match (t_north, t_south) {
        (Some(n), Some(s)) => Some((-12 - n - s).div_euclid(2)),
        _ => None,
    };

    Ok(match (t_ew, t_ns) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => 0,
    })
}

/// Canonicalises one glider synthesis.
///
/// The stages run strictly in sequence; the first failing stage decides
/// the outcome:
///
/// 1. extract the glider swarm, leaving the core object;
/// 2. find the core's period and swept extent;
/// 3. pick the canonical time and the canonical input orientation;
/// 4. verify the reconstruction cancels the original pattern exactly;
/// 5. verify the gliders are still cleanly separated at that time;
/// 6. tie-break the orientation by the sorted glider salvo;
/// 7. settle the output and read off its canonical code and phase.
pub fn canonise_synthesis(start: &Pattern, config: &Config) -> Result<Outcome, Error> {
    let mut world = World::from_pattern(start);
    let salvo = remove_gliders(&mut world)?;
    let core = world.pattern();

    let (input_code, canonical_t, frames, shifted_core) =
        match analyse_object(&core, config.max_period) {
            ObjectAnalysis::Unresolved => return Ok(Outcome::Unknown),
            ObjectAnalysis::Object { period, swept } => {
                // Latest safe generation before any glider encroaches.
                let t = canonical_time1(&salvo, &swept)?.unwrap_or(0);
                let stepped = core.evolve(t.rem_euclid(period) as u32);
                let canonised = canonise(&stepped, period)?;
                if canonised.code == SENTINEL {
                    return Ok(Outcome::Unknown);
                }
                let shifted = stepped.evolve(canonised.phase as u32);
                // Latest valid synthesis time not exceeding t.
                let canonical_t = t - period + canonised.phase;
                (canonised.code, canonical_t, canonised.frames, shifted)
            }
            ObjectAnalysis::Empty => {
                let t = canonical_time2(&salvo)?;
                let frames = match salvo.place(t).bounding_box() {
                    Some(rect) => rect.frames().to_vec(),
                    None => vec![crate::d8::Frame::trivial()],
                };
                (String::from("0"), t, frames, Pattern::new())
            }
        };

    let canonical_cells = shifted_core.union(&salvo.place(canonical_t));

    // The reconstructed timeline must cancel the original exactly.
    let (reconstructed, target) = if canonical_t < 0 {
        (canonical_cells.evolve((-canonical_t) as u32), start.clone())
    } else {
        (canonical_cells.clone(), start.evolve(canonical_t as u32))
    };
    let mut check = World::from_pattern(&reconstructed);
    check.place(&target, PlaceMode::Xor);
    if !check.is_empty() {
        return Ok(Outcome::Fail);
    }

    // Check the glider salvo is well spaced: placing 4 generations
    // earlier and evolving must give untouched gliders in exactly the
    // positions of a direct placement.
    let advanced = salvo.place(canonical_t - 4).evolve(4);
    if advanced.population() != 5 * salvo.glider_count() {
        return Ok(Outcome::Fail);
    }
    if advanced.union(&salvo.place(canonical_t)).population() != advanced.population() {
        return Ok(Outcome::Fail);
    }

    // Among the winning frames, keep the orientation whose sorted salvo
    // is lexicographically smallest.
    let mut best: Option<(Salvo, Pattern)> = None;
    for frame in &frames {
        debug_assert_eq!(frame.map.det().abs(), 1);
        let cells = frame.map.inverse().apply(&canonical_cells);

        let mut oriented = World::from_pattern(&cells);
        let mut candidate = remove_gliders(&mut oriented)?;
        candidate.sort_lanes();

        if best.as_ref().map_or(true, |(s, _)| candidate < *s) {
            best = Some((candidate, cells));
        }
    }
    let (best_salvo, best_cells) = match best {
        Some(best) => best,
        None => return Ok(Outcome::Fail),
    };

    // Let the output settle, then read it off in the phase it had at
    // generation 1 of the settled cycle.
    let settled = best_cells.evolve(config.settle);
    let out_period = match analyse_object(&settled, config.max_period) {
        ObjectAnalysis::Unresolved => return Ok(Outcome::Fail),
        ObjectAnalysis::Empty => 1,
        ObjectAnalysis::Object { period, .. } => period,
    };
    let rewind = (-(config.settle as i32 - 1)).rem_euclid(out_period);
    let aligned = settled.evolve(rewind as u32);

    let output = canonise(&aligned, out_period)?;
    if output.code == SENTINEL {
        return Ok(Outcome::Unknown);
    }

    Ok(Outcome::Success(Edge {
        input: input_code,
        output: output.code,
        phase: out_period - (output.phase + 1),
        salvo: best_salvo,
        transform: output.frames[0].map,
    }))
}
