//! Synthesis edges.
//!
//! An edge is the normalised record of one glider synthesis: starting
//! from the canonical input object, the recorded glider swarm turns it
//! into the canonical output object, up to the recorded phase offset and
//! grid transformation.

use crate::{
    d8::Transform,
    error::Error,
    glider::{LaneRecord, Salvo},
};
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display, Formatter, Write};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One canonical synthesis edge.
///
/// Constructed once by [`canonise_synthesis`](crate::canonise_synthesis)
/// and immutable thereafter. Persisted as one semicolon-delimited line:
///
/// ```text
/// input_code;output_code;phase;NE_lanes;SE_lanes;SW_lanes;NW_lanes;transform
/// ```
///
/// where each lane field is a comma-joined flat list of `(lane, timing)`
/// pairs, possibly empty, and the transform is six comma-joined integers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Canonical code of the input object; `"0"` for a synthesis from
    /// gliders alone.
    pub input: String,
    /// Canonical code of the settled output object.
    pub output: String,
    /// Generations the decoded output must be advanced to line up with
    /// the synthesis.
    pub phase: i32,
    /// The glider swarm, in canonical orientation.
    pub salvo: Salvo,
    /// Grid transformation relating the output's canonical orientation to
    /// the synthesis.
    pub transform: Transform,
}

impl Edge {
    /// The cost of the edge: its number of gliders.
    pub fn cost(&self) -> usize {
        self.salvo.glider_count()
    }
}

fn write_lanes(f: &mut Formatter<'_>, lanes: &[LaneRecord]) -> fmt::Result {
    let mut first = true;
    for record in lanes {
        if !first {
            f.write_char(',')?;
        }
        write!(f, "{},{}", record.lane, record.timing)?;
        first = false;
    }
    Ok(())
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{};{};{};", self.input, self.output, self.phase)?;
        for lanes in self.salvo.lanes.iter() {
            write_lanes(f, lanes)?;
            f.write_char(';')?;
        }
        write!(f, "{}", self.transform)
    }
}

fn parse_lanes(field: &str) -> Result<Vec<LaneRecord>, Error> {
    if field.is_empty() {
        return Ok(Vec::new());
    }
    let values: Vec<i32> = field
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| Error::EdgeNumber(value.to_string()))
        })
        .collect::<Result<_, _>>()?;
    if values.len() % 2 != 0 {
        return Err(Error::EdgeLaneParity(field.to_string()));
    }
    Ok(values
        .chunks(2)
        .map(|pair| LaneRecord {
            lane: pair[0],
            timing: pair[1],
        })
        .collect())
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.trim_end().split(';').collect();
        if fields.len() != 8 {
            return Err(Error::EdgeFieldCount(fields.len()));
        }
        let phase = fields[2]
            .trim()
            .parse()
            .map_err(|_| Error::EdgeNumber(fields[2].to_string()))?;
        let salvo = Salvo {
            lanes: [
                parse_lanes(fields[3])?,
                parse_lanes(fields[4])?,
                parse_lanes(fields[5])?,
                parse_lanes(fields[6])?,
            ],
        };
        Ok(Edge {
            input: fields[0].to_string(),
            output: fields[1].to_string(),
            phase,
            salvo,
            transform: fields[7].parse()?,
        })
    }
}

/// Parses edge record lines into a map keyed by output code.
///
/// Blank lines are skipped. This is the in-memory form of a minimal-path
/// synthesis database; fetching and caching the file itself is the
/// caller's business.
pub fn parse_paths<'a, I>(lines: I) -> Result<HashMap<String, Edge>, Error>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut paths = HashMap::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let edge: Edge = line.parse()?;
        paths.insert(edge.output.clone(), edge);
    }
    Ok(paths)
}

/// Total glider cost of synthesising `code` from nothing, following the
/// minimal edges in `paths` back to the empty code `"0"`.
///
/// Returns `None` when a code along the chain has no edge, or when the
/// chain loops.
pub fn synthesis_cost(paths: &HashMap<String, Edge>, code: &str) -> Option<usize> {
    let mut cost = 0;
    let mut current = code;
    let mut seen = HashSet::new();
    while current != "0" {
        if !seen.insert(current) {
            return None;
        }
        let edge = paths.get(current)?;
        cost += edge.cost();
        current = &edge.input;
    }
    Some(cost)
}
