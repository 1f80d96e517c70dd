//! All kinds of errors in this crate.

use crate::d8::Transform;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// Canonical code {0:?} does not start with `x`.
    BadHeader(String),
    /// Canonical code {0:?} is missing the `_` separator.
    MissingSeparator(String),
    /// Invalid symbol {0:?} in canonical code.
    BadSymbol(char),
    /// Canonical code {0:?} ends inside a `y` escape.
    DanglingEscape(String),
    /// A run of {0} empty columns does not fit the escape alphabet.
    ZeroRunOverflow(i32),
    /// Misaligned synthesis: exact division {0} / {1} left a remainder.
    MisalignedSynthesis(i32, i32),
    /// Synthesis edge record has {0} fields; expected 8.
    EdgeFieldCount(usize),
    /// Invalid integer {0:?} in synthesis edge record.
    EdgeNumber(String),
    /// Glider lane list {0:?} has an odd number of values.
    EdgeLaneParity(String),
    /// Transform {0} does not have determinant ±1.
    BadDeterminant(Transform),
}
