//! The canonical pattern codec.
//!
//! A bounded pattern is encoded as a compact lowercase alphanumeric
//! string, a generalisation of a notation created by Allan Weschler
//! in 1992. The bounding box is scanned in 5-row bands; each column of a
//! band packs its five cells into one symbol of the 36-symbol alphabet,
//! and runs of empty columns are compressed. Compare:
//!
//! * common name: pentadecathlon
//! * canonical representation: `4r4z4r4`
//! * equivalent RLE: `2bo4bo$2ob4ob2o$2bo4bo!`

use crate::{
    cells::Pattern,
    d8::Frame,
    error::Error,
};
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The 36-symbol alphabet of the codec.
pub const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Patterns whose bounding box exceeds this side length are not encodable.
pub const MAX_SIDE: i32 = 40;

/// The internal "not encodable" sentinel. Compares worse than any
/// concrete representation and never escapes the crate's public API.
pub(crate) const SENTINEL: &str = "#";

#[inline]
fn symbol(index: usize) -> char {
    ALPHABET.as_bytes()[index] as char
}

fn symbol_index(ch: char) -> Result<u32, Error> {
    match ch {
        '0'..='9' => Ok(ch as u32 - '0' as u32),
        'a'..='z' => Ok(ch as u32 - 'a' as u32 + 10),
        _ => Err(Error::BadSymbol(ch)),
    }
}

fn flush_zeroes(representation: &mut String, zeroes: i32) -> Result<(), Error> {
    match zeroes {
        0 => {}
        1 => representation.push('0'),
        2 => representation.push('w'),
        3 => representation.push('x'),
        run => {
            if run - 4 >= 36 {
                return Err(Error::ZeroRunOverflow(run));
            }
            representation.push('y');
            representation.push(symbol((run - 4) as usize));
        }
    }
    Ok(())
}

/// Encodes the pattern as seen through one scan frame.
///
/// The frame's breadth axis is chunked into 5-row bands separated by `z`;
/// within a band each column packs its five cells into one symbol, with
/// runs of empty columns compressed as `0`, `w`, `x` or a `y` escape.
pub fn encode_orientation(pattern: &Pattern, frame: &Frame) -> Result<String, Error> {
    let mut representation = String::new();
    let bands = (frame.breadth - 1).div_euclid(5) + 1;
    for v in 0..bands {
        let mut zeroes = 0;
        if v != 0 {
            representation.push('z');
        }
        for u in 0..frame.length {
            let mut baudot = 0u32;
            for w in 0..5 {
                baudot >>= 1;
                if pattern.contains(frame.map.act_on((u, 5 * v + w))) {
                    baudot += 16;
                }
            }
            if baudot == 0 {
                zeroes += 1;
            } else {
                flush_zeroes(&mut representation, zeroes)?;
                zeroes = 0;
                representation.push(symbol(baudot as usize));
            }
        }
    }
    Ok(representation)
}

/// Compares two representation strings: first by length, then
/// lexicographically. `Ordering::Less` means more canonical. The sentinel
/// `"#"` is worse than any concrete representation.
pub fn cmp_repr(a: &str, b: &str) -> Ordering {
    match (a == SENTINEL, b == SENTINEL) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
    }
}

/// How the symbol following a `y` escape is interpreted when decoding.
///
/// Two interpretations circulate: the historical decoder lets a `z` inside
/// an escape add 35 and keep the escape open, while a simpler one closes
/// the escape on whatever symbol follows. Both agree on everything the
/// encoder emits, since the encoder never produces a run needing `z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodeProfile {
    /// `z` inside a `y` escape adds 35 and leaves the escape open.
    Extended,
    /// The symbol after `y` always closes the escape, `z` included.
    Simple,
}

impl Default for DecodeProfile {
    fn default() -> Self {
        DecodeProfile::Extended
    }
}

/// Decodes a canonical code back into a cell set rooted at the origin.
///
/// Accepts the literal `"0"` for the empty pattern, otherwise an
/// `x`-prefixed code with a `_` separator. Malformed codes fail fast
/// rather than producing a truncated pattern.
pub fn decode(code: &str, profile: DecodeProfile) -> Result<Pattern, Error> {
    if code == "0" {
        return Ok(Pattern::new());
    }
    if !code.starts_with('x') {
        return Err(Error::BadHeader(code.to_string()));
    }
    let separator = code
        .find('_')
        .ok_or_else(|| Error::MissingSeparator(code.to_string()))?;

    let mut pattern = Pattern::new();
    let mut escape = false;
    let (mut x, mut y) = (0i32, 0i32);
    for ch in code[separator + 1..].chars() {
        if escape {
            if ch == 'z' && profile == DecodeProfile::Extended {
                x += 35;
            } else {
                x += symbol_index(ch)? as i32;
                escape = false;
            }
        } else {
            match ch {
                'z' => {
                    x = 0;
                    y += 5;
                }
                'y' => {
                    x += 4;
                    escape = true;
                }
                'x' => x += 3,
                'w' => x += 2,
                _ => {
                    let bits = symbol_index(ch)?;
                    for i in 0..5 {
                        if bits & (1 << i) != 0 {
                            pattern.insert((x, y + i));
                        }
                    }
                    x += 1;
                }
            }
        }
    }
    if escape {
        return Err(Error::DanglingEscape(code.to_string()));
    }
    Ok(pattern)
}
