//! Affine transformations drawn from the
//! [dihedral group _D_<sub>8</sub>](https://en.wikipedia.org/wiki/Examples_of_groups#dihedral_group_of_order_8)
//! of the square grid.
//!
//! A transformation is stored in affine form: an origin offset and a
//! basis with determinant ±1. The eight elements of _D_<sub>8</sub>
//! rooted at the four corners of a bounding rectangle give the eight
//! scan [`Frame`]s used by the codec.

use crate::cells::{Coord, Pattern, Rect};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An affine map `(u, v) -> (ox + a·u + b·v, oy + c·u + d·v)`.
///
/// The linear part always has determinant ±1: every map in this crate is
/// one of the eight grid symmetries composed with a translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Horizontal origin offset.
    pub ox: i32,
    /// Vertical origin offset.
    pub oy: i32,
    /// First basis vector, x component.
    pub a: i32,
    /// Second basis vector, x component.
    pub b: i32,
    /// First basis vector, y component.
    pub c: i32,
    /// Second basis vector, y component.
    pub d: i32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// A new transform from its six integers.
    pub const fn new(ox: i32, oy: i32, a: i32, b: i32, c: i32, d: i32) -> Self {
        Self { ox, oy, a, b, c, d }
    }

    /// The identity transformation.
    pub const fn identity() -> Self {
        Self::new(0, 0, 1, 0, 0, 1)
    }

    /// The determinant of the linear part.
    #[inline]
    pub fn det(&self) -> i32 {
        self.a * self.d - self.b * self.c
    }

    /// Applies the transformation to a coordinate.
    #[inline]
    pub fn act_on(&self, (u, v): Coord) -> Coord {
        (
            self.ox + self.a * u + self.b * v,
            self.oy + self.c * u + self.d * v,
        )
    }

    /// Applies the transformation to every cell of a pattern.
    pub fn apply(&self, pattern: &Pattern) -> Pattern {
        pattern.iter().map(|coord| self.act_on(coord)).collect()
    }

    /// The inverse transformation.
    ///
    /// Because the determinant is ±1 the inverse is again integral.
    pub fn inverse(&self) -> Self {
        let det = self.det();
        let (a, b, c, d) = (det * self.d, -det * self.b, -det * self.c, det * self.a);
        Self {
            ox: -(a * self.ox + b * self.oy),
            oy: -(c * self.ox + d * self.oy),
            a,
            b,
            c,
            d,
        }
    }

    /// The composition `then ∘ self`: first `self`, then `then`.
    pub fn compose(&self, then: &Self) -> Self {
        let (ox, oy) = then.act_on((self.ox, self.oy));
        Self {
            ox,
            oy,
            a: then.a * self.a + then.b * self.c,
            b: then.a * self.b + then.b * self.d,
            c: then.c * self.a + then.d * self.c,
            d: then.c * self.b + then.d * self.d,
        }
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.ox, self.oy, self.a, self.b, self.c, self.d
        )
    }
}

impl FromStr for Transform {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0; 6];
        let mut count = 0;
        for field in s.split(',') {
            if count == 6 {
                return Err(crate::error::Error::EdgeNumber(s.to_string()));
            }
            parts[count] = field
                .trim()
                .parse()
                .map_err(|_| crate::error::Error::EdgeNumber(field.to_string()))?;
            count += 1;
        }
        if count != 6 {
            return Err(crate::error::Error::EdgeNumber(s.to_string()));
        }
        let transform = Self::new(parts[0], parts[1], parts[2], parts[3], parts[4], parts[5]);
        if transform.det().abs() != 1 {
            return Err(crate::error::Error::BadDeterminant(transform));
        }
        Ok(transform)
    }
}

/// One scan frame of a bounding rectangle: the transformation from frame
/// coordinates back to grid coordinates, together with the extent of the
/// frame along its own axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Extent along the scan axis.
    pub length: i32,
    /// Extent across the scan axis.
    pub breadth: i32,
    /// Map from `(u, v)` frame coordinates to grid coordinates.
    pub map: Transform,
}

impl Frame {
    /// The degenerate frame of the empty pattern.
    pub const fn trivial() -> Self {
        Self {
            length: 0,
            breadth: 0,
            map: Transform::identity(),
        }
    }
}

impl Rect {
    /// The eight scan frames of this rectangle: the two axis choices
    /// combined with the four corners the scan can be rooted at.
    pub fn frames(&self) -> [Frame; 8] {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        let frame = |length, breadth, ox, oy, a, b, c, d| Frame {
            length,
            breadth,
            map: Transform::new(ox, oy, a, b, c, d),
        };
        [
            frame(w, h, x, y, 1, 0, 0, 1),
            frame(w, h, x + w - 1, y, -1, 0, 0, 1),
            frame(w, h, x, y + h - 1, 1, 0, 0, -1),
            frame(w, h, x + w - 1, y + h - 1, -1, 0, 0, -1),
            frame(h, w, x, y, 0, 1, 1, 0),
            frame(h, w, x + w - 1, y, 0, -1, 1, 0),
            frame(h, w, x, y + h - 1, 0, 1, -1, 0),
            frame(h, w, x + w - 1, y + h - 1, 0, -1, -1, 0),
        ]
    }
}
