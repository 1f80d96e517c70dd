//! Canonical pattern encoding and glider-synthesis canonicalisation for
//! Conway's Game of Life.
//!
//! The crate has two halves:
//!
//! * a codec producing a compact, canonical alphanumeric code for any
//!   oscillator or spaceship that fits a 40-by-40 box in some phase,
//!   invariant under the object's own motion and the eight grid
//!   symmetries;
//! * a canonicalisation engine that normalises a glider synthesis (a
//!   swarm of gliders colliding into an object) to a unique
//!   [`Edge`] record, validating it on the way, plus an infection-based
//!   search splitting composite syntheses into minimal ones.

mod canon;
mod cells;
mod codec;
mod config;
mod d8;
mod decompose;
mod edge;
mod error;
mod glider;
mod phase;
pub mod rules;
mod world;

pub use canon::{canonise_synthesis, Outcome};
pub use cells::{Coord, Pattern, Rect};
pub use codec::{cmp_repr, decode, encode_orientation, DecodeProfile, ALPHABET, MAX_SIDE};
pub use config::Config;
pub use d8::{Frame, Transform};
pub use decompose::find_syntheses;
pub use edge::{parse_paths, synthesis_cost, Edge};
pub use error::Error;
pub use glider::{remove_gliders, Heading, LaneRecord, Salvo};
pub use phase::{analyse_object, canonise, Canonised, ObjectAnalysis};
pub use world::{PlaceMode, World};
