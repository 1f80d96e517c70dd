//! The infection marking rule.

use super::Rule;

/// A five-state marking rule run over a [`LifeHistory`](super::LifeHistory)
/// snapshot.
///
/// States `1` and `2` are the carriers (alive and was-alive cells of the
/// snapshot), `3` is an infected carrier and `4` an infected bridge cell.
/// Two transitions only:
///
/// * a carrier with an infected neighbour becomes `3`;
/// * a background cell with an infected carrier neighbour and at least two
///   further carrier neighbours becomes `4`, letting the infection jump
///   one-cell gaps between causally connected parts of the history.
///
/// Everything else is left unchanged, so the underlying snapshot never
/// evolves while the marking spreads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InfectLife;

impl Rule for InfectLife {
    fn next_state(&self, center: u8, neighbors: &[u8; 8]) -> u8 {
        match center {
            1 | 2 => {
                if neighbors.iter().any(|&state| state == 3 || state == 4) {
                    3
                } else {
                    center
                }
            }
            0 => {
                let infected = neighbors.iter().filter(|&&state| state == 3).count();
                let carriers = neighbors
                    .iter()
                    .filter(|&&state| matches!(state, 1..=3))
                    .count();
                if infected >= 1 && carriers >= 3 {
                    4
                } else {
                    0
                }
            }
            other => other,
        }
    }
}
