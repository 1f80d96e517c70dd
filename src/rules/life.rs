//! The standard Life rule and its history-keeping variant.

use super::Rule;

/// A live cell.
pub const ALIVE: u8 = 1;

/// Conway's Life, `B3/S23`, over states `0` (dead) and `1` (alive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Life;

impl Rule for Life {
    fn next_state(&self, center: u8, neighbors: &[u8; 8]) -> u8 {
        let count = neighbors.iter().filter(|&&state| state == ALIVE).count();
        if center == ALIVE {
            if count == 2 || count == 3 {
                ALIVE
            } else {
                0
            }
        } else if count == 3 {
            ALIVE
        } else {
            0
        }
    }
}

/// Life with a memory of past live cells.
///
/// States: `0` never alive, `1` alive, `2` dead but alive at some point
/// in the past. The live cells follow `B3/S23` exactly; state `2` only
/// records where the pattern has been, which is what the infection rule
/// spreads through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeHistory;

impl Rule for LifeHistory {
    fn next_state(&self, center: u8, neighbors: &[u8; 8]) -> u8 {
        let count = neighbors.iter().filter(|&&state| state == ALIVE).count();
        if center == ALIVE {
            if count == 2 || count == 3 {
                ALIVE
            } else {
                2
            }
        } else if count == 3 {
            ALIVE
        } else {
            center
        }
    }
}
