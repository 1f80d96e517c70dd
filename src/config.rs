//! Pipeline configuration.

use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generation bounds used by the canonicalisation pipeline.
///
/// Exceeding a bound is a definite outcome (`Unknown` or `Fail`), never a
/// retry trigger. The defaults match the reference database: 46
/// generations comfortably exceed every known small-object period, and
/// the settle and light-cone horizons cover the longest syntheses in it.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Maximum number of generations inspected when searching for an
    /// object's period.
    #[educe(Default = 46)]
    pub max_period: i32,

    /// Generations a synthesis is evolved before reading off its settled
    /// output object.
    #[educe(Default = 1024)]
    pub settle: u32,

    /// Light-cone horizon used when decomposing a synthesis: how far the
    /// pattern and its candidate chunks are evolved.
    #[educe(Default = 840)]
    pub horizon: u32,

    /// Generations the infection rule is stepped to let a marking spread
    /// through a whole causally connected chunk.
    #[educe(Default = 1024)]
    pub infection_steps: u32,
}

impl Config {
    /// Sets up a new configuration with default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the period-search bound.
    pub fn set_max_period(mut self, max_period: i32) -> Self {
        self.max_period = max_period;
        self
    }

    /// Sets the settle horizon.
    pub fn set_settle(mut self, settle: u32) -> Self {
        self.settle = settle;
        self
    }

    /// Sets the decomposition light-cone horizon.
    pub fn set_horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the infection-spread step count.
    pub fn set_infection_steps(mut self, infection_steps: u32) -> Self {
        self.infection_steps = infection_steps;
        self
    }
}
