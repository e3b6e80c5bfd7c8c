//! Tick and generation cadence.

use serde::{Deserialize, Serialize};

/// Where the clock stands relative to the generation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current generation is still running.
    Accumulating,
    /// The generation duration has elapsed; a rollover is due.
    RollingOver,
}

/// Tracks total simulated time and elapsed time within the current
/// generation.
///
/// The clock is a two-state machine: it accumulates until the generation
/// duration elapses, reports [`Phase::RollingOver`] exactly until
/// [`GenerationClock::finish_generation`] is called, then accumulates again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationClock {
    time: f32,
    in_generation: f32,
    duration: f32,
    generation: u32,
    ticks: u64,
}

impl GenerationClock {
    /// Creates a clock for a given generation duration.
    ///
    /// The duration is validated by [`super::params::Params::validate`]
    /// before the clock is built.
    pub fn new(duration: f32) -> Self {
        Self {
            time: 0.0,
            in_generation: 0.0,
            duration,
            generation: 0,
            ticks: 0,
        }
    }

    /// Advances by one tick.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
        self.in_generation += dt;
        self.ticks += 1;
    }

    /// Current phase of the generation state machine.
    pub fn phase(&self) -> Phase {
        if self.in_generation >= self.duration {
            Phase::RollingOver
        } else {
            Phase::Accumulating
        }
    }

    /// Completes a rollover: zeroes the in-generation counter and
    /// increments the generation number.
    pub fn finish_generation(&mut self) {
        self.in_generation = 0.0;
        self.generation += 1;
    }

    /// Total simulated seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Seconds elapsed in the current generation.
    pub fn elapsed_in_generation(&self) -> f32 {
        self.in_generation
    }

    /// Completed-generation count (0 while the first generation runs).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks processed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
