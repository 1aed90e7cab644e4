//! Simulation time
//!
//! Ticks are variable-length: each one carries the elapsed time since the
//! previous tick. Nothing downstream may assume a fixed step.

use std::time::Duration;

/// Elapsed time for a single tick, in seconds.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct Timestep(f32);

impl Timestep {
    pub const fn from_seconds(seconds: f32) -> Self {
        Self(seconds)
    }

    pub fn seconds(&self) -> f32 {
        self.0
    }

    pub fn milliseconds(&self) -> f32 {
        self.0 * 1000.0
    }
}

impl From<f32> for Timestep {
    fn from(seconds: f32) -> Self {
        Self(seconds)
    }
}

impl From<Timestep> for f32 {
    fn from(ts: Timestep) -> Self {
        ts.0
    }
}

impl From<Duration> for Timestep {
    fn from(elapsed: Duration) -> Self {
        Self(elapsed.as_secs_f32())
    }
}

/// Simulation time tracker
pub struct SimulationTime {
    tick_count: u64,
    accumulated_time: Duration,
}

impl SimulationTime {
    pub fn new() -> Self {
        Self {
            tick_count: 0,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Record one tick of the given length. Steps that are negative,
    /// non-finite or too large for a `Duration` still count as a tick but
    /// add no time.
    pub fn advance_tick(&mut self, ts: Timestep) {
        self.tick_count += 1;
        if ts.seconds() <= 0.0 {
            return;
        }
        match Duration::try_from_secs_f32(ts.seconds()) {
            Ok(step) => {
                self.accumulated_time = self.accumulated_time.saturating_add(step);
            }
            Err(err) => tracing::warn!(seconds = ts.seconds(), "ignoring tick length: {err}"),
        }
    }

    pub fn total_time(&self) -> Duration {
        self.accumulated_time
    }
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestep_units() {
        let ts = Timestep::from_seconds(0.25);
        assert_eq!(ts.seconds(), 0.25);
        assert_eq!(ts.milliseconds(), 250.0);
        assert_eq!(f32::from(ts), 0.25);
    }

    #[test]
    fn variable_ticks_accumulate() {
        let mut time = SimulationTime::new();
        time.advance_tick(Timestep::from_seconds(0.5));
        time.advance_tick(Timestep::from_seconds(0.25));
        time.advance_tick(Timestep::from_seconds(f32::NAN));

        assert_eq!(time.tick_count(), 3);
        assert_eq!(time.total_time(), Duration::from_millis(750));
    }

    #[test]
    fn oversized_step_is_ignored() {
        let mut time = SimulationTime::new();
        time.advance_tick(Timestep::from_seconds(0.5));
        time.advance_tick(Timestep::from_seconds(1.0e30));
        time.advance_tick(Timestep::from_seconds(f32::INFINITY));

        assert_eq!(time.tick_count(), 3);
        assert_eq!(time.total_time(), Duration::from_millis(500));
    }
}
