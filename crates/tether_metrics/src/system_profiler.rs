//! Per-name timing of callbacks (script classes, systems)

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Timing {
    pub total: Duration,
    pub calls: u64,
}

#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: HashMap<String, Timing>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        match self.timings.get_mut(name) {
            Some(timing) => {
                timing.total += elapsed;
                timing.calls += 1;
            }
            None => {
                self.timings.insert(
                    name.to_string(),
                    Timing {
                        total: elapsed,
                        calls: 1,
                    },
                );
            }
        }
        result
    }

    pub fn get_timing(&self, name: &str) -> Duration {
        self.timings.get(name).map(|t| t.total).unwrap_or_default()
    }

    pub fn calls(&self, name: &str) -> u64 {
        self.timings.get(name).map(|t| t.calls).unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    /// Timings sorted by total time, slowest first.
    pub fn report(&self) -> Vec<(&str, Timing)> {
        let mut rows: Vec<_> = self
            .timings
            .iter()
            .map(|(name, timing)| (name.as_str(), *timing))
            .collect();
        rows.sort_by(|a, b| b.1.total.cmp(&a.1.total).then(a.0.cmp(b.0)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_and_passes_result_through() {
        let mut profiler = SystemProfiler::new();
        let value = profiler.time_system("Player", || 7);
        profiler.time_system("Player", || ());
        profiler.time_system("Camera", || ());

        assert_eq!(value, 7);
        assert_eq!(profiler.calls("Player"), 2);
        assert_eq!(profiler.calls("Camera"), 1);
        assert_eq!(profiler.calls("Missing"), 0);
        assert_eq!(profiler.report().len(), 2);
    }
}
