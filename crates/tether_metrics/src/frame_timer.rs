//! Tick timing

use crate::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

/// Measures wall time per tick over a rolling window.
pub struct FrameTimer {
    started: Option<Instant>,
    window: RingBuffer,
    last: Duration,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            started: None,
            window: RingBuffer::new(capacity),
            last: Duration::ZERO,
        }
    }

    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the current tick. Without a matching `begin` this does nothing.
    pub fn end(&mut self) -> Duration {
        if let Some(started) = self.started.take() {
            self.last = started.elapsed();
            self.window.push(self.last);
        }
        self.last
    }

    pub fn fps(&self) -> f64 {
        let avg = self.window.average().as_secs_f64();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.window.average().as_secs_f64() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.window.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }
}
