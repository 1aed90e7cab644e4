//! Fixed-capacity sample window for rolling tick statistics

use std::time::Duration;

#[derive(Debug)]
pub struct RingBuffer {
    samples: Vec<Duration>,
    capacity: usize,
    next: usize,
}

impl RingBuffer {
    /// A zero capacity is bumped to one so the window always holds the latest sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    pub fn push(&mut self, sample: Duration) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn min_max(&self) -> (Duration, Duration) {
        let min = self.samples.iter().min().copied().unwrap_or_default();
        let max = self.samples.iter().max().copied().unwrap_or_default();
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_overwrites_oldest() {
        let mut window = RingBuffer::new(3);
        assert_eq!(window.average(), Duration::ZERO);

        for ms in [10, 20, 30, 40] {
            window.push(Duration::from_millis(ms));
        }

        assert_eq!(window.len(), 3);
        assert_eq!(window.average(), Duration::from_millis(30)); // (20 + 30 + 40) / 3
        assert_eq!(
            window.min_max(),
            (Duration::from_millis(20), Duration::from_millis(40))
        );
    }
}
