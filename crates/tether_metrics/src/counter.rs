//! Named event counters
//!
//! Keys are `&'static str` so hot paths (one increment per boundary call)
//! never allocate.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Counter {
    counts: BTreeMap<&'static str, u64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &'static str) {
        self.add(name, 1);
    }

    pub fn add(&mut self, name: &'static str, value: u64) {
        *self.counts.entry(name).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Sum over every counter.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn reset_all(&mut self) {
        self.counts.clear();
    }

    /// Counters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counts.iter().map(|(name, count)| (*name, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_name() {
        let mut counter = Counter::new();
        counter.increment("transform_get_translation");
        counter.increment("transform_get_translation");
        counter.add("input_is_key_down", 3);

        assert_eq!(counter.get("transform_get_translation"), 2);
        assert_eq!(counter.get("rigidbody_add_force"), 0);
        assert_eq!(counter.total(), 5);
        assert_eq!(
            counter.iter().collect::<Vec<_>>(),
            vec![("input_is_key_down", 3), ("transform_get_translation", 2)]
        );

        counter.reset_all();
        assert_eq!(counter.total(), 0);
    }
}
