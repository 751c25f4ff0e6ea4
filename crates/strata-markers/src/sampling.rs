// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Density reduction for edge batches.

use std::collections::BTreeMap;

/// Per-key "draw one, skip `k`" sampler.
///
/// The first item offered under each key is always drawn, so any key with at
/// least one item produces output. Over `E` items with skip `k`, exactly
/// `ceil(E / (k + 1))` are drawn. Built fresh per aggregation pass.
#[derive(Debug)]
pub struct InsertionSampler<K> {
    skipped: BTreeMap<K, usize>,
}

impl<K: Ord> Default for InsertionSampler<K> {
    fn default() -> Self {
        Self {
            skipped: BTreeMap::new(),
        }
    }
}

impl<K: Ord> InsertionSampler<K> {
    /// Empty sampler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers one item under `key`; returns whether to draw it.
    pub fn admit(&mut self, key: K, skip: usize) -> bool {
        let skipped = self.skipped.entry(key).or_insert(skip);
        if *skipped >= skip {
            *skipped = 0;
            true
        } else {
            *skipped += 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_first_then_every_k_plus_one() {
        let mut sampler = InsertionSampler::new();
        let drawn: Vec<bool> = (0..7).map(|_| sampler.admit("a", 2)).collect();
        assert_eq!(drawn, [true, false, false, true, false, false, true]);
    }

    #[test]
    fn keys_are_independent() {
        let mut sampler = InsertionSampler::new();
        assert!(sampler.admit(1, 5));
        assert!(sampler.admit(2, 5));
        assert!(!sampler.admit(1, 5));
    }
}
