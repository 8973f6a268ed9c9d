use std::collections::HashMap;
use std::hash::Hash;

use futures::future::AbortHandle;

use crate::reveal::count_up::CountUp;

// Browsers round the reported ratio, so a crossing of 0.2 can arrive as 0.1999.
const RATIO_TOLERANCE: f64 = 1e-3;

/// What happens when an element first scrolls into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEffect {
    Reveal,
    CountUp(CountUp),
}

#[derive(Debug)]
pub struct VisibilityRecord {
    effect: RevealEffect,
    has_triggered: bool,
    intersecting: bool,
    task: Option<AbortHandle>,
}

impl VisibilityRecord {
    fn new(effect: RevealEffect) -> Self {
        VisibilityRecord {
            effect,
            has_triggered: false,
            intersecting: false,
            task: None,
        }
    }

    pub fn effect(&self) -> RevealEffect {
        self.effect
    }

    pub fn has_triggered(&self) -> bool {
        self.has_triggered
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Tracks which elements have already played their one-shot effect.
///
/// The viewport side is abstract: whoever watches layout reports each
/// element's visible fraction through `observe`.
#[derive(Debug)]
pub struct VisibilityScheduler<K> {
    threshold: f64,
    records: HashMap<K, VisibilityRecord>,
}

impl<K: Eq + Hash + Copy> VisibilityScheduler<K> {
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            1.0
        } else {
            threshold.clamp(f64::EPSILON, 1.0)
        };
        VisibilityScheduler {
            threshold,
            records: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Starts tracking `key` with a fresh record. A record left over under
    /// the same key is discarded and its task cancelled.
    pub fn register(&mut self, key: K, effect: RevealEffect) -> &VisibilityRecord {
        if let Some(mut stale) = self.records.remove(&key) {
            stale.cancel();
        }
        self.records.entry(key).or_insert(VisibilityRecord::new(effect))
    }

    pub fn unregister(&mut self, key: K) -> bool {
        match self.records.remove(&key) {
            Some(mut record) => {
                record.cancel();
                true
            }
            None => false,
        }
    }

    pub fn record(&self, key: K) -> Option<&VisibilityRecord> {
        self.records.get(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports the visible fraction of `key`. Returns the effect to run when
    /// this is the element's first crossing of the threshold.
    pub fn observe(&mut self, key: K, ratio: f64) -> Option<RevealEffect> {
        let threshold = self.threshold;
        let record = self.records.get_mut(&key)?;
        let intersecting = ratio + RATIO_TOLERANCE >= threshold;
        let entered = intersecting && !record.intersecting;
        record.intersecting = intersecting;

        if !entered || record.has_triggered {
            return None;
        }
        record.has_triggered = true;
        Some(record.effect)
    }

    /// Binds a running animation to `key` so that unregistering stops it.
    /// Aborts the task straight away when the element is already gone.
    pub fn attach_task(&mut self, key: K, task: AbortHandle) {
        match self.records.get_mut(&key) {
            Some(record) => {
                record.cancel();
                record.task = Some(task);
            }
            None => task.abort(),
        }
    }
}
