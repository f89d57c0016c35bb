//! Counters for composite disposable activity.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time snapshot of a composite's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeStats {
    /// Members accepted by `add` (or seeded at construction)
    pub added: u64,
    /// Members removed by pruning because they were already disposed
    pub pruned: u64,
    /// Registrations disposed immediately because the composite was disposed
    pub late_disposed: u64,
    /// Members disposed by the composite's own `dispose`
    pub disposed: u64,
    /// Member `dispose` calls that panicked
    pub panics: u64,
}

/// Live counters, updated while the composite lock is held.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    added: AtomicU64,
    pruned: AtomicU64,
    late_disposed: AtomicU64,
    disposed: AtomicU64,
    panics: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_added(&self, count: usize) {
        self.added.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_pruned(&self, count: usize) {
        self.pruned.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_late(&self) {
        self.late_disposed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_disposed(&self, count: usize) {
        self.disposed.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_panic(&self) {
        self.panics.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CompositeStats {
        CompositeStats {
            added: self.added.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            late_disposed: self.late_disposed.load(Ordering::Relaxed),
            disposed: self.disposed.load(Ordering::Relaxed),
            panics: self.panics.load(Ordering::Relaxed),
        }
    }
}
