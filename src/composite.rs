//! The composite disposable: a thread-safe bag of disposables released together.

use std::cell::RefCell;
use std::fmt;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::ReentrantMutex;
use tracing::{debug, error, trace};

use crate::config::CompositeConfig;
use crate::error::{DisposeError, DisposeResult};
use crate::internal::{catch_member, partition_disposed, MemberList};
use crate::metrics::{CompositeStats, StatsCounters};
use crate::traits::Disposable;

/// A disposable that disposes a collection of disposables when it is disposed.
///
/// Members are released in insertion order, exactly once, by the first call to
/// [`dispose`](Self::dispose). Anything registered after that is disposed
/// immediately inside [`add`](Self::add) instead of being stored.
///
/// All mutation happens under a per-instance reentrant lock, so a member's own
/// teardown may call back into the same composite from the same thread (to
/// register follow-up cleanup, or because the composite contains itself)
/// without deadlocking.
///
/// Dropping a composite does **not** dispose its members; use
/// [`DisposeGuard`](crate::DisposeGuard) for scope-bound disposal.
///
/// # Examples
///
/// ```
/// use disposal_composite::{BooleanDisposable, CompositeDisposable, Disposable};
/// use std::sync::Arc;
///
/// let timer = Arc::new(BooleanDisposable::new());
/// let stream = Arc::new(BooleanDisposable::new());
///
/// let mut bag = CompositeDisposable::new();
/// bag.add(timer.clone());
/// bag += stream.clone();
///
/// bag.dispose();
/// assert!(timer.is_disposed() && stream.is_disposed());
///
/// // Late registrations are disposed on the spot.
/// let late = Arc::new(BooleanDisposable::new());
/// bag.add(late.clone());
/// assert!(late.is_disposed());
/// assert!(bag.is_empty());
/// ```
pub struct CompositeDisposable {
    disposed: AtomicBool,
    members: ReentrantMutex<RefCell<MemberList>>,
    stats: StatsCounters,
    label: Option<String>,
    prune_on_add: bool,
    catch_panics: bool,
}

impl CompositeDisposable {
    /// Creates an empty, live composite with default options.
    pub fn new() -> Self {
        Self::with_config(CompositeConfig::default())
    }

    /// Creates an empty, live composite from explicit options.
    pub fn with_config(config: CompositeConfig) -> Self {
        Self::build(config, MemberList::default())
    }

    /// Creates a composite pre-seeded with `members`, kept in iteration order.
    ///
    /// The initial members are stored as given: none are pruned, even if they
    /// are already disposed.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator,
        I::Item: Disposable,
    {
        members
            .into_iter()
            .map(|member| Box::new(member) as Box<dyn Disposable>)
            .collect()
    }

    fn build(config: CompositeConfig, mut seeded: MemberList) -> Self {
        let initial = seeded.len();
        if seeded.is_empty() && config.capacity > 0 {
            seeded = MemberList::with_capacity(config.capacity);
        }

        let stats = StatsCounters::default();
        stats.record_added(initial);

        Self {
            disposed: AtomicBool::new(false),
            members: ReentrantMutex::new(RefCell::new(seeded)),
            stats,
            label: config.label,
            prune_on_add: config.prune_on_add,
            catch_panics: config.catch_panics,
        }
    }

    /// Registers `disposable` with this composite.
    ///
    /// If the composite is already disposed, `disposable` is disposed
    /// immediately and never stored. Otherwise it is appended, and every
    /// member that already reports itself disposed (including `disposable`)
    /// is pruned.
    pub fn add<D: Disposable>(&self, disposable: D) {
        let guard = self.members.lock();

        if self.disposed.load(Ordering::Acquire) {
            trace!(label = self.label_str(), "late registration, disposing immediately");
            self.stats.record_late();
            if self.catch_panics {
                if let Err(failure) = catch_member(0, &disposable) {
                    self.report_panic(&failure);
                }
            } else {
                disposable.dispose();
            }
            return;
        }

        guard.borrow_mut().push(Box::new(disposable));
        self.stats.record_added(1);

        if self.prune_on_add {
            self.prune(&guard);
        }
    }

    /// Drops members that already report themselves disposed.
    ///
    /// Member code (`is_disposed`, and `Drop` of pruned members) runs with no
    /// `RefCell` borrow held, so it may call back into this composite.
    fn prune(&self, guard: &RefCell<MemberList>) {
        let snapshot = guard.borrow_mut().take();
        let (kept, pruned) = partition_disposed(snapshot);

        if !pruned.is_empty() {
            self.stats.record_pruned(pruned.len());
        }

        if self.disposed.load(Ordering::Acquire) {
            // A member disposed the composite while being inspected; that drain
            // saw an empty list, so the survivors are released here.
            for (index, member) in kept.iter().enumerate() {
                self.dispose_one(index, &**member);
            }
        } else {
            let remaining = {
                let mut members = guard.borrow_mut();
                members.restore(kept);
                members.len()
            };
            if !pruned.is_empty() {
                trace!(label = self.label_str(), pruned = pruned.len(), remaining, "pruned disposed members");
            }
        }

        drop(pruned);
    }

    /// Disposes every member and marks this composite disposed.
    ///
    /// Only the first call has an effect. A member whose `dispose` panics is
    /// logged and skipped; the remaining members are still disposed.
    pub fn dispose(&self) {
        self.dispose_members();
    }

    /// Same as [`dispose`](Self::dispose), but reports members that panicked.
    ///
    /// Every member is still attempted. Calls after the first return `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns [`DisposeError::MemberPanicked`] for a single failing member,
    /// or [`DisposeError::Multiple`] when several failed.
    pub fn try_dispose(&self) -> DisposeResult<()> {
        match DisposeError::from_failures(self.dispose_members()) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn dispose_members(&self) -> Vec<DisposeError> {
        let guard = self.members.lock();

        if self.disposed.swap(true, Ordering::AcqRel) {
            return Vec::new();
        }

        // The borrow ends here so members may re-enter `add` while being disposed.
        let drained = guard.borrow_mut().take();
        debug!(label = self.label_str(), count = drained.len(), "disposing composite");

        let mut failures = Vec::new();
        for (index, member) in drained.iter().enumerate() {
            if let Some(failure) = self.dispose_one(index, &**member) {
                failures.push(failure);
            }
        }

        failures
    }

    /// Dispose a single member, counting it only if it completed.
    fn dispose_one(&self, index: usize, member: &dyn Disposable) -> Option<DisposeError> {
        if self.catch_panics {
            if let Err(failure) = catch_member(index, member) {
                self.report_panic(&failure);
                return Some(failure);
            }
        } else {
            member.dispose();
        }
        self.stats.record_disposed(1);
        None
    }

    fn report_panic(&self, failure: &DisposeError) {
        self.stats.record_panic();
        error!(label = self.label_str(), error = %failure, "member dispose panicked");
    }

    fn label_str(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }

    /// Whether this composite has been disposed. Never reverts to `false`.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Number of members currently held. Always `0` once disposed.
    pub fn len(&self) -> usize {
        self.members.lock().borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.lock().borrow().is_empty()
    }

    /// The label this composite was configured with, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Snapshot of this composite's activity counters.
    pub fn stats(&self) -> CompositeStats {
        self.stats.snapshot()
    }
}

impl Disposable for CompositeDisposable {
    fn dispose(&self) {
        CompositeDisposable::dispose(self);
    }

    fn is_disposed(&self) -> bool {
        CompositeDisposable::is_disposed(self)
    }
}

impl Default for CompositeDisposable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Box<dyn Disposable>> for CompositeDisposable {
    fn from_iter<I: IntoIterator<Item = Box<dyn Disposable>>>(iter: I) -> Self {
        Self::build(CompositeConfig::default(), iter.into_iter().collect())
    }
}

/// `bag += disposable` is shorthand for [`CompositeDisposable::add`].
///
/// Implemented for both owned and shared references, so an
/// `Arc<CompositeDisposable>` can use it as `let mut bag = &*shared; bag += d;`.
impl<D: Disposable> AddAssign<D> for CompositeDisposable {
    fn add_assign(&mut self, disposable: D) {
        self.add(disposable);
    }
}

impl<D: Disposable> AddAssign<D> for &CompositeDisposable {
    fn add_assign(&mut self, disposable: D) {
        self.add(disposable);
    }
}

impl fmt::Debug for CompositeDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never block or panic in Debug: the lock may be held elsewhere.
        let len = self.members.try_lock().and_then(|guard| {
            let len = guard.try_borrow().ok().map(|members| members.len());
            len
        });

        f.debug_struct("CompositeDisposable")
            .field("label", &self.label)
            .field("disposed", &self.is_disposed())
            .field("len", &len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disposables::BooleanDisposable;
    use std::sync::Arc;

    #[test]
    fn test_seeded_members_are_not_pruned_at_construction() {
        let stale = Arc::new(BooleanDisposable::disposed());
        let live = Arc::new(BooleanDisposable::new());
        let bag = CompositeDisposable::from_members(vec![stale.clone(), live.clone()]);

        assert_eq!(bag.len(), 2);
        assert_eq!(bag.stats().added, 2);
    }

    #[test]
    fn test_capacity_config_starts_empty() {
        let bag = CompositeDisposable::with_config(CompositeConfig::new().with_capacity(8));
        assert!(bag.is_empty());
        assert!(!bag.is_disposed());
    }

    #[test]
    fn test_debug_output() {
        let bag = CompositeDisposable::with_config(CompositeConfig::new().with_label("ui"));
        bag.add(BooleanDisposable::new());
        let rendered = format!("{:?}", bag);
        assert!(rendered.contains("\"ui\""));
        assert!(rendered.contains("disposed: false"));
        assert!(rendered.contains("len: Some(1)"));
    }

    #[test]
    fn test_without_pruning_keeps_stale_members() {
        let bag = CompositeDisposable::with_config(CompositeConfig::new().without_pruning());
        bag.add(BooleanDisposable::disposed());
        bag.add(BooleanDisposable::new());
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.stats().pruned, 0);
    }

    #[test]
    fn test_add_assign_operator() {
        let flag = Arc::new(BooleanDisposable::new());
        let mut bag = CompositeDisposable::new();
        bag += flag.clone();
        assert_eq!(bag.len(), 1);

        bag.dispose();
        assert!(flag.is_disposed());
    }
}
