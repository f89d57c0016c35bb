//! Basic disposable building blocks.
//!
//! These are the leaf resources most often registered with a
//! [`CompositeDisposable`](crate::CompositeDisposable): a plain flag, a
//! one-shot teardown closure, and an RAII guard.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::traits::Disposable;

/// A disposable that only records whether it has been disposed.
///
/// Useful as a cancellation flag that long-running work polls.
///
/// # Examples
///
/// ```
/// use disposal_composite::{BooleanDisposable, Disposable};
///
/// let flag = BooleanDisposable::new();
/// assert!(!flag.is_disposed());
///
/// flag.dispose();
/// flag.dispose();
/// assert!(flag.is_disposed());
/// ```
#[derive(Debug, Default)]
pub struct BooleanDisposable {
    disposed: AtomicBool,
}

impl BooleanDisposable {
    /// Creates a live flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flag that is already disposed.
    pub fn disposed() -> Self {
        Self { disposed: AtomicBool::new(true) }
    }
}

impl Disposable for BooleanDisposable {
    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

type Action = Box<dyn FnOnce() + Send>;

/// A disposable that runs a teardown closure exactly once.
///
/// The closure runs on the first `dispose` call; later calls do nothing.
/// `is_disposed` turns `true` before the closure starts, so a closure that
/// panics still leaves the disposable marked as disposed.
///
/// # Examples
///
/// ```
/// use disposal_composite::{ActionDisposable, Disposable};
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// let closed = Arc::new(AtomicU32::new(0));
/// let counter = closed.clone();
/// let timer = ActionDisposable::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// timer.dispose();
/// timer.dispose();
/// assert_eq!(closed.load(Ordering::SeqCst), 1);
/// ```
pub struct ActionDisposable {
    disposed: AtomicBool,
    action: Mutex<Option<Action>>,
}

impl ActionDisposable {
    /// Wraps `action` so it runs on the first dispose.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            disposed: AtomicBool::new(false),
            action: Mutex::new(Some(Box::new(action))),
        }
    }
}

impl Disposable for ActionDisposable {
    fn dispose(&self) {
        if self.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Take the closure out so the lock is not held while it runs.
        let action = self.action.lock().take();
        if let Some(action) = action {
            action();
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for ActionDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// RAII wrapper that disposes its contents when dropped.
///
/// A bare [`CompositeDisposable`](crate::CompositeDisposable) leaks its members
/// if it goes out of scope undisposed; wrap it in a guard to tie disposal to
/// a lexical scope instead.
///
/// # Examples
///
/// ```
/// use disposal_composite::{BooleanDisposable, CompositeDisposable, Disposable, DisposeGuard};
/// use std::sync::Arc;
///
/// let flag = Arc::new(BooleanDisposable::new());
/// {
///     let bag = DisposeGuard::new(CompositeDisposable::new());
///     bag.add(flag.clone());
/// }
/// assert!(flag.is_disposed());
/// ```
#[must_use = "dropping the guard disposes its contents immediately"]
pub struct DisposeGuard<D: Disposable> {
    inner: Option<D>,
}

impl<D: Disposable> DisposeGuard<D> {
    pub fn new(inner: D) -> Self {
        Self { inner: Some(inner) }
    }

    /// Defuses the guard and returns the wrapped value undisposed.
    pub fn into_inner(mut self) -> D {
        match self.inner.take() {
            Some(inner) => inner,
            None => unreachable!("guard contents are only taken by into_inner or drop"),
        }
    }
}

impl<D: Disposable> std::ops::Deref for DisposeGuard<D> {
    type Target = D;

    fn deref(&self) -> &D {
        match &self.inner {
            Some(inner) => inner,
            None => unreachable!("guard contents are only taken by into_inner or drop"),
        }
    }
}

impl<D: Disposable> Drop for DisposeGuard<D> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.dispose();
        }
    }
}

impl<D: Disposable + fmt::Debug> fmt::Debug for DisposeGuard<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DisposeGuard").field(&self.inner).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    #[test]
    fn test_boolean_disposed_constructor() {
        assert!(BooleanDisposable::disposed().is_disposed());
        assert!(!BooleanDisposable::new().is_disposed());
    }

    #[test]
    fn test_action_runs_once_across_threads() {
        let runs = Arc::new(AtomicU32::new(0));
        let counter = runs.clone();
        let action = Arc::new(ActionDisposable::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let action = action.clone();
                std::thread::spawn(move || action.dispose())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(action.is_disposed());
    }

    #[test]
    fn test_guard_into_inner_defuses() {
        let flag = Arc::new(BooleanDisposable::new());
        let guard = DisposeGuard::new(flag.clone());
        let inner = guard.into_inner();
        assert!(!inner.is_disposed());
        assert!(!flag.is_disposed());
    }

    #[test]
    fn test_guard_disposes_on_drop() {
        let flag = Arc::new(BooleanDisposable::new());
        drop(DisposeGuard::new(flag.clone()));
        assert!(flag.is_disposed());
    }
}
