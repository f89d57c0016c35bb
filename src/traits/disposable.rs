//! The disposable capability shared by every resource the composite manages.

use std::sync::Arc;

/// A releasable resource.
///
/// Implement this trait for anything that holds a cancellable handle: stream
/// subscriptions, timers, background workers, or another
/// [`CompositeDisposable`](crate::CompositeDisposable).
///
/// `dispose` must be idempotent: calling it on an already disposed value is a
/// no-op. `is_disposed` must report `true` permanently once `dispose` has run.
///
/// # Examples
///
/// ```
/// use disposal_composite::{CompositeDisposable, Disposable};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// struct Subscription {
///     closed: AtomicBool,
/// }
///
/// impl Disposable for Subscription {
///     fn dispose(&self) {
///         if !self.closed.swap(true, Ordering::AcqRel) {
///             println!("unsubscribed");
///         }
///     }
///
///     fn is_disposed(&self) -> bool {
///         self.closed.load(Ordering::Acquire)
///     }
/// }
///
/// let subscription = Arc::new(Subscription { closed: AtomicBool::new(false) });
/// let bag = CompositeDisposable::new();
/// bag.add(subscription.clone());
///
/// bag.dispose();
/// assert!(subscription.is_disposed());
/// ```
pub trait Disposable: Send + Sync + 'static {
    /// Release the underlying resource.
    fn dispose(&self);

    /// Whether `dispose` has already run.
    fn is_disposed(&self) -> bool;
}

impl<T: Disposable + ?Sized> Disposable for Arc<T> {
    fn dispose(&self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}

impl<T: Disposable + ?Sized> Disposable for Box<T> {
    fn dispose(&self) {
        (**self).dispose();
    }

    fn is_disposed(&self) -> bool {
        (**self).is_disposed()
    }
}
