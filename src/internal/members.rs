//! Internal member sequence for the composite disposable.

use crate::traits::Disposable;

/// Ordered sequence of registered disposables.
///
/// Only ever touched while the owning composite's lock is held.
#[derive(Default)]
pub(crate) struct MemberList {
    items: Vec<Box<dyn Disposable>>,
}

impl MemberList {
    /// Create a list with room for `capacity` members.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    /// Append a member at the end (insertion order).
    pub(crate) fn push(&mut self, member: Box<dyn Disposable>) {
        self.items.push(member);
    }

    /// Put `kept` back at the front, ahead of anything pushed since it was
    /// taken out.
    pub(crate) fn restore(&mut self, mut kept: Vec<Box<dyn Disposable>>) {
        kept.append(&mut self.items);
        self.items = kept;
    }

    /// Move all members out, leaving the list empty.
    pub(crate) fn take(&mut self) -> Vec<Box<dyn Disposable>> {
        std::mem::take(&mut self.items)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split members into `(live, already disposed)`, keeping relative order.
pub(crate) fn partition_disposed(
    members: Vec<Box<dyn Disposable>>,
) -> (Vec<Box<dyn Disposable>>, Vec<Box<dyn Disposable>>) {
    members.into_iter().partition(|member| !member.is_disposed())
}

impl FromIterator<Box<dyn Disposable>> for MemberList {
    fn from_iter<I: IntoIterator<Item = Box<dyn Disposable>>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disposables::BooleanDisposable;
    use std::sync::Arc;

    #[test]
    fn test_partition_keeps_live_members_in_order() {
        let a = Arc::new(BooleanDisposable::new());
        let b = Arc::new(BooleanDisposable::new());
        let c = Arc::new(BooleanDisposable::new());

        let mut list = MemberList::default();
        list.push(Box::new(a.clone()));
        list.push(Box::new(b.clone()));
        list.push(Box::new(c.clone()));

        b.dispose();
        let (kept, pruned) = partition_disposed(list.take());
        assert!(list.is_empty());
        assert_eq!(kept.len(), 2);
        assert_eq!(pruned.len(), 1);

        a.dispose();
        assert!(kept[0].is_disposed());
        assert!(!kept[1].is_disposed());
    }

    #[test]
    fn test_restore_puts_kept_ahead_of_new_members() {
        let first = Arc::new(BooleanDisposable::new());
        let later = Arc::new(BooleanDisposable::new());

        let mut list = MemberList::default();
        list.push(Box::new(first.clone()));
        let kept = list.take();

        list.push(Box::new(later.clone()));
        list.restore(kept);
        assert_eq!(list.len(), 2);

        first.dispose();
        let drained = list.take();
        assert!(drained[0].is_disposed());
        assert!(!drained[1].is_disposed());
    }
}
