/// Property-based tests for composite disposal
///
/// These tests use proptest to generate random operation sequences and verify
/// the invariants that must hold for all of them.

use disposal_composite::{CompositeDisposable, Disposable};
use proptest::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Counted {
    calls: AtomicU32,
}

impl Disposable for Counted {
    fn dispose(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.calls.load(Ordering::SeqCst) > 0
    }
}

#[derive(Debug, Clone)]
enum Op {
    /// Register a fresh resource
    Add,
    /// Dispose a previously registered resource directly (by index, wrapped)
    ExternalDispose(usize),
    /// Dispose the composite
    Dispose,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => Just(Op::Add),
        2 => (0usize..64).prop_map(Op::ExternalDispose),
        1 => Just(Op::Dispose),
    ]
}

proptest! {
    #[test]
    fn every_resource_added_before_dispose_is_released_once(n in 0usize..50) {
        let bag = CompositeDisposable::new();
        let resources: Vec<_> = (0..n).map(|_| Arc::new(Counted::default())).collect();
        for resource in &resources {
            bag.add(resource.clone());
        }

        bag.dispose();
        bag.dispose();

        prop_assert!(bag.is_empty());
        for resource in &resources {
            prop_assert_eq!(resource.calls.load(Ordering::SeqCst), 1);
        }
    }
}

proptest! {
    #[test]
    fn no_resource_is_ever_leaked(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let bag = CompositeDisposable::new();
        let mut resources: Vec<Arc<Counted>> = Vec::new();

        for op in ops {
            match op {
                Op::Add => {
                    let resource = Arc::new(Counted::default());
                    bag.add(resource.clone());
                    if bag.is_disposed() {
                        // Forwarded synchronously.
                        prop_assert_eq!(resource.calls.load(Ordering::SeqCst), 1);
                    }
                    resources.push(resource);
                }
                Op::ExternalDispose(index) => {
                    if !resources.is_empty() {
                        let index = index % resources.len();
                        resources[index].dispose();
                    }
                }
                Op::Dispose => {
                    bag.dispose();
                    prop_assert!(bag.is_empty());
                }
            }
            if bag.is_disposed() {
                prop_assert_eq!(bag.len(), 0);
            }
        }

        bag.dispose();

        let stats = bag.stats();
        prop_assert_eq!(stats.added + stats.late_disposed, resources.len() as u64);

        for resource in &resources {
            prop_assert!(resource.is_disposed());
        }
    }
}

proptest! {
    #[test]
    fn len_tracks_live_members_with_pruning(flags in prop::collection::vec(any::<bool>(), 1..40)) {
        let bag = CompositeDisposable::new();
        let mut resources = Vec::new();

        for already_done in &flags {
            let resource = Arc::new(Counted::default());
            if *already_done {
                resource.dispose();
            }
            bag.add(resource.clone());
            resources.push(resource);
        }

        // Pruning runs on every add, so only live members remain.
        let live = flags.iter().filter(|done| !**done).count();
        prop_assert_eq!(bag.len(), live);
    }
}
