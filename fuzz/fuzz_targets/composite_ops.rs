#![no_main]

use disposal_composite::{CompositeDisposable, Disposable};
use libfuzzer_sys::fuzz_target;
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

fuzz_target!(|data: &[u8]| {
    let bag = CompositeDisposable::new();
    let mut resources: Vec<Arc<Counted>> = Vec::new();

    // Each byte is one operation: low two bits pick the op, the rest an index.
    for byte in data {
        match byte % 4 {
            0 | 1 => {
                let resource = Arc::new(Counted::default());
                bag.add(resource.clone());
                resources.push(resource);
            }
            2 => {
                if !resources.is_empty() {
                    let index = (*byte as usize >> 2) % resources.len();
                    resources[index].dispose();
                }
            }
            _ => bag.dispose(),
        }

        if bag.is_disposed() {
            assert!(bag.is_empty());
        }
    }

    bag.dispose();
    for resource in &resources {
        assert!(resource.is_disposed());
    }
});
