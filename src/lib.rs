//! # disposal-composite
//!
//! Thread-safe lifetime management for cancellable resources: register
//! subscriptions, timers, and other handles with a [`CompositeDisposable`] and
//! release them all together, exactly once.
//!
//! ## Features
//!
//! - **Exactly-once release**: the first `dispose` drains and disposes every member
//! - **No leaks on late registration**: anything added after disposal is disposed immediately
//! - **Reentrant**: a member's teardown may call back into the same composite
//! - **Composable**: a composite is itself [`Disposable`], so composites nest
//! - **Panic isolation**: one failing member never stops the others from being released
//!
//! ## Quick Start
//!
//! ```rust
//! use disposal_composite::{ActionDisposable, BooleanDisposable, CompositeDisposable, Disposable};
//! use std::sync::Arc;
//!
//! let session = CompositeDisposable::new();
//!
//! let heartbeat = Arc::new(BooleanDisposable::new());
//! session.add(heartbeat.clone());
//! session.add(ActionDisposable::new(|| println!("socket closed")));
//!
//! // Nested composites are disposed with their parent.
//! let request = Arc::new(CompositeDisposable::new());
//! session.add(request.clone());
//!
//! session.dispose();
//! assert!(heartbeat.is_disposed());
//! assert!(request.is_disposed());
//! ```
//!
//! ## Threading
//!
//! ```rust
//! use disposal_composite::{BooleanDisposable, CompositeDisposable, Disposable};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let bag = Arc::new(CompositeDisposable::new());
//! let flags: Vec<_> = (0..4).map(|_| Arc::new(BooleanDisposable::new())).collect();
//!
//! let handles: Vec<_> = flags
//!     .iter()
//!     .cloned()
//!     .map(|flag| {
//!         let bag = bag.clone();
//!         thread::spawn(move || bag.add(flag))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! bag.dispose();
//! assert!(flags.iter().all(|flag| flag.is_disposed()));
//! ```

// Module declarations
pub mod composite;
pub mod config;
pub mod disposables;
pub mod error;
pub mod metrics;
pub mod traits;

// Internal modules
mod internal;

// Re-export core types
pub use composite::CompositeDisposable;
pub use config::CompositeConfig;
pub use disposables::{ActionDisposable, BooleanDisposable, DisposeGuard};
pub use error::{DisposeError, DisposeResult};
pub use metrics::CompositeStats;
pub use traits::Disposable;
