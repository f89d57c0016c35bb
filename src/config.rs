//! Construction options for [`CompositeDisposable`](crate::CompositeDisposable).
//!
//! With the `config` feature enabled, [`CompositeConfig`] can be loaded from
//! JSON (or any serde format) so that long-lived aggregators can be tuned
//! without code changes.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// Options for building a composite disposable.
///
/// # Examples
///
/// ```
/// use disposal_composite::{CompositeConfig, CompositeDisposable};
///
/// let config = CompositeConfig::new()
///     .with_label("http-session")
///     .with_capacity(16);
///
/// let bag = CompositeDisposable::with_config(config);
/// assert_eq!(bag.label(), Some("http-session"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CompositeConfig {
    /// Name used in tracing output and `Debug`
    pub label: Option<String>,
    /// Initial capacity of the member sequence
    pub capacity: usize,
    /// Remove already disposed members on every `add`
    pub prune_on_add: bool,
    /// Catch panics from member `dispose` calls and keep going
    pub catch_panics: bool,
}

impl CompositeConfig {
    /// Default options: no label, no preallocation, pruning and panic
    /// isolation enabled.
    pub fn new() -> Self {
        Self {
            label: None,
            capacity: 0,
            prune_on_add: true,
            catch_panics: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Disable housekeeping on `add`. Stale members then stay until `dispose`.
    pub fn without_pruning(mut self) -> Self {
        self.prune_on_add = false;
        self
    }

    /// Let a panicking member abort `dispose`.
    ///
    /// The composite is still marked disposed and drained before the panic
    /// propagates; members after the failing one are dropped undisposed.
    pub fn propagate_panics(mut self) -> Self {
        self.catch_panics = false;
        self
    }

    /// Parse options from JSON. Missing fields take their defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self::new()
    }
}
