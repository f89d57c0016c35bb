//! Core traits for disposable resources.

mod disposable;

pub use disposable::Disposable;
