//! Error types for composite disposal.

use std::fmt;

/// Disposal errors
///
/// Disposal itself never fails: [`CompositeDisposable::dispose`](crate::CompositeDisposable::dispose)
/// always attempts every member. These errors only describe members whose own
/// `dispose` panicked, and are surfaced by
/// [`CompositeDisposable::try_dispose`](crate::CompositeDisposable::try_dispose).
///
/// # Examples
///
/// ```rust
/// use disposal_composite::DisposeError;
///
/// let panicked = DisposeError::MemberPanicked {
///     index: 2,
///     message: "socket already closed".to_string(),
/// };
/// assert_eq!(panicked.to_string(), "Member 2 panicked during dispose: socket already closed");
///
/// let multiple = DisposeError::Multiple(vec![panicked.clone(), panicked]);
/// assert_eq!(multiple.failure_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisposeError {
    /// A member panicked while being disposed (position in the drained sequence)
    MemberPanicked {
        /// Index of the member in insertion order
        index: usize,
        /// Panic payload rendered as text
        message: String,
    },
    /// More than one member panicked during the same dispose call
    Multiple(Vec<DisposeError>),
}

impl DisposeError {
    /// Collapse a list of failures into a single error, if there are any.
    pub(crate) fn from_failures(mut failures: Vec<DisposeError>) -> Option<Self> {
        match failures.len() {
            0 => None,
            1 => failures.pop(),
            _ => Some(DisposeError::Multiple(failures)),
        }
    }

    /// Number of member failures this error describes.
    pub fn failure_count(&self) -> usize {
        match self {
            DisposeError::MemberPanicked { .. } => 1,
            DisposeError::Multiple(errors) => errors.iter().map(DisposeError::failure_count).sum(),
        }
    }
}

impl fmt::Display for DisposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisposeError::MemberPanicked { index, message } => {
                write!(f, "Member {} panicked during dispose: {}", index, message)
            }
            DisposeError::Multiple(errors) => {
                write!(f, "{} members panicked during dispose", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DisposeError {}

/// Result type for disposal operations
pub type DisposeResult<T> = Result<T, DisposeError>;
