//! Panic isolation for member disposal.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::DisposeError;
use crate::traits::Disposable;

/// Render a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

/// Dispose one member, converting a panic into a [`DisposeError`].
pub(crate) fn catch_member(index: usize, member: &dyn Disposable) -> Result<(), DisposeError> {
    panic::catch_unwind(AssertUnwindSafe(|| member.dispose())).map_err(|payload| {
        DisposeError::MemberPanicked {
            index,
            message: panic_message(payload.as_ref()),
        }
    })
}
