//! Internal implementation details.

pub(crate) mod members;
pub(crate) mod panic_guard;

pub(crate) use members::{partition_disposed, MemberList};
pub(crate) use panic_guard::catch_member;
