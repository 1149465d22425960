//! Internal support modules.

mod cycle;

pub(crate) use cycle::with_resolution_scope;
