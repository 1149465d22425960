//! Dependency cycle detection for factory invocation.
//!
//! Resolution recurses through the container whenever a resolved service has
//! injected dependencies of its own. A thread-local stack of the types
//! currently being constructed turns a revisit into `DiError::Circular` with
//! the full path, and an explicit depth bound turns runaway graphs into
//! `DiError::DepthExceeded` instead of a stack overflow.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

const MAX_DEPTH: usize = 256;

thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
}

struct StackGuard;

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Runs `f` with `name` pushed on the resolution stack.
///
/// Errors out before running `f` when `name` is already on the stack or the
/// depth bound is hit. The guard pops on every exit path, including `?`.
pub(crate) fn with_resolution_scope<T, F>(name: &'static str, f: F) -> DiResult<T>
where
    F: FnOnce() -> DiResult<T>,
{
    let blocked = RESOLUTION_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        if stack.iter().any(|&entry| entry == name) {
            let mut path = stack.clone();
            path.push(name);
            return Some(DiError::Circular(path));
        }
        if stack.len() >= MAX_DEPTH {
            return Some(DiError::DepthExceeded(stack.len()));
        }
        stack.push(name);
        None
    });
    if let Some(err) = blocked {
        return Err(err);
    }
    let _guard = StackGuard;
    f()
}
