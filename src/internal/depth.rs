//! Opt-in resolution depth guard.

use std::cell::Cell;

use crate::error::{DiError, DiResult};

// Nested resolve calls on this thread, counted only while a limit is configured
thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Guard for one level of nested resolution.
///
/// Without a limit the guard does nothing, so cyclic constructor graphs
/// recurse until the stack is exhausted.
pub(crate) struct DepthGuard {
    counted: bool,
}

impl DepthGuard {
    pub(crate) fn enter(limit: Option<usize>) -> DiResult<Self> {
        let Some(limit) = limit else {
            return Ok(Self { counted: false });
        };
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= limit {
                return Err(DiError::DepthExceeded(limit));
            }
            depth.set(current + 1);
            Ok(Self { counted: true })
        })
    }

    #[cfg(test)]
    pub(crate) fn current() -> usize {
        DEPTH.with(Cell::get)
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        if self.counted {
            DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_guard_does_not_count() {
        let _a = DepthGuard::enter(None).unwrap();
        assert_eq!(DepthGuard::current(), 0);
    }

    #[test]
    fn limit_is_enforced_and_released() {
        {
            let _a = DepthGuard::enter(Some(2)).unwrap();
            let _b = DepthGuard::enter(Some(2)).unwrap();
            assert_eq!(DepthGuard::current(), 2);
            assert_eq!(DepthGuard::enter(Some(2)).err(), Some(DiError::DepthExceeded(2)));
        }
        assert_eq!(DepthGuard::current(), 0);
    }
}
