//! Liveness handle for in-flight load sequences.
//!
//! A loader belongs to a view for the view's lifetime. When the view is
//! torn down while a load sequence is still running, the sequence must not
//! mutate state that no longer has an owner. The loader checks a shared
//! [`Liveness`] handle before every state transition; `close()` flips it
//! once and permanently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag marking whether the owning view is still alive.
///
/// Clones observe the same underlying flag.
#[derive(Debug, Clone)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    pub fn new() -> Self {
        Self { alive: Arc::new(AtomicBool::new(true)) }
    }

    /// Whether state transitions are still permitted.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the owner as torn down. Irreversible.
    pub fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_alive_and_closes_once() {
        let liveness = Liveness::new();
        assert!(liveness.is_alive());

        let observer = liveness.clone();
        liveness.close();
        assert!(!liveness.is_alive());
        assert!(!observer.is_alive());

        // Closing again is harmless.
        observer.close();
        assert!(!liveness.is_alive());
    }
}
