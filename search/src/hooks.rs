//! Optional per-run hooks: cooperative cancellation and progress observation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a search and its controller.
///
/// The engine checks the flag once per frontier pop. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Receives search progress events. All methods default to no-ops.
///
/// Observers are side channels: they cannot influence the search.
pub trait SearchObserver<S> {
    /// A non-stale entry was popped and is about to be goal-tested.
    fn on_expand(&mut self, state: &S, g_cost: f64) {
        let _ = (state, g_cost);
    }

    /// A state was discovered or its recorded cost strictly improved.
    fn on_discover(&mut self, state: &S, cost: f64, predecessor: &S) {
        let _ = (state, cost, predecessor);
    }

    /// A stale entry was popped and discarded.
    fn on_stale(&mut self, state: &S, g_cost: f64) {
        let _ = (state, g_cost);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<S> SearchObserver<S> for NoopObserver {}

/// Hooks attached to a single search call.
pub struct SearchHooks<'a, S> {
    pub cancel: Option<&'a CancelToken>,
    pub observer: Option<&'a mut dyn SearchObserver<S>>,
}

impl<S> SearchHooks<'_, S> {
    /// No cancellation, no observer.
    #[must_use]
    pub fn none() -> Self {
        Self {
            cancel: None,
            observer: None,
        }
    }
}

impl<'a, S> SearchHooks<'a, S> {
    #[must_use]
    pub fn with_cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a mut dyn SearchObserver<S>) -> Self {
        self.observer = Some(observer);
        self
    }
}

impl<S> Default for SearchHooks<'_, S> {
    fn default() -> Self {
        Self::none()
    }
}
