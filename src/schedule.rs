//! Opt-in render coalescing.
//!
//! The core render path is synchronous. Widgets that receive bursts of input
//! (typeahead filters, resize handles) can hold a [`RenderDebouncer`]: each
//! `trigger` supersedes the previous one, and only the last trigger in a burst
//! resolves to `true` once the delay has elapsed.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

/// Trailing-edge debouncer built on `tokio::time`.
#[derive(Debug, Clone)]
pub struct RenderDebouncer {
    delay: Duration,
    generation: Rc<Cell<u64>>,
}

impl RenderDebouncer {
    /// A debouncer that waits `delay` before confirming a render.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start a new wait. The future resolves to `true` if no later `trigger`
    /// or `cancel` happened before the delay elapsed.
    pub fn trigger(&self) -> impl Future<Output = bool> + 'static {
        let ticket = self.bump();
        let generation = Rc::clone(&self.generation);
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            let current = generation.get() == ticket;
            trace!(ticket, current, "debounce elapsed");
            current
        }
    }

    /// Invalidate every pending trigger.
    pub fn cancel(&self) {
        self.bump();
    }

    fn bump(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }
}

impl Default for RenderDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}
