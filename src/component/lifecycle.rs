//! Instance lifecycle: constructed, attached, initialized, detached.
//!
//! [`Lifecycle`] only tracks state. The owning instance decides what each
//! transition does (backfill, render, silence).

use std::fmt;

/// Where an instance is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Built, never attached. Writes update values but never render.
    #[default]
    Constructed,
    /// Attached; the attach sequence is running.
    Attached,
    /// Attached and rendering on change.
    Initialized,
    /// Removed from a connected tree; silent until re-attached.
    Detached,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Constructed => "constructed",
            LifecycleState::Attached => "attached",
            LifecycleState::Initialized => "initialized",
            LifecycleState::Detached => "detached",
        };
        f.write_str(name)
    }
}

/// State machine for one instance.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: LifecycleState,
    attach_count: usize,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether renders are live.
    pub fn is_initialized(&self) -> bool {
        self.state == LifecycleState::Initialized
    }

    /// Attached or initialized.
    pub fn is_connected(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Attached | LifecycleState::Initialized
        )
    }

    /// Number of times the attach sequence has started.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Start the attach sequence.
    ///
    /// Returns `false` (no transition) when already connected.
    pub fn attach(&mut self) -> bool {
        if self.is_connected() {
            return false;
        }
        self.state = LifecycleState::Attached;
        self.attach_count += 1;
        true
    }

    /// Finish the attach sequence. Only valid from `Attached`.
    pub fn initialize(&mut self) -> bool {
        if self.state != LifecycleState::Attached {
            return false;
        }
        self.state = LifecycleState::Initialized;
        true
    }

    /// Leave the tree. Returns `false` when not connected.
    pub fn detach(&mut self) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.state = LifecycleState::Detached;
        true
    }
}
