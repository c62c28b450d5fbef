//! Tween Lifecycle
//!
//! Flat state machine for a single tween instance:
//!
//! ```text
//!           Schedule             Pause
//!   Idle ─────────────▶ Tweening ─────▶ Paused
//!    ▲                   │  ▲    Resume   │
//!    │   Finish/Cancel   │  └─────────────┤
//!    ├───────────────────┘                │
//!    └────────────── Cancel ──────────────┘
//! ```
//!
//! The table is static; there are no guards or actions. Callbacks belong to
//! the scheduler, which decides what runs around each transition.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::{Result, TweenError};

new_key_type! {
    /// Handle to a tween owned by a scheduler.
    ///
    /// Handles are generational: once a run ends, its handle never addresses
    /// the recycled instance again.
    pub struct TweenId;
}

/// Lifecycle state of a tween instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TweenState {
    /// Not scheduled; freshly acquired, pooled, or finished
    #[default]
    Idle,
    /// Scheduled and advancing every tick
    Tweening,
    /// Scheduled but frozen
    Paused,
}

impl TweenState {
    /// Whether the instance is held by the active or paused collection
    pub fn is_scheduled(self) -> bool {
        !matches!(self, TweenState::Idle)
    }
}

/// Events that drive lifecycle transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Schedule,
    Pause,
    Resume,
    /// Natural end of the last loop
    Finish,
    Cancel,
}

/// A transition in the lifecycle table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: TweenState,
    pub event: LifecycleEvent,
    pub to_state: TweenState,
}

impl Transition {
    pub const fn new(from: TweenState, event: LifecycleEvent, to: TweenState) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Every legal lifecycle edge
pub const TRANSITIONS: [Transition; 6] = [
    Transition::new(TweenState::Idle, LifecycleEvent::Schedule, TweenState::Tweening),
    Transition::new(TweenState::Tweening, LifecycleEvent::Pause, TweenState::Paused),
    Transition::new(TweenState::Paused, LifecycleEvent::Resume, TweenState::Tweening),
    Transition::new(TweenState::Tweening, LifecycleEvent::Finish, TweenState::Idle),
    Transition::new(TweenState::Tweening, LifecycleEvent::Cancel, TweenState::Idle),
    Transition::new(TweenState::Paused, LifecycleEvent::Cancel, TweenState::Idle),
];

/// Look up the target state for `event` from `state`
pub fn next_state(state: TweenState, event: LifecycleEvent) -> Option<TweenState> {
    TRANSITIONS
        .iter()
        .find(|t| t.from_state == state && t.event == event)
        .map(|t| t.to_state)
}

/// Current position of one instance in the lifecycle table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
    current_state: TweenState,
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            current_state: TweenState::Idle,
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> TweenState {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: TweenState) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: LifecycleEvent) -> bool {
        next_state(self.current_state, event).is_some()
    }

    /// Apply an event, failing without side effects if the edge does not exist
    pub fn send(&mut self, event: LifecycleEvent) -> Result<TweenState> {
        let state = self.current_state;
        let to_state = next_state(state, event)
            .ok_or(TweenError::InvalidTransition { state, event })?;
        self.current_state = to_state;
        Ok(to_state)
    }

    /// Force back to Idle (pool recycling)
    pub fn reset(&mut self) {
        self.current_state = TweenState::Idle;
    }
}
