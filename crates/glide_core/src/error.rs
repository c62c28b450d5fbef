//! Tween error types

use thiserror::Error;

use crate::lifecycle::{LifecycleEvent, TweenState};

/// Errors raised by misuse of the tween lifecycle.
///
/// These signal a defect in the calling code (usually an adapter), not a
/// runtime condition worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Duration must be finite and strictly positive
    #[error("invalid tween duration {0}: must be finite and greater than zero")]
    InvalidDuration(f32),

    /// Delay must be finite and not negative
    #[error("invalid tween delay {0}: must be finite and not negative")]
    InvalidDelay(f32),

    /// Configuration attempted while the tween is scheduled
    #[error("tween must be idle to be configured (currently {0:?})")]
    NotIdle(TweenState),

    /// The lifecycle table has no edge for this event
    #[error("cannot {event:?} a tween that is {state:?}")]
    InvalidTransition {
        state: TweenState,
        event: LifecycleEvent,
    },

    /// Handle does not address a live tween (finished, recycled or never issued)
    #[error("unknown or expired tween handle")]
    UnknownTween,
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;
