//! Glide Core Runtime
//!
//! Foundational primitives shared by the Glide tween engine:
//!
//! - **Lifecycle**: the Idle/Tweening/Paused state machine every tween follows
//! - **Callback Registers**: ordered per-kind callback lists with buffer recycling
//! - **Value Types**: vectors and colors that tweens interpolate
//!
//! # Example
//!
//! ```rust
//! use glide_core::lifecycle::{Lifecycle, LifecycleEvent, TweenState};
//!
//! let mut lifecycle = Lifecycle::new();
//! lifecycle.send(LifecycleEvent::Schedule).unwrap();
//! lifecycle.send(LifecycleEvent::Pause).unwrap();
//! assert_eq!(lifecycle.current_state(), TweenState::Paused);
//!
//! // Paused tweens cannot finish on their own
//! assert!(!lifecycle.can_send(LifecycleEvent::Finish));
//! ```

pub mod callbacks;
pub mod error;
pub mod geometry;
pub mod lifecycle;

pub use callbacks::{CallbackKind, CallbackSet, RegisterPool};
pub use error::{Result, TweenError};
pub use geometry::{Color, Vec2, Vec3, Vec4};
pub use lifecycle::{Lifecycle, LifecycleEvent, TweenId, TweenState};
