//! Glide Animation System
//!
//! Easing curves, pooled tween instances, and a frame-driven scheduler.
//!
//! # Features
//!
//! - **Easing**: 32 named curves plus CSS-style cubic beziers, with analytic slopes
//! - **Tweens**: duration, delay, loops, ping-pong, and per-kind callback lists
//! - **Scheduling**: generational handles, pause/resume/cancel from any callback
//! - **Pooling**: finished instances and callback buffers are recycled
//! - **Value Tweens**: drive floats, vectors and colors through a setter
//!
//! # Example
//!
//! ```rust
//! use glide_animation::{Easing, TweenScheduler};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut scheduler = TweenScheduler::new();
//! let opacity = Rc::new(Cell::new(0.0f32));
//! let target = opacity.clone();
//!
//! scheduler
//!     .value(0.0f32, 1.0, 0.5, move |v| target.set(v))
//!     .ease(Easing::EaseOutQuad)
//!     .start()
//!     .unwrap();
//!
//! while scheduler.tick(1.0 / 60.0) {}
//! assert_eq!(opacity.get(), 1.0);
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod easing;
pub mod pool;
pub mod scheduler;
pub mod tween;
pub mod tweenable;
pub mod value;

pub use builder::TweenBuilder;
pub use config::{ConfigError, SchedulerConfig};
pub use context::{TweenCallback, TweenContext, TweenFrame};
pub use easing::{ease, ease_derivative, Easing};
pub use pool::TweenPool;
pub use scheduler::TweenScheduler;
pub use tween::{FrameTime, TweenConfig, TweenInstance, TweenKind};
pub use tweenable::Tweenable;

pub use glide_core::{
    CallbackKind, Color, LifecycleEvent, Result, TweenError, TweenId, TweenState, Vec2, Vec3, Vec4,
};
