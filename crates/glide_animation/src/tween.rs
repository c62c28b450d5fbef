//! Tween instances
//!
//! A [`TweenInstance`] holds one run's timing, loop counters, easing and
//! callback lists. It never invokes its own callbacks: the scheduler steps it
//! with [`TweenInstance::begin_step`], [`TweenInstance::accrue`] and
//! [`TweenInstance::resolve_boundary`], running the matching callback list
//! between each phase.
//!
//! # Loop contract
//!
//! With `loops = N` and no ping-pong, a run is N segments: `LoopReset` fires
//! at the N-1 inner boundaries and the run finishes at the end of segment N.
//!
//! With ping-pong, every segment boundary flips direction and a forward plus
//! backward pair counts as one loop, so a run is 2N segments (2N-1
//! `LoopReset`s). `ping_pong_count` reaches N exactly when the run finishes.
//! Ping-pong without loops is a single segment.
//!
//! `Complete` fires once when the run finishes, and additionally at every
//! loop boundary (after each full pair when ping-ponging) if
//! `repeat_on_complete_each_loop` is set.

use glide_core::{
    CallbackKind, CallbackSet, Lifecycle, Result, TweenError, TweenState,
};
use serde::{Deserialize, Serialize};

use crate::context::TweenCallback;
use crate::easing::Easing;

/// Adapter kind an instance was acquired for; pooled instances are only
/// handed back to the same kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenKind {
    /// No value of its own (callback-only tweens)
    Generic,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Color,
    /// Delayed call
    Delay,
    /// Adapter-defined kind
    Custom(u32),
}

/// Clock deltas for one host frame, in seconds
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Delta from the (possibly time-scaled) game clock
    pub delta: f32,
    /// Delta from the real-time clock
    pub unscaled_delta: f32,
}

impl FrameTime {
    pub const fn new(delta: f32, unscaled_delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta,
        }
    }

    /// Same delta for both clocks
    pub const fn uniform(delta: f32) -> Self {
        Self::new(delta, delta)
    }

    pub fn delta_for(&self, unscaled_clock: bool) -> f32 {
        if unscaled_clock {
            self.unscaled_delta
        } else {
            self.delta
        }
    }
}

/// Static parameters of a tween run
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenConfig {
    /// Seconds per segment
    pub duration: f32,
    #[serde(default)]
    pub ease: Easing,
    /// 0 = play once
    #[serde(default)]
    pub loops: u32,
    #[serde(default)]
    pub ping_pong: bool,
    /// Seconds to wait before the first segment
    #[serde(default)]
    pub delay: f32,
    #[serde(default)]
    pub unscaled_clock: bool,
    #[serde(default)]
    pub repeat_on_complete_each_loop: bool,
}

impl TweenConfig {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            ease: Easing::Linear,
            loops: 0,
            ping_pong: false,
            delay: 0.0,
            unscaled_clock: false,
            repeat_on_complete_each_loop: false,
        }
    }

    pub fn with_ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_loops(mut self, loops: u32) -> Self {
        self.loops = loops;
        self
    }

    pub fn with_ping_pong(mut self, ping_pong: bool) -> Self {
        self.ping_pong = ping_pong;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_unscaled_clock(mut self, unscaled_clock: bool) -> Self {
        self.unscaled_clock = unscaled_clock;
        self
    }

    pub fn with_repeat_on_complete(mut self, repeat: bool) -> Self {
        self.repeat_on_complete_each_loop = repeat;
        self
    }

    /// Reject durations and delays that would stall or corrupt a run
    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(TweenError::InvalidDuration(self.duration));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(TweenError::InvalidDelay(self.delay));
        }
        Ok(())
    }
}

/// What the scheduler should do after the delay gate
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Gate {
    /// Not tweening, or still waiting out the delay
    Hold,
    /// Advance by `dt`; `first` is set on the first active step of the run
    Run { dt: f32, first: bool },
}

/// Outcome of reaching the end of a segment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// Elapsed time was reset for another segment
    Loop { complete: bool },
    /// The run is over
    Finish,
}

/// One scheduled interpolation
#[derive(Debug)]
pub struct TweenInstance {
    pub(crate) id: u32,
    kind: TweenKind,
    pub(crate) lifecycle: Lifecycle,
    duration: f32,
    elapsed: f32,
    delay_remaining: f32,
    ease: Easing,
    loop_target: u32,
    loop_count: u32,
    ping_pong: bool,
    ping_pong_count: u32,
    repeat_on_complete: bool,
    unscaled_clock: bool,
    started: bool,
    pub(crate) callbacks: CallbackSet<TweenCallback>,
}

impl TweenInstance {
    pub(crate) fn new(kind: TweenKind, callbacks: CallbackSet<TweenCallback>) -> Self {
        Self {
            id: 0,
            kind,
            lifecycle: Lifecycle::new(),
            duration: 0.0,
            elapsed: 0.0,
            delay_remaining: 0.0,
            ease: Easing::Linear,
            loop_target: 0,
            loop_count: 0,
            ping_pong: false,
            ping_pong_count: 0,
            repeat_on_complete: false,
            unscaled_clock: false,
            started: false,
            callbacks,
        }
    }

    /// Apply static parameters; only legal while Idle
    pub(crate) fn configure(&mut self, config: &TweenConfig) -> Result<()> {
        let state = self.state();
        if state != TweenState::Idle {
            return Err(TweenError::NotIdle(state));
        }
        config.validate()?;

        self.duration = config.duration;
        self.ease = config.ease;
        self.loop_target = config.loops;
        self.ping_pong = config.ping_pong;
        self.delay_remaining = config.delay;
        self.unscaled_clock = config.unscaled_clock;
        self.repeat_on_complete = config.repeat_on_complete_each_loop;
        Ok(())
    }

    /// Back to pristine Idle for pooling; keeps `id`, `kind` and buffers
    pub(crate) fn reset(&mut self, default_ease: Easing) {
        self.lifecycle.reset();
        self.duration = 0.0;
        self.elapsed = 0.0;
        self.delay_remaining = 0.0;
        self.ease = default_ease;
        self.loop_target = 0;
        self.loop_count = 0;
        self.ping_pong = false;
        self.ping_pong_count = 0;
        self.repeat_on_complete = false;
        self.unscaled_clock = false;
        self.started = false;
        self.callbacks.clear();
    }

    pub(crate) fn into_callbacks(self) -> CallbackSet<TweenCallback> {
        self.callbacks
    }

    /// Delay handling and the once-per-run start flag
    pub(crate) fn begin_step(&mut self, time: FrameTime) -> Gate {
        if !self.lifecycle.is_in(TweenState::Tweening) {
            return Gate::Hold;
        }
        let dt = time.delta_for(self.unscaled_clock);
        if self.delay_remaining > 0.0 {
            self.delay_remaining = (self.delay_remaining - dt).max(0.0);
            return Gate::Hold;
        }
        let first = !self.started;
        self.started = true;
        Gate::Run { dt, first }
    }

    /// Add `dt` to elapsed; returns whether the segment end was reached
    pub(crate) fn accrue(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.duration
    }

    /// Whether elapsed already sits at the segment end, as after a pause
    /// taken inside the final Tick
    pub(crate) fn at_segment_end(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Update counters at a segment end
    pub(crate) fn resolve_boundary(&mut self) -> Boundary {
        if self.loop_target == 0 {
            return Boundary::Finish;
        }
        self.loop_count += 1;

        if !self.ping_pong {
            if self.loop_count < self.loop_target {
                self.elapsed = 0.0;
                return Boundary::Loop {
                    complete: self.repeat_on_complete,
                };
            }
            return Boundary::Finish;
        }

        // Forward half done; play it back
        if self.loop_count < 2 {
            self.elapsed = 0.0;
            return Boundary::Loop { complete: false };
        }

        self.loop_count = 0;
        self.ping_pong_count += 1;
        if self.ping_pong_count < self.loop_target {
            self.elapsed = 0.0;
            Boundary::Loop {
                complete: self.repeat_on_complete,
            }
        } else {
            Boundary::Finish
        }
    }

    /// Custom id (reassigned when acquired from the pool)
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> TweenKind {
        self.kind
    }

    pub fn state(&self) -> TweenState {
        self.lifecycle.current_state()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Fraction of the current segment, clamped to 1.0
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            0.0
        }
    }

    pub fn delay_remaining(&self) -> f32 {
        self.delay_remaining
    }

    pub fn ease(&self) -> Easing {
        self.ease
    }

    pub fn loop_target(&self) -> u32 {
        self.loop_target
    }

    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn ping_pong(&self) -> bool {
        self.ping_pong
    }

    pub fn ping_pong_count(&self) -> u32 {
        self.ping_pong_count
    }

    /// Whether the current segment plays backwards
    pub fn is_reversed(&self) -> bool {
        self.ping_pong && self.loop_count % 2 == 1
    }

    pub fn repeat_on_complete_each_loop(&self) -> bool {
        self.repeat_on_complete
    }

    pub fn unscaled_clock(&self) -> bool {
        self.unscaled_clock
    }

    /// Whether the run got past its delay
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn callback_count(&self, kind: CallbackKind) -> usize {
        self.callbacks.len(kind)
    }
}
