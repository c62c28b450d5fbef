//! Callback context
//!
//! Every tween callback receives a [`TweenContext`]: a snapshot of the tween
//! that is running plus mutable access to the scheduler, so callbacks can
//! schedule, pause, resume or cancel tweens (including their own) while the
//! scheduler is in the middle of a tick.

use glide_core::TweenId;

use crate::easing::Easing;
use crate::scheduler::TweenScheduler;
use crate::tween::{TweenInstance, TweenKind};
use crate::tweenable::Tweenable;

/// Boxed tween callback
pub type TweenCallback = Box<dyn FnMut(&mut TweenContext<'_>)>;

/// State of the running tween at the moment its callback list started
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenFrame {
    pub handle: TweenId,
    pub id: u32,
    pub kind: TweenKind,
    /// Clamped segment fraction (0.0 to 1.0)
    pub progress: f32,
    pub elapsed: f32,
    pub duration: f32,
    /// Clock delta applied this tick (0.0 outside a tick)
    pub delta: f32,
    pub ease: Easing,
    pub loop_count: u32,
    pub ping_pong: bool,
    pub ping_pong_count: u32,
    pub reversed: bool,
}

impl TweenFrame {
    pub(crate) fn capture(handle: TweenId, tween: &TweenInstance, delta: f32) -> Self {
        Self {
            handle,
            id: tween.id(),
            kind: tween.kind(),
            progress: tween.progress(),
            elapsed: tween.elapsed(),
            duration: tween.duration(),
            delta,
            ease: tween.ease(),
            loop_count: tween.loop_count(),
            ping_pong: tween.ping_pong(),
            ping_pong_count: tween.ping_pong_count(),
            reversed: tween.is_reversed(),
        }
    }
}

/// Access handed to tween callbacks
pub struct TweenContext<'a> {
    scheduler: &'a mut TweenScheduler,
    frame: TweenFrame,
}

impl<'a> TweenContext<'a> {
    pub(crate) fn new(scheduler: &'a mut TweenScheduler, frame: TweenFrame) -> Self {
        Self { scheduler, frame }
    }

    /// Handle of the running tween
    pub fn handle(&self) -> TweenId {
        self.frame.handle
    }

    /// Custom id of the running tween
    pub fn id(&self) -> u32 {
        self.frame.id
    }

    pub fn frame(&self) -> &TweenFrame {
        &self.frame
    }

    pub fn progress(&self) -> f32 {
        self.frame.progress
    }

    /// Progress shaped by the tween's curve
    pub fn eased(&self) -> f32 {
        self.frame.ease.apply(self.frame.progress)
    }

    /// Interpolated value between `from` and `to` at the current progress
    pub fn value<T: Tweenable>(&self, from: T, to: T) -> T {
        T::ease(self.frame.ease, from, to, self.frame.progress)
    }

    /// Rate of change of [`TweenContext::value`] in units per second
    pub fn velocity<T: Tweenable>(&self, from: T, to: T) -> T {
        let per_progress = T::ease_derivative(self.frame.ease, from, to, self.frame.progress);
        let duration = self.frame.duration;
        T::zip_with(per_progress, per_progress, |v, _| v / duration)
    }

    pub fn elapsed(&self) -> f32 {
        self.frame.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.frame.duration
    }

    pub fn delta(&self) -> f32 {
        self.frame.delta
    }

    pub fn loop_count(&self) -> u32 {
        self.frame.loop_count
    }

    pub fn ping_pong(&self) -> bool {
        self.frame.ping_pong
    }

    pub fn ping_pong_count(&self) -> u32 {
        self.frame.ping_pong_count
    }

    pub fn is_reversed(&self) -> bool {
        self.frame.reversed
    }

    /// The scheduler driving this tween
    pub fn scheduler(&mut self) -> &mut TweenScheduler {
        self.scheduler
    }

    /// Cancel the running tween
    pub fn cancel(&mut self, run_completion: bool) -> bool {
        let handle = self.frame.handle;
        self.scheduler.cancel(handle, run_completion)
    }

    /// Pause the running tween
    pub fn pause(&mut self) -> bool {
        let handle = self.frame.handle;
        self.scheduler.pause(handle)
    }
}
