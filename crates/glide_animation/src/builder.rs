//! Fluent tween construction
//!
//! ```
//! use glide_animation::{Easing, TweenScheduler};
//!
//! let mut scheduler = TweenScheduler::new();
//! let handle = scheduler
//!     .tween(0.5)
//!     .ease(Easing::EaseOutCubic)
//!     .loops(2)
//!     .on_complete(|ctx| println!("tween {} done", ctx.id()))
//!     .start()
//!     .unwrap();
//!
//! assert!(scheduler.is_active(handle));
//! ```

use glide_core::{CallbackKind, Result, TweenError, TweenId};

use crate::context::TweenContext;
use crate::easing::Easing;
use crate::scheduler::TweenScheduler;
use crate::tween::{TweenConfig, TweenKind};

/// Builder for a single tween run.
///
/// Holds an acquired Idle instance. Dropping the builder without calling
/// [`TweenBuilder::start`] or [`TweenBuilder::build`] returns the instance.
#[must_use = "a tween builder does nothing until started"]
pub struct TweenBuilder<'a> {
    scheduler: &'a mut TweenScheduler,
    handle: TweenId,
    config: TweenConfig,
    error: Option<TweenError>,
    committed: bool,
}

impl<'a> TweenBuilder<'a> {
    pub(crate) fn new(scheduler: &'a mut TweenScheduler, kind: TweenKind, config: TweenConfig) -> Self {
        let handle = scheduler.acquire(kind);
        Self {
            scheduler,
            handle,
            config,
            error: None,
            committed: false,
        }
    }

    /// Handle the tween will run under
    pub fn handle(&self) -> TweenId {
        self.handle
    }

    /// Replace the generated custom id
    pub fn id(mut self, id: u32) -> Self {
        if let Err(err) = self.scheduler.set_id(self.handle, id) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Replace every static parameter at once
    pub fn with_config(mut self, config: TweenConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.config.ease = ease;
        self
    }

    pub fn loops(mut self, loops: u32) -> Self {
        self.config.loops = loops;
        self
    }

    pub fn ping_pong(mut self, ping_pong: bool) -> Self {
        self.config.ping_pong = ping_pong;
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.config.delay = delay;
        self
    }

    /// Advance on the real-time clock instead of the scaled one
    pub fn unscaled_clock(mut self, unscaled_clock: bool) -> Self {
        self.config.unscaled_clock = unscaled_clock;
        self
    }

    pub fn repeat_on_complete(mut self, repeat: bool) -> Self {
        self.config.repeat_on_complete_each_loop = repeat;
        self
    }

    pub fn on_start<F>(self, callback: F) -> Self
    where
        F: FnMut(&mut TweenContext<'_>) + 'static,
    {
        self.on(CallbackKind::Start, callback)
    }

    /// Called every tick while the tween advances
    pub fn on_update<F>(self, callback: F) -> Self
    where
        F: FnMut(&mut TweenContext<'_>) + 'static,
    {
        self.on(CallbackKind::Tick, callback)
    }

    pub fn on_complete<F>(self, callback: F) -> Self
    where
        F: FnMut(&mut TweenContext<'_>) + 'static,
    {
        self.on(CallbackKind::Complete, callback)
    }

    pub fn on_loop_reset<F>(self, callback: F) -> Self
    where
        F: FnMut(&mut TweenContext<'_>) + 'static,
    {
        self.on(CallbackKind::LoopReset, callback)
    }

    /// Register a callback on any list
    pub fn on<F>(mut self, kind: CallbackKind, callback: F) -> Self
    where
        F: FnMut(&mut TweenContext<'_>) + 'static,
    {
        if let Err(err) = self.scheduler.add_callback(self.handle, kind, callback) {
            self.error.get_or_insert(err);
        }
        self
    }

    /// Configure and schedule the tween
    pub fn start(mut self) -> Result<TweenId> {
        let handle = self.commit()?;
        if let Err(err) = self.scheduler.schedule(handle) {
            self.committed = false;
            return Err(err);
        }
        Ok(handle)
    }

    /// Configure the tween but leave it Idle for a later
    /// [`TweenScheduler::schedule`]
    pub fn build(mut self) -> Result<TweenId> {
        self.commit()
    }

    fn commit(&mut self) -> Result<TweenId> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.scheduler.configure(self.handle, self.config)?;
        self.committed = true;
        Ok(self.handle)
    }
}

impl Drop for TweenBuilder<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::trace!(handle = ?self.handle, "tween builder dropped, releasing");
            self.scheduler.release(self.handle);
        }
    }
}

impl TweenScheduler {
    /// Start building a callback-only tween of `duration` seconds
    pub fn tween(&mut self, duration: f32) -> TweenBuilder<'_> {
        self.tween_kind(TweenKind::Generic, duration)
    }

    /// Start building a tween pooled under `kind`
    pub fn tween_kind(&mut self, kind: TweenKind, duration: f32) -> TweenBuilder<'_> {
        let config = TweenConfig::new(duration).with_ease(self.config().default_ease);
        TweenBuilder::new(self, kind, config)
    }

    /// Start building from a full parameter set, e.g. a config preset
    pub fn tween_with(&mut self, config: TweenConfig) -> TweenBuilder<'_> {
        TweenBuilder::new(self, TweenKind::Generic, config)
    }
}
