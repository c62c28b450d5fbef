//! Tween scheduler
//!
//! Owns every live tween and advances the active ones once per host frame.
//!
//! Tweens live in a generational arena keyed by [`TweenId`]. Scheduled
//! tweens are additionally listed in exactly one of `active` or `paused`;
//! finished tweens leave the arena and are recycled through a bounded
//! [`TweenPool`], so a handle from an earlier run can never reach the
//! instance serving a later one.
//!
//! Callbacks run with mutable access to the scheduler. Each tick iterates a
//! snapshot of `active` back to front: tweens cancelled or paused by an
//! earlier callback are skipped, and tweens scheduled during the tick start
//! advancing on the next one.

use std::panic::{self, AssertUnwindSafe};

use glide_core::{
    CallbackKind, CallbackSet, LifecycleEvent, RegisterPool, Result, TweenError, TweenId,
    TweenState,
};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::config::SchedulerConfig;
use crate::context::{TweenCallback, TweenContext, TweenFrame};
use crate::pool::TweenPool;
use crate::tween::{Boundary, FrameTime, Gate, TweenConfig, TweenInstance, TweenKind};

type HandleSet = IndexSet<TweenId, FxBuildHasher>;

/// Handles collected for bulk operations
type Batch = SmallVec<[TweenId; 16]>;

/// The tween scheduler that ticks all active tweens
pub struct TweenScheduler {
    instances: SlotMap<TweenId, TweenInstance>,
    active: HandleSet,
    paused: HandleSet,
    pool: TweenPool,
    registers: RegisterPool<TweenCallback>,
    config: SchedulerConfig,
    /// Set while there is something to drive
    driving: bool,
    /// Set for the duration of a tick
    ticking: bool,
    time: FrameTime,
    frame: u64,
    next_id: u32,
    /// Reused snapshot buffer for ticks
    scratch: Vec<TweenId>,
    /// Nesting level of callback lists currently running
    callback_depth: u32,
    /// Set once the innermost panicking callback has torn down its tween
    unwinding: bool,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            instances: SlotMap::with_key(),
            active: HandleSet::default(),
            paused: HandleSet::default(),
            pool: TweenPool::new(config.pool_capacity),
            registers: RegisterPool::new(config.register_capacity, config.spare_register_limit),
            config,
            driving: false,
            ticking: false,
            time: FrameTime::default(),
            frame: 0,
            next_id: 0,
            scratch: Vec::new(),
            callback_depth: 0,
            unwinding: false,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Check out an Idle tween of `kind` with a fresh custom id
    pub fn acquire(&mut self, kind: TweenKind) -> TweenId {
        self.next_id = self.next_id.wrapping_add(1);
        self.acquire_with_id(kind, self.next_id)
    }

    /// Check out an Idle tween of `kind` carrying a caller-chosen id
    pub fn acquire_with_id(&mut self, kind: TweenKind, id: u32) -> TweenId {
        let mut tween = match self.pool.checkout(kind) {
            Some(tween) => tween,
            None => {
                tracing::trace!(?kind, "tween pool miss, allocating");
                TweenInstance::new(kind, CallbackSet::with_registers(&mut self.registers))
            }
        };
        tween.reset(self.config.default_ease);
        tween.id = id;
        self.instances.insert(tween)
    }

    /// Reassign the custom id of a live tween
    pub fn set_id(&mut self, handle: TweenId, id: u32) -> Result<()> {
        let tween = self
            .instances
            .get_mut(handle)
            .ok_or(TweenError::UnknownTween)
            .map_err(rejected)?;
        tween.id = id;
        Ok(())
    }

    /// Set static parameters of an Idle tween
    pub fn configure(&mut self, handle: TweenId, config: TweenConfig) -> Result<()> {
        self.instances
            .get_mut(handle)
            .ok_or(TweenError::UnknownTween)
            .and_then(|tween| tween.configure(&config))
            .map_err(rejected)
    }

    /// Append a callback to one of the tween's lists
    pub fn add_callback<F>(&mut self, handle: TweenId, kind: CallbackKind, callback: F) -> Result<()>
    where
        F: FnMut(&mut TweenContext<'_>) + 'static,
    {
        let tween = self
            .instances
            .get_mut(handle)
            .ok_or(TweenError::UnknownTween)
            .map_err(rejected)?;
        tween.callbacks.push(kind, Box::new(callback));
        Ok(())
    }

    /// Move an Idle, configured tween into the active set
    pub fn schedule(&mut self, handle: TweenId) -> Result<()> {
        let tween = self
            .instances
            .get_mut(handle)
            .ok_or(TweenError::UnknownTween)
            .map_err(rejected)?;
        if tween.duration() <= 0.0 {
            return Err(rejected(TweenError::InvalidDuration(tween.duration())));
        }
        tween.lifecycle.send(LifecycleEvent::Schedule).map_err(rejected)?;

        tracing::trace!(?handle, id = tween.id(), "tween scheduled");
        self.active.insert(handle);
        self.start_driving();
        Ok(())
    }

    /// Freeze a Tweening tween; false if it was not Tweening
    pub fn pause(&mut self, handle: TweenId) -> bool {
        let Some(tween) = self.instances.get_mut(handle) else {
            return false;
        };
        if tween.lifecycle.send(LifecycleEvent::Pause).is_err() {
            return false;
        }
        self.active.swap_remove(&handle);
        self.paused.insert(handle);
        tracing::trace!(?handle, "tween paused");
        true
    }

    /// Unfreeze a Paused tween; false if it was not Paused
    pub fn resume(&mut self, handle: TweenId) -> bool {
        let Some(tween) = self.instances.get_mut(handle) else {
            return false;
        };
        if tween.lifecycle.send(LifecycleEvent::Resume).is_err() {
            return false;
        }
        self.paused.swap_remove(&handle);
        self.active.insert(handle);
        self.start_driving();
        tracing::trace!(?handle, "tween resumed");
        true
    }

    /// Terminate a Tweening or Paused tween, optionally firing Complete first.
    ///
    /// Returns false (and does nothing) for Idle tweens and stale handles.
    pub fn cancel(&mut self, handle: TweenId, run_completion: bool) -> bool {
        let scheduled = self
            .instances
            .get(handle)
            .is_some_and(|tween| tween.state().is_scheduled());
        if !scheduled {
            return false;
        }
        if run_completion {
            self.run_callbacks(handle, CallbackKind::Complete);
        }
        self.terminate(handle, LifecycleEvent::Cancel);
        true
    }

    /// Return an acquired tween that was never scheduled
    pub fn release(&mut self, handle: TweenId) -> bool {
        let idle = self
            .instances
            .get(handle)
            .is_some_and(|tween| tween.state() == TweenState::Idle);
        if !idle {
            return false;
        }
        if let Some(tween) = self.instances.remove(handle) {
            self.recycle(tween);
        }
        true
    }

    /// Advance every active tween by `dt` seconds on both clocks
    pub fn tick(&mut self, dt: f32) -> bool {
        self.tick_frame(FrameTime::uniform(dt))
    }

    /// Advance every active tween once.
    ///
    /// Returns true while any tween is still active.
    pub fn tick_frame(&mut self, time: FrameTime) -> bool {
        if self.ticking {
            tracing::warn!("tick called from a tween callback, ignoring");
            return true;
        }
        self.ticking = true;
        self.time = time;
        self.frame += 1;

        let mut snapshot = std::mem::take(&mut self.scratch);
        snapshot.clear();
        snapshot.extend(self.active.iter().copied());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            for &handle in snapshot.iter().rev() {
                self.advance(handle);
            }
        }));
        self.scratch = snapshot;

        self.time = FrameTime::default();
        self.ticking = false;
        if let Err(payload) = outcome {
            panic::resume_unwind(payload);
        }

        if self.active.is_empty() && self.driving {
            self.driving = false;
            tracing::debug!(frame = self.frame, "tween driver stopped");
        }
        !self.active.is_empty()
    }

    /// Pause every active tween, returning how many were paused
    pub fn pause_all(&mut self) -> usize {
        let batch: Batch = self.active.iter().copied().collect();
        batch.into_iter().filter(|&handle| self.pause(handle)).count()
    }

    /// Resume every paused tween, returning how many were resumed
    pub fn resume_all(&mut self) -> usize {
        let batch: Batch = self.paused.iter().copied().collect();
        batch.into_iter().filter(|&handle| self.resume(handle)).count()
    }

    /// Cancel every active and paused tween
    pub fn cancel_all(&mut self, run_completion: bool) -> usize {
        let batch: Batch = self.active.iter().chain(self.paused.iter()).copied().collect();
        batch
            .into_iter()
            .filter(|&handle| self.cancel(handle, run_completion))
            .count()
    }

    /// Tear everything down without completion callbacks.
    ///
    /// Unscheduled tweens are released too; all outstanding handles expire.
    pub fn abort(&mut self) {
        let cancelled = self.cancel_all(false);
        let idle: Batch = self.instances.keys().collect();
        let released = idle.into_iter().filter(|&handle| self.release(handle)).count();
        self.driving = false;
        tracing::warn!(cancelled, released, "tween scheduler aborted");
    }

    /// Change the pool bound; instances that no longer fit are dropped
    pub fn resize_pool(&mut self, capacity: usize) {
        tracing::debug!(from = self.pool.capacity(), to = capacity, "resizing tween pool");
        for tween in self.pool.resize(capacity) {
            tween.into_callbacks().release_into(&mut self.registers);
        }
        self.config.pool_capacity = capacity;
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn paused_count(&self) -> usize {
        self.paused.len()
    }

    /// Idle instances waiting in the pool
    pub fn pooled_count(&self) -> usize {
        self.pool.len()
    }

    /// Change how many spare callback buffers are kept; extras are dropped
    pub fn resize_registers(&mut self, limit: usize) {
        self.registers.set_limit(limit);
        self.config.spare_register_limit = limit;
    }

    /// Spare callback buffers available for new instances
    pub fn spare_registers(&self) -> usize {
        self.registers.spare_count()
    }

    /// Upper bound on spare callback buffers
    pub fn register_limit(&self) -> usize {
        self.registers.limit()
    }

    /// Live tweens, scheduled or not
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether an active tween carries the custom `id`
    pub fn is_tweening(&self, id: u32) -> bool {
        self.active
            .iter()
            .any(|&handle| self.instances.get(handle).is_some_and(|tween| tween.id() == id))
    }

    /// Whether `handle` is currently Tweening
    pub fn is_active(&self, handle: TweenId) -> bool {
        self.active.contains(&handle)
    }

    /// Lifecycle state; expired handles report Idle
    pub fn state(&self, handle: TweenId) -> TweenState {
        self.instances
            .get(handle)
            .map_or(TweenState::Idle, TweenInstance::state)
    }

    pub fn get(&self, handle: TweenId) -> Option<&TweenInstance> {
        self.instances.get(handle)
    }

    /// Whether the driver considers itself running
    pub fn is_driving(&self) -> bool {
        self.driving
    }

    /// Number of ticks processed so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn start_driving(&mut self) {
        if !self.driving {
            self.driving = true;
            tracing::debug!(frame = self.frame, "tween driver started");
        }
    }

    fn is_running(&self, handle: TweenId) -> bool {
        self.instances
            .get(handle)
            .is_some_and(|tween| tween.state() == TweenState::Tweening)
    }

    fn advance(&mut self, handle: TweenId) {
        let time = self.time;
        let Some(tween) = self.instances.get_mut(handle) else {
            return;
        };
        let Gate::Run { dt, first } = tween.begin_step(time) else {
            return;
        };

        if first {
            self.run_callbacks(handle, CallbackKind::Start);
            if !self.is_running(handle) {
                return;
            }
        }

        let Some(tween) = self.instances.get_mut(handle) else {
            return;
        };
        // Paused inside the Tick that reached the end: resolve it now
        // without accruing time or ticking past 1.0
        if tween.at_segment_end() {
            self.end_segment(handle);
            return;
        }
        let at_boundary = tween.accrue(dt);

        self.run_callbacks(handle, CallbackKind::Tick);
        if at_boundary && self.is_running(handle) {
            self.end_segment(handle);
        }
    }

    fn end_segment(&mut self, handle: TweenId) {
        let Some(tween) = self.instances.get_mut(handle) else {
            return;
        };
        match tween.resolve_boundary() {
            Boundary::Loop { complete } => {
                self.run_callbacks(handle, CallbackKind::LoopReset);
                if complete && self.instances.contains_key(handle) {
                    self.run_callbacks(handle, CallbackKind::Complete);
                }
            }
            Boundary::Finish => {
                self.run_callbacks(handle, CallbackKind::Complete);
                // Completion may have cancelled it already; a pause does not
                // keep a finished run alive
                self.terminate(handle, LifecycleEvent::Finish);
            }
        }
    }

    /// Invoke one callback list of `handle` in order.
    ///
    /// The list is moved out while it runs. A panicking callback terminates
    /// its tween before the panic continues unwinding. Lists further out on
    /// the stack only get their buffers back; their tweens stay as they are.
    fn run_callbacks(&mut self, handle: TweenId, kind: CallbackKind) {
        let time = self.time;
        let Some(tween) = self.instances.get_mut(handle) else {
            return;
        };
        let mut list = tween.callbacks.take(kind);
        if list.is_empty() {
            tween.callbacks.restore(kind, list);
            return;
        }
        let frame = TweenFrame::capture(handle, tween, time.delta_for(tween.unscaled_clock()));

        self.callback_depth += 1;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut ctx = TweenContext::new(&mut *self, frame);
            for callback in list.iter_mut() {
                callback(&mut ctx);
            }
        }));
        self.callback_depth -= 1;

        match outcome {
            Ok(()) => self.return_list(handle, kind, list),
            Err(payload) => {
                if self.unwinding {
                    self.return_list(handle, kind, list);
                } else {
                    drop(list);
                    tracing::error!(?handle, ?kind, "tween callback panicked, terminating tween");
                    self.terminate(handle, LifecycleEvent::Cancel);
                }
                self.unwinding = self.callback_depth > 0;
                panic::resume_unwind(payload);
            }
        }
    }

    fn return_list(&mut self, handle: TweenId, kind: CallbackKind, mut list: Vec<TweenCallback>) {
        match self.instances.get_mut(handle) {
            Some(tween) => {
                if kind == CallbackKind::Start {
                    list.clear();
                }
                tween.callbacks.restore(kind, list);
            }
            None => self.registers.give_back(list),
        }
    }

    /// Detach callbacks, go Idle, leave the scheduled sets and recycle
    fn terminate(&mut self, handle: TweenId, event: LifecycleEvent) {
        let Some(mut tween) = self.instances.remove(handle) else {
            return;
        };
        if let Err(err) = tween.lifecycle.send(event) {
            tracing::trace!(?handle, %err, "forcing tween idle");
        }
        self.active.swap_remove(&handle);
        self.paused.swap_remove(&handle);
        tracing::trace!(?handle, id = tween.id(), ?event, "tween terminated");
        self.recycle(tween);
    }

    fn recycle(&mut self, mut tween: TweenInstance) {
        tween.reset(self.config.default_ease);
        if let Some(dropped) = self.pool.checkin(tween) {
            tracing::trace!(kind = ?dropped.kind(), "tween pool full, dropping instance");
            dropped.into_callbacks().release_into(&mut self.registers);
        }
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TweenScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenScheduler")
            .field("live", &self.instances.len())
            .field("active", &self.active.len())
            .field("paused", &self.paused.len())
            .field("pooled", &self.pool.len())
            .field("driving", &self.driving)
            .field("frame", &self.frame)
            .finish()
    }
}

fn rejected(err: TweenError) -> TweenError {
    tracing::error!(%err, "rejected tween operation");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn counter() -> Rc<Cell<u32>> {
        Rc::new(Cell::new(0))
    }

    fn counting(
        scheduler: &mut TweenScheduler,
        handle: TweenId,
        kind: CallbackKind,
    ) -> Rc<Cell<u32>> {
        let count = counter();
        let hits = count.clone();
        scheduler
            .add_callback(handle, kind, move |_| hits.set(hits.get() + 1))
            .unwrap();
        count
    }

    fn started(scheduler: &mut TweenScheduler, config: TweenConfig) -> TweenId {
        let handle = scheduler.acquire(TweenKind::Generic);
        scheduler.configure(handle, config).unwrap();
        scheduler.schedule(handle).unwrap();
        handle
    }

    #[test]
    fn test_schedule_requires_configuration() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire(TweenKind::Float);

        assert_eq!(
            scheduler.schedule(handle),
            Err(TweenError::InvalidDuration(0.0))
        );
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_double_schedule_rejected() {
        let mut scheduler = TweenScheduler::new();
        let handle = started(&mut scheduler, TweenConfig::new(1.0));

        assert!(matches!(
            scheduler.schedule(handle),
            Err(TweenError::InvalidTransition { .. })
        ));
        assert!(matches!(
            scheduler.configure(handle, TweenConfig::new(3.0)),
            Err(TweenError::NotIdle(TweenState::Tweening))
        ));
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_collections_follow_state() {
        let mut scheduler = TweenScheduler::new();
        let handle = started(&mut scheduler, TweenConfig::new(1.0));
        assert!(scheduler.is_active(handle));

        assert!(scheduler.pause(handle));
        assert!(!scheduler.pause(handle));
        assert_eq!(scheduler.state(handle), TweenState::Paused);
        assert_eq!((scheduler.active_count(), scheduler.paused_count()), (0, 1));

        assert!(scheduler.resume(handle));
        assert!(!scheduler.resume(handle));
        assert_eq!((scheduler.active_count(), scheduler.paused_count()), (1, 0));

        assert!(scheduler.cancel(handle, false));
        assert_eq!((scheduler.active_count(), scheduler.paused_count()), (0, 0));
        assert_eq!(scheduler.state(handle), TweenState::Idle);
        assert_eq!(scheduler.pooled_count(), 1);
    }

    #[test]
    fn test_driver_stops_and_restarts() {
        let mut scheduler = TweenScheduler::new();
        assert!(!scheduler.is_driving());

        started(&mut scheduler, TweenConfig::new(1.0));
        assert!(scheduler.is_driving());
        assert!(!scheduler.tick(1.0));
        assert!(!scheduler.is_driving());

        started(&mut scheduler, TweenConfig::new(2.0));
        assert!(scheduler.is_driving());
        assert!(scheduler.tick(1.0));
    }

    #[test]
    fn test_start_fires_once_after_delay() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire(TweenKind::Generic);
        scheduler
            .configure(handle, TweenConfig::new(1.0).with_loops(2).with_delay(1.0))
            .unwrap();
        let starts = counting(&mut scheduler, handle, CallbackKind::Start);
        let ticks = counting(&mut scheduler, handle, CallbackKind::Tick);
        scheduler.schedule(handle).unwrap();

        scheduler.tick(1.0);
        assert_eq!((starts.get(), ticks.get()), (0, 0));

        scheduler.tick(0.5);
        assert_eq!((starts.get(), ticks.get()), (1, 1));
        assert_eq!(scheduler.get(handle).unwrap().callback_count(CallbackKind::Start), 0);

        // Loop boundaries do not restart the run
        scheduler.tick(0.5);
        scheduler.tick(0.5);
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn test_tick_callbacks_run_in_registration_order() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire(TweenKind::Generic);
        scheduler.configure(handle, TweenConfig::new(4.0)).unwrap();
        let order = Rc::new(RefCell::new(Vec::new()));
        for label in ["apply", "user"] {
            let order = order.clone();
            scheduler
                .add_callback(handle, CallbackKind::Tick, move |_| order.borrow_mut().push(label))
                .unwrap();
        }
        scheduler.schedule(handle).unwrap();

        scheduler.tick(1.0);
        scheduler.tick(1.0);
        assert_eq!(*order.borrow(), vec!["apply", "user", "apply", "user"]);
    }

    #[test]
    fn test_callback_registered_mid_run_fires_next_tick() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire(TweenKind::Generic);
        scheduler.configure(handle, TweenConfig::new(10.0)).unwrap();
        let late = counter();
        let late_hits = late.clone();
        let armed = Cell::new(false);
        scheduler
            .add_callback(handle, CallbackKind::Tick, move |ctx| {
                if !armed.replace(true) {
                    let hits = late_hits.clone();
                    let me = ctx.handle();
                    ctx.scheduler()
                        .add_callback(me, CallbackKind::Tick, move |_| hits.set(hits.get() + 1))
                        .unwrap();
                }
            })
            .unwrap();
        scheduler.schedule(handle).unwrap();

        scheduler.tick(1.0);
        assert_eq!(late.get(), 0);
        scheduler.tick(1.0);
        assert_eq!(late.get(), 1);
        assert_eq!(scheduler.get(handle).unwrap().callback_count(CallbackKind::Tick), 2);
    }

    #[test]
    fn test_tween_scheduled_during_tick_waits_for_next_tick() {
        let mut scheduler = TweenScheduler::new();
        let spawned = Rc::new(Cell::new(None));
        let spawned_slot = spawned.clone();

        let parent = scheduler.acquire(TweenKind::Generic);
        scheduler.configure(parent, TweenConfig::new(1.0)).unwrap();
        scheduler
            .add_callback(parent, CallbackKind::Complete, move |ctx| {
                let scheduler = ctx.scheduler();
                let child = scheduler.acquire(TweenKind::Generic);
                scheduler.configure(child, TweenConfig::new(2.0)).unwrap();
                scheduler.schedule(child).unwrap();
                spawned_slot.set(Some(child));
            })
            .unwrap();
        scheduler.schedule(parent).unwrap();

        assert!(scheduler.tick(1.0));
        let child = spawned.get().unwrap();
        assert_eq!(scheduler.get(child).unwrap().elapsed(), 0.0);

        scheduler.tick(1.0);
        assert_eq!(scheduler.get(child).unwrap().elapsed(), 1.0);
    }

    #[test]
    fn test_cancel_other_tween_from_callback() {
        let mut scheduler = TweenScheduler::new();
        let victim = started(&mut scheduler, TweenConfig::new(5.0));
        let victim_ticks = counting(&mut scheduler, victim, CallbackKind::Tick);

        let killer = scheduler.acquire(TweenKind::Generic);
        scheduler.configure(killer, TweenConfig::new(5.0)).unwrap();
        scheduler
            .add_callback(killer, CallbackKind::Tick, move |ctx| {
                ctx.scheduler().cancel(victim, false);
            })
            .unwrap();
        scheduler.schedule(killer).unwrap();

        // The later-scheduled killer is visited first
        scheduler.tick(1.0);
        assert_eq!(victim_ticks.get(), 0);
        assert_eq!(scheduler.state(victim), TweenState::Idle);
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_reentrant_tick_is_ignored() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire(TweenKind::Generic);
        scheduler.configure(handle, TweenConfig::new(3.0)).unwrap();
        scheduler
            .add_callback(handle, CallbackKind::Tick, |ctx| {
                ctx.scheduler().tick(1.0);
            })
            .unwrap();
        scheduler.schedule(handle).unwrap();

        scheduler.tick(1.0);
        assert_eq!(scheduler.get(handle).unwrap().elapsed(), 1.0);
        assert_eq!(scheduler.frame(), 1);
    }

    #[test]
    fn test_pause_all_and_resume_all() {
        let mut scheduler = TweenScheduler::new();
        let handles: Vec<_> = (0..5)
            .map(|_| started(&mut scheduler, TweenConfig::new(4.0)))
            .collect();
        scheduler.tick(1.0);

        assert_eq!(scheduler.pause_all(), 5);
        assert_eq!(scheduler.active_count(), 0);
        assert!(!scheduler.tick(1.0));
        for &handle in &handles {
            assert_eq!(scheduler.get(handle).unwrap().elapsed(), 1.0);
        }

        assert_eq!(scheduler.resume_all(), 5);
        assert!(scheduler.is_driving());
        scheduler.tick(1.0);
        for &handle in &handles {
            assert_eq!(scheduler.get(handle).unwrap().elapsed(), 2.0);
        }
    }

    #[test]
    fn test_cancel_all_tolerates_cascading_cancels() {
        let mut scheduler = TweenScheduler::new();
        let a = started(&mut scheduler, TweenConfig::new(1.0));
        let b = started(&mut scheduler, TweenConfig::new(1.0));
        let c = started(&mut scheduler, TweenConfig::new(1.0));
        scheduler.pause(c);

        // Completing `a` also cancels `b`
        scheduler
            .add_callback(a, CallbackKind::Complete, move |ctx| {
                ctx.scheduler().cancel(b, false);
            })
            .unwrap();
        let b_completes = counting(&mut scheduler, b, CallbackKind::Complete);

        let cancelled = scheduler.cancel_all(true);
        assert_eq!(cancelled, 2);
        assert_eq!(b_completes.get(), 0);
        assert_eq!(scheduler.active_count() + scheduler.paused_count(), 0);
        assert_eq!(scheduler.state(c), TweenState::Idle);
    }

    #[test]
    fn test_is_tweening_by_custom_id() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire_with_id(TweenKind::Float, 77);
        scheduler.configure(handle, TweenConfig::new(1.0)).unwrap();
        assert!(!scheduler.is_tweening(77));

        scheduler.schedule(handle).unwrap();
        assert!(scheduler.is_tweening(77));
        assert!(!scheduler.is_tweening(78));

        scheduler.pause(handle);
        assert!(!scheduler.is_tweening(77));
    }

    #[test]
    fn test_acquire_assigns_increasing_ids() {
        let mut scheduler = TweenScheduler::new();
        let a = scheduler.acquire(TweenKind::Generic);
        let b = scheduler.acquire(TweenKind::Generic);
        assert!(scheduler.get(b).unwrap().id() > scheduler.get(a).unwrap().id());

        scheduler.set_id(b, 5).unwrap();
        assert_eq!(scheduler.get(b).unwrap().id(), 5);
    }

    #[test]
    fn test_release_unscheduled() {
        let mut scheduler = TweenScheduler::new();
        let handle = scheduler.acquire(TweenKind::Vec2);
        let running = started(&mut scheduler, TweenConfig::new(1.0));

        assert!(scheduler.release(handle));
        assert!(!scheduler.release(handle));
        assert!(!scheduler.release(running));
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.pooled_count(), 1);
    }

    #[test]
    fn test_pool_overflow_recycles_register_buffers() {
        let config = SchedulerConfig {
            pool_capacity: 1,
            ..SchedulerConfig::default()
        };
        let mut scheduler = TweenScheduler::with_config(config);
        let a = started(&mut scheduler, TweenConfig::new(1.0));
        let b = started(&mut scheduler, TweenConfig::new(1.0));
        assert_eq!(scheduler.spare_registers(), 0);

        scheduler.cancel(a, false);
        scheduler.cancel(b, false);
        assert_eq!(scheduler.pooled_count(), 1);
        assert_eq!(scheduler.spare_registers(), 4);

        // A fresh allocation drains the spare buffers
        scheduler.acquire(TweenKind::Generic);
        scheduler.acquire(TweenKind::Generic);
        assert_eq!(scheduler.pooled_count(), 0);
        assert_eq!(scheduler.spare_registers(), 0);
    }

    #[test]
    fn test_resize_pool() {
        let mut scheduler = TweenScheduler::new();
        let handles: Vec<_> = (0..4)
            .map(|_| started(&mut scheduler, TweenConfig::new(1.0)))
            .collect();
        scheduler.tick(1.0);
        assert_eq!(scheduler.pooled_count(), 4);

        scheduler.resize_pool(2);
        assert_eq!(scheduler.pooled_count(), 2);
        assert_eq!(scheduler.config().pool_capacity, 2);
        assert!(handles.iter().all(|&h| scheduler.get(h).is_none()));
    }

    #[test]
    fn test_resize_registers() {
        let mut scheduler = TweenScheduler::new();
        for _ in 0..4 {
            started(&mut scheduler, TweenConfig::new(1.0));
        }
        scheduler.tick(1.0);
        scheduler.resize_pool(0);
        assert_eq!(scheduler.spare_registers(), 16);

        scheduler.resize_registers(6);
        assert_eq!(scheduler.spare_registers(), 6);
        assert_eq!(scheduler.register_limit(), 6);
        assert_eq!(scheduler.config().spare_register_limit, 6);

        // Four buffers per fresh instance
        scheduler.acquire(TweenKind::Generic);
        assert_eq!(scheduler.spare_registers(), 2);
    }

    #[test]
    fn test_abort_expires_everything() {
        let mut scheduler = TweenScheduler::new();
        let running = started(&mut scheduler, TweenConfig::new(1.0));
        let completes = counting(&mut scheduler, running, CallbackKind::Complete);
        let idle = scheduler.acquire(TweenKind::Generic);

        scheduler.abort();

        assert_eq!(completes.get(), 0);
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_driving());
        assert_eq!(scheduler.schedule(idle), Err(TweenError::UnknownTween));
    }

    #[test]
    fn test_default_ease_applies_to_acquired_tweens() {
        let config = SchedulerConfig {
            default_ease: Easing::EaseOutCubic,
            ..SchedulerConfig::default()
        };
        let mut scheduler = TweenScheduler::with_config(config);
        let handle = scheduler.acquire(TweenKind::Float);
        assert_eq!(scheduler.get(handle).unwrap().ease(), Easing::EaseOutCubic);
    }

    #[test]
    fn test_unscaled_clock() {
        let mut scheduler = TweenScheduler::new();
        let scaled = started(&mut scheduler, TweenConfig::new(10.0));
        let unscaled = started(&mut scheduler, TweenConfig::new(10.0).with_unscaled_clock(true));

        scheduler.tick_frame(FrameTime::new(0.0, 1.0));

        assert_eq!(scheduler.get(scaled).unwrap().elapsed(), 0.0);
        assert_eq!(scheduler.get(unscaled).unwrap().elapsed(), 1.0);
    }
}
