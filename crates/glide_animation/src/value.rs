//! Value tweens
//!
//! Adapters that drive a [`Tweenable`] value through a setter each tick,
//! plus delayed calls built on the same machinery.

use std::cell::Cell;
use std::rc::Rc;

use glide_core::{CallbackKind, Result, TweenId};

use crate::builder::TweenBuilder;
use crate::scheduler::TweenScheduler;
use crate::tween::TweenKind;
use crate::tweenable::Tweenable;

impl TweenScheduler {
    /// Build a tween that feeds the eased value between `from` and `to` to
    /// `apply` every tick.
    ///
    /// `apply` runs before any other update callback. When ping-ponging the
    /// endpoints swap at each loop reset, so the backward half retraces the
    /// curve from `to` to `from`.
    pub fn value<T, F>(&mut self, from: T, to: T, duration: f32, mut apply: F) -> TweenBuilder<'_>
    where
        T: Tweenable,
        F: FnMut(T) + 'static,
    {
        let endpoints = Rc::new(Cell::new((from, to)));
        let current = endpoints.clone();

        self.tween_kind(T::KIND, duration)
            .on(CallbackKind::Tick, move |ctx| {
                let (from, to) = current.get();
                apply(ctx.value(from, to));
            })
            .on(CallbackKind::LoopReset, move |ctx| {
                if ctx.ping_pong() {
                    let (from, to) = endpoints.get();
                    endpoints.set((to, from));
                }
            })
    }

    /// Run `action` once after `delay` seconds
    pub fn exec_later<F>(&mut self, delay: f32, action: F) -> Result<TweenId>
    where
        F: FnOnce() + 'static,
    {
        let mut action = Some(action);
        self.tween_kind(TweenKind::Delay, delay)
            .on_complete(move |_| {
                if let Some(action) = action.take() {
                    action();
                }
            })
            .start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use glide_core::{Color, TweenError, Vec2};
    use std::cell::RefCell;

    #[test]
    fn test_float_value_reaches_target() {
        let mut scheduler = TweenScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        scheduler
            .value(0.0f32, 10.0, 1.0, move |v| sink.borrow_mut().push(v))
            .start()
            .unwrap();

        for _ in 0..4 {
            scheduler.tick(0.25);
        }
        assert_eq!(*seen.borrow(), vec![2.5, 5.0, 7.5, 10.0]);
    }

    #[test]
    fn test_value_uses_curve() {
        let mut scheduler = TweenScheduler::new();
        let last = Rc::new(Cell::new(Vec2::ZERO));
        let sink = last.clone();
        scheduler
            .value(Vec2::ZERO, Vec2::new(4.0, 8.0), 2.0, move |v| sink.set(v))
            .ease(Easing::EaseInQuad)
            .start()
            .unwrap();

        scheduler.tick(1.0);
        assert_eq!(last.get(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_ping_pong_value_retraces() {
        let mut scheduler = TweenScheduler::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        scheduler
            .value(0.0f32, 1.0, 1.0, move |v| sink.borrow_mut().push(v))
            .loops(1)
            .ping_pong(true)
            .start()
            .unwrap();

        for _ in 0..4 {
            scheduler.tick(0.5);
        }
        assert_eq!(*seen.borrow(), vec![0.5, 1.0, 0.5, 0.0]);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_value_tweens_pool_by_type() {
        let mut scheduler = TweenScheduler::new();
        scheduler
            .value(Color::BLACK, Color::WHITE, 1.0, |_| {})
            .start()
            .unwrap();
        scheduler.tick(1.0);
        assert_eq!(scheduler.pooled_count(), 1);

        // A float tween cannot reuse the pooled color instance
        scheduler.value(0.0f32, 1.0, 1.0, |_| {}).start().unwrap();
        assert_eq!(scheduler.pooled_count(), 1);

        let color = scheduler
            .value(Color::WHITE, Color::BLACK, 1.0, |_| {})
            .start()
            .unwrap();
        assert_eq!(scheduler.pooled_count(), 0);
        assert_eq!(scheduler.get(color).unwrap().kind(), TweenKind::Color);
    }

    #[test]
    fn test_exec_later() {
        let mut scheduler = TweenScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let hits = fired.clone();
        let handle = scheduler.exec_later(1.0, move || hits.set(hits.get() + 1)).unwrap();
        assert_eq!(scheduler.get(handle).unwrap().kind(), TweenKind::Delay);

        scheduler.tick(0.5);
        assert_eq!(fired.get(), 0);
        scheduler.tick(0.5);
        assert_eq!(fired.get(), 1);
        assert!(!scheduler.is_driving());
    }

    #[test]
    fn test_exec_later_rejects_zero_delay() {
        let mut scheduler = TweenScheduler::new();
        let result = scheduler.exec_later(0.0, || {});
        assert_eq!(result, Err(TweenError::InvalidDuration(0.0)));
        assert!(scheduler.is_empty());
    }
}
