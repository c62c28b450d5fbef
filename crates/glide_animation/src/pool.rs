//! Tween instance pool
//!
//! Fixed array of optional slots. Check-in takes the first empty slot;
//! checkout scans for an instance of the requested kind. A full pool is not
//! an error: the caller gets the instance back and drops it.

use crate::tween::{TweenInstance, TweenKind};

/// Bounded cache of idle tween instances
#[derive(Debug)]
pub struct TweenPool {
    slots: Vec<Option<TweenInstance>>,
}

impl TweenPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of instances waiting for reuse
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Take an idle instance of `kind`, most recently filled slots first
    pub fn checkout(&mut self, kind: TweenKind) -> Option<TweenInstance> {
        self.slots
            .iter_mut()
            .rev()
            .find(|slot| matches!(slot, Some(tween) if tween.kind() == kind))
            .and_then(Option::take)
    }

    /// Store an idle instance; returns it back when every slot is taken
    pub fn checkin(&mut self, tween: TweenInstance) -> Option<TweenInstance> {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(tween);
                None
            }
            None => Some(tween),
        }
    }

    /// Change the number of slots, returning instances that no longer fit
    pub fn resize(&mut self, capacity: usize) -> Vec<TweenInstance> {
        let mut evicted = Vec::new();
        if capacity < self.slots.len() {
            evicted.extend(self.slots.drain(capacity..).flatten());
        } else {
            self.slots.resize_with(capacity, || None);
        }
        evicted
    }
}
