//! Callback registers
//!
//! Each tween owns one ordered list per [`CallbackKind`]. Lists are invoked
//! in registration order, so an adapter that registers its "apply" closure
//! first always runs before user callbacks registered later.
//!
//! While a list is being invoked it is moved out of its set with
//! [`CallbackSet::take`], which lets the callbacks re-enter the owner
//! mutably. [`CallbackSet::restore`] puts it back, keeping anything that
//! was registered in the meantime after the existing entries.
//!
//! [`RegisterPool`] recycles the backing buffers of sets whose tween was
//! dropped instead of pooled.

use std::mem;

/// Which list a callback belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallbackKind {
    /// Once per run, on the first advance after the delay
    Start,
    /// Every advance while running
    Tick,
    /// Final completion, and each loop boundary when repeating
    Complete,
    /// Whenever elapsed time resets for a new loop or ping-pong segment
    LoopReset,
}

impl CallbackKind {
    pub const ALL: [CallbackKind; 4] = [
        CallbackKind::Start,
        CallbackKind::Tick,
        CallbackKind::Complete,
        CallbackKind::LoopReset,
    ];

    const fn index(self) -> usize {
        match self {
            CallbackKind::Start => 0,
            CallbackKind::Tick => 1,
            CallbackKind::Complete => 2,
            CallbackKind::LoopReset => 3,
        }
    }
}

/// Ordered callback lists for one tween
pub struct CallbackSet<F> {
    lists: [Vec<F>; 4],
}

impl<F> CallbackSet<F> {
    pub fn new() -> Self {
        Self {
            lists: [Vec::new(), Vec::new(), Vec::new(), Vec::new()],
        }
    }

    /// Build a set whose lists reuse buffers rented from `registers`
    pub fn with_registers(registers: &mut RegisterPool<F>) -> Self {
        Self {
            lists: [
                registers.rent(),
                registers.rent(),
                registers.rent(),
                registers.rent(),
            ],
        }
    }

    /// Append a callback to the end of its list
    pub fn push(&mut self, kind: CallbackKind, callback: F) {
        self.lists[kind.index()].push(callback);
    }

    /// Number of callbacks registered for `kind`
    pub fn len(&self, kind: CallbackKind) -> usize {
        self.lists[kind.index()].len()
    }

    /// Total callbacks across all kinds
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Move a list out for invocation, leaving an empty one behind
    pub fn take(&mut self, kind: CallbackKind) -> Vec<F> {
        mem::take(&mut self.lists[kind.index()])
    }

    /// Put a taken list back in front of anything registered since `take`
    pub fn restore(&mut self, kind: CallbackKind, mut list: Vec<F>) {
        let slot = &mut self.lists[kind.index()];
        list.append(slot);
        *slot = list;
    }

    /// Drop every callback, keeping the buffers
    pub fn clear(&mut self) {
        for list in &mut self.lists {
            list.clear();
        }
    }

    /// Drop every callback and hand the buffers to `registers`
    pub fn release_into(self, registers: &mut RegisterPool<F>) {
        for list in self.lists {
            registers.give_back(list);
        }
    }
}

impl<F> Default for CallbackSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> std::fmt::Debug for CallbackSet<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSet")
            .field("start", &self.len(CallbackKind::Start))
            .field("tick", &self.len(CallbackKind::Tick))
            .field("complete", &self.len(CallbackKind::Complete))
            .field("loop_reset", &self.len(CallbackKind::LoopReset))
            .finish()
    }
}

/// Shared pool of empty callback buffers
///
/// Bounded by `limit`; buffers returned beyond it are freed.
pub struct RegisterPool<F> {
    spare: Vec<Vec<F>>,
    register_capacity: usize,
    limit: usize,
}

impl<F> RegisterPool<F> {
    /// `register_capacity` is the initial capacity of freshly allocated buffers
    pub fn new(register_capacity: usize, limit: usize) -> Self {
        Self {
            spare: Vec::new(),
            register_capacity,
            limit,
        }
    }

    /// Take a spare buffer or allocate one
    pub fn rent(&mut self) -> Vec<F> {
        self.spare
            .pop()
            .unwrap_or_else(|| Vec::with_capacity(self.register_capacity))
    }

    /// Return a buffer; its contents are dropped
    pub fn give_back(&mut self, mut buffer: Vec<F>) {
        buffer.clear();
        if buffer.capacity() == 0 {
            return;
        }
        if self.spare.len() < self.limit {
            self.spare.push(buffer);
        } else {
            tracing::trace!(limit = self.limit, "register pool full, freeing buffer");
        }
    }

    /// Number of buffers waiting for reuse
    pub fn spare_count(&self) -> usize {
        self.spare.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the bound, freeing surplus buffers
    pub fn set_limit(&mut self, limit: usize) {
        tracing::debug!(from = self.limit, to = limit, "resizing register pool");
        self.limit = limit;
        self.spare.truncate(limit);
    }
}
