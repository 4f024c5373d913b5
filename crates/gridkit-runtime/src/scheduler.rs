#![forbid(unsafe_code)]

//! Single-threaded coalescing task queue.
//!
//! The layout runtime has exactly two kinds of suspension point: "later in
//! this event-loop turn" (validation after a burst of invalidations, debounced
//! resizes) and "when this animation ends". Both are modelled as entries in a
//! [`Scheduler`] instead of ad hoc callbacks.
//!
//! Time is explicit: the host passes `now` into [`Scheduler::run_due`], so the
//! queue is deterministic under test.
//!
//! # Triggers
//!
//! | Trigger | Fires |
//! |---------|-------|
//! | [`Trigger::Microtask`] | on the next `run_due`, whatever `now` is |
//! | [`Trigger::After`] | on the first `run_due` with `now >= deadline` |
//! | [`Trigger::AnimationEnd`] | on [`Scheduler::animation_ended`] for that id |
//!
//! # Invariants
//!
//! 1. Every task fires at most once; firing removes it.
//! 2. Due tasks fire in scheduling order.
//! 3. At most one task per [`DebounceKey`] is pending; rescheduling cancels
//!    the previous one.
//! 4. A cancelled token never fires, and cancelling twice is a no-op.

use rustc_hash::FxHashMap;
use std::time::Duration;

use crate::tree::ComponentId;

/// Identifies a running animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CancelToken(u64);

/// When a task becomes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Microtask,
    /// Absolute deadline on the host clock.
    After(Duration),
    AnimationEnd(AnimationId),
}

/// Coalescing key for debounced tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebounceKey {
    /// Per-component purpose, e.g. `(id, "resize")`.
    Component(ComponentId, &'static str),
    Named(&'static str),
}

#[derive(Debug)]
struct Entry<T> {
    token: CancelToken,
    trigger: Trigger,
    task: T,
}

/// Task queue driven by explicit time and animation events.
#[derive(Debug)]
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    debounced: FxHashMap<DebounceKey, CancelToken>,
    next_token: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            debounced: FxHashMap::default(),
            next_token: 0,
        }
    }

    /// Queue `task` for `trigger`.
    pub fn schedule(&mut self, trigger: Trigger, task: T) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token += 1;
        self.entries.push(Entry {
            token,
            trigger,
            task,
        });
        token
    }

    /// Queue `task` at `deadline`, replacing any pending task with `key`.
    pub fn schedule_debounced(&mut self, key: DebounceKey, deadline: Duration, task: T) -> CancelToken {
        if let Some(previous) = self.debounced.remove(&key) {
            self.cancel(previous);
        }
        let token = self.schedule(Trigger::After(deadline), task);
        self.debounced.insert(key, token);
        token
    }

    /// Remove a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.token != token);
        self.debounced.retain(|_, t| *t != token);
        self.entries.len() != before
    }

    /// True if `token` is still pending.
    #[must_use]
    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.entries.iter().any(|e| e.token == token)
    }

    /// Take every microtask and every deadline task due at `now`.
    pub fn run_due(&mut self, now: Duration) -> Vec<T> {
        self.take_where(|trigger| match trigger {
            Trigger::Microtask => true,
            Trigger::After(deadline) => deadline <= now,
            Trigger::AnimationEnd(_) => false,
        })
    }

    /// Take every task waiting for `animation` to end.
    pub fn animation_ended(&mut self, animation: AnimationId) -> Vec<T> {
        self.take_where(|trigger| trigger == Trigger::AnimationEnd(animation))
    }

    /// Earliest pending deadline, for hosts that sleep between turns.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries
            .iter()
            .filter_map(|e| match e.trigger {
                Trigger::After(deadline) => Some(deadline),
                _ => None,
            })
            .min()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn take_where(&mut self, due: impl Fn(Trigger) -> bool) -> Vec<T> {
        let (fired, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries).into_iter().partition(|e| due(e.trigger));
        self.entries = pending;
        if !fired.is_empty() {
            self.debounced
                .retain(|_, token| !fired.iter().any(|e| e.token == *token));
        }
        fired.into_iter().map(|e| e.task).collect()
    }
}

impl<T: PartialEq> Scheduler<T> {
    /// Queue `task` unless an equal task is already waiting on `trigger`.
    pub fn schedule_unique(&mut self, trigger: Trigger, task: T) -> CancelToken {
        if let Some(existing) = self
            .entries
            .iter()
            .find(|e| e.trigger == trigger && e.task == task)
        {
            return existing.token;
        }
        self.schedule(trigger, task)
    }
}
