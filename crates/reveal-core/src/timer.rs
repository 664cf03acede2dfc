//! # One-shot timers
//!
//! `Timers` is the engine's scheduling facility: single-threaded,
//! cancellable one-shot callbacks on a virtual clock. The platform loop
//! advances the clock once per frame with [`Timers::advance`]; tests drive
//! it with arbitrary steps, which is what makes every delay in the engine
//! deterministic to test.
//!
//! A [`TimerHandle`] owns nothing but the right to cancel. Cancelling is
//! idempotent, cancelling after the callback fired is a no-op, and a handle
//! outliving its `Timers` is harmless (it holds a weak reference).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use web_time::Duration;

new_key_type! { pub struct TimerKey; }

struct TimerEntry {
    deadline: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    now: Duration,
    entries: SlotMap<TimerKey, TimerEntry>,
}

#[derive(Clone, Default)]
pub struct Timers {
    inner: Rc<RefCell<TimerQueue>>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since this queue was created.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of callbacks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Schedule `f` to run once, `delay` from now.
    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerHandle {
        let mut queue = self.inner.borrow_mut();
        let deadline = queue.now + delay;
        let key = queue.entries.insert(TimerEntry {
            deadline,
            callback: Box::new(f),
        });
        TimerHandle {
            key,
            queue: Rc::downgrade(&self.inner),
        }
    }

    /// Advance the clock by `dt` and fire every callback whose deadline has
    /// passed, in deadline order. Callbacks may schedule new timers; those
    /// are fired in the same call if they are already due.
    pub fn advance(&self, dt: Duration) {
        {
            let mut queue = self.inner.borrow_mut();
            queue.now += dt;
        }
        loop {
            // Collect due entries first: callbacks must run without the
            // queue borrowed, and may themselves mutate the queue.
            let due: Vec<(TimerKey, Duration)> = {
                let queue = self.inner.borrow();
                let mut due: Vec<_> = queue
                    .entries
                    .iter()
                    .filter(|(_, e)| e.deadline <= queue.now)
                    .map(|(k, e)| (k, e.deadline))
                    .collect();
                due.sort_by(|a, b| a.1.cmp(&b.1));
                due
            };
            if due.is_empty() {
                return;
            }
            for (key, _) in due {
                let entry = self.inner.borrow_mut().entries.remove(key);
                if let Some(entry) = entry {
                    (entry.callback)();
                }
            }
        }
    }
}

/// Cancellation handle for one scheduled callback.
pub struct TimerHandle {
    key: TimerKey,
    queue: Weak<RefCell<TimerQueue>>,
}

impl TimerHandle {
    /// Remove the callback from the queue. Safe to call any number of
    /// times, before or after the timer fired.
    pub fn cancel(&self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().entries.remove(self.key);
        }
    }

    /// True while the callback is still scheduled.
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .is_some_and(|q| q.borrow().entries.contains_key(self.key))
    }
}
