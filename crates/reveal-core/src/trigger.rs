//! # Trigger state machine
//!
//! Each animated node owns one [`TriggerState`]: a two-phase machine
//! (`Idle` / `Active`) advanced by the node's trigger strategy.
//!
//! - `Mount` — Active at mount, or after one scheduled delay. Latches.
//! - `Hover` — Active exactly while the pointer is inside. Reversible.
//! - `Click` — Active on click; one revert timer flips it back after
//!   `duration`. Re-clicking cancels and reschedules, so two revert timers
//!   are never pending at once.
//! - `Visible` — one viewport subscription, disposed on its first fire,
//!   then one scheduled delay, then Active. Latches.
//!
//! Resource discipline: at most one live timer and at most one live
//! subscription per instance, both owned here as nullable handles and both
//! released by [`TriggerState::teardown`]. Timer and visibility callbacks
//! hold only a `Weak` back-reference, so anything that fires after the
//! owning node is gone upgrades to nothing and is a no-op.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::config::{AnimationConfig, Trigger};
use crate::observer::{VISIBLE_THRESHOLD, Viewport, VisibilityHandle, VisibilityObserver};
use crate::timer::{TimerHandle, Timers};

/// Logical animation state of one instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Active,
}

struct MachineInner {
    config: AnimationConfig,
    phase: Cell<Phase>,
    mounted: Cell<bool>,
    torn_down: Cell<bool>,
    /// At most one outstanding timer: mount delay, visible delay, or click
    /// revert, depending on the trigger.
    pending: RefCell<Option<TimerHandle>>,
    /// Exists only for `Visible`, and only until the first qualifying
    /// dispatch.
    subscription: RefCell<Option<VisibilityHandle>>,
}

impl MachineInner {
    fn activate(&self) {
        self.phase.set(Phase::Active);
    }

    fn deactivate(&self) {
        self.phase.set(Phase::Idle);
    }
}

/// Cheap-to-clone handle to one instance's machine. Clones share state;
/// the last owner dropping it after [`TriggerState::teardown`] releases
/// everything.
#[derive(Clone)]
pub struct TriggerState {
    inner: Rc<MachineInner>,
}

impl TriggerState {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            inner: Rc::new(MachineInner {
                config,
                phase: Cell::new(Phase::Idle),
                mounted: Cell::new(false),
                torn_down: Cell::new(false),
                pending: RefCell::new(None),
                subscription: RefCell::new(None),
            }),
        }
    }

    /// Wire the trigger's side effects. Runs once per instance; repeated
    /// calls are no-ops so a stray remount cannot double-schedule.
    pub fn mount(&self, timers: &Timers, viewport: &Viewport) {
        if self.inner.mounted.replace(true) || self.inner.torn_down.get() {
            return;
        }
        match self.inner.config.trigger {
            Trigger::Mount => {
                if self.inner.config.delay.is_zero() {
                    // No timer: active on the very first render.
                    self.inner.activate();
                    return;
                }
                let handle = schedule_phase_change(
                    timers,
                    &self.inner,
                    self.inner.config.delay,
                    Phase::Active,
                );
                *self.inner.pending.borrow_mut() = Some(handle);
            }
            // Purely event-driven; the owning node feeds pointer events in.
            Trigger::Hover | Trigger::Click => {}
            Trigger::Visible => {
                let Some(target) = self.inner.config.target else {
                    log::warn!("visible trigger without a target; node will stay hidden");
                    return;
                };
                let weak = Rc::downgrade(&self.inner);
                let timers = timers.clone();
                let attached =
                    VisibilityObserver::attach(viewport, target, VISIBLE_THRESHOLD, move || {
                        if let Some(inner) = weak.upgrade() {
                            on_target_visible(&inner, &timers);
                        }
                    });
                match attached {
                    Some(handle) => *self.inner.subscription.borrow_mut() = Some(handle),
                    None => {
                        log::warn!("visibility target is not registered; node will stay hidden")
                    }
                }
            }
        }
    }

    /// Pointer entered the node. Meaningful for `Hover` only.
    pub fn pointer_enter(&self) {
        if self.inner.config.trigger == Trigger::Hover && !self.inner.torn_down.get() {
            self.inner.activate();
        }
    }

    /// Pointer left the node. Meaningful for `Hover` only.
    pub fn pointer_leave(&self) {
        if self.inner.config.trigger == Trigger::Hover && !self.inner.torn_down.get() {
            self.inner.deactivate();
        }
    }

    /// Click received. Activates immediately and (re)arms the revert
    /// timer; cancel-before-schedule keeps a single revert pending no
    /// matter how fast clicks arrive.
    pub fn click(&self, timers: &Timers) {
        if self.inner.config.trigger != Trigger::Click || self.inner.torn_down.get() {
            return;
        }
        if let Some(prev) = self.inner.pending.borrow_mut().take() {
            prev.cancel();
        }
        self.inner.activate();
        let handle =
            schedule_phase_change(timers, &self.inner, self.inner.config.duration, Phase::Idle);
        *self.inner.pending.borrow_mut() = Some(handle);
    }

    pub fn phase(&self) -> Phase {
        self.inner.phase.get()
    }

    pub fn is_active(&self) -> bool {
        self.inner.phase.get() == Phase::Active
    }

    /// Presentation class for the current frame.
    pub fn class_name(&self) -> &'static str {
        self.inner.config.kind.resolve(self.is_active())
    }

    pub fn config(&self) -> AnimationConfig {
        self.inner.config
    }

    /// True while a scheduled callback is outstanding.
    pub fn has_pending_timer(&self) -> bool {
        self.inner
            .pending
            .borrow()
            .as_ref()
            .is_some_and(|t| t.is_pending())
    }

    /// True while the visibility subscription is attached and unfired.
    pub fn is_observing(&self) -> bool {
        self.inner
            .subscription
            .borrow()
            .as_ref()
            .is_some_and(|s| !s.is_spent())
    }

    /// Cancel the pending timer and dispose the subscription. Idempotent;
    /// runs synchronously when the owning node unmounts.
    pub fn teardown(&self) {
        if self.inner.torn_down.replace(true) {
            return;
        }
        if let Some(timer) = self.inner.pending.borrow_mut().take() {
            timer.cancel();
        }
        if let Some(subscription) = self.inner.subscription.borrow_mut().take() {
            subscription.dispose();
        }
    }
}

/// One-shot timer that moves the machine to `phase`, guarded against the
/// instance being torn down between scheduling and firing.
fn schedule_phase_change(
    timers: &Timers,
    inner: &Rc<MachineInner>,
    delay: web_time::Duration,
    phase: Phase,
) -> TimerHandle {
    let weak: Weak<MachineInner> = Rc::downgrade(inner);
    timers.schedule(delay, move || {
        let Some(inner) = weak.upgrade() else { return };
        if inner.torn_down.get() {
            return;
        }
        inner.pending.borrow_mut().take();
        inner.phase.set(phase);
    })
}

/// First (and only) qualifying visibility dispatch for this instance: the
/// raw watcher is already detached; arm the delay timer, or latch straight
/// to Active when there is none.
fn on_target_visible(inner: &Rc<MachineInner>, timers: &Timers) {
    if inner.torn_down.get() {
        return;
    }
    inner.subscription.borrow_mut().take();
    if inner.config.delay.is_zero() {
        inner.activate();
        return;
    }
    let handle = schedule_phase_change(timers, inner, inner.config.delay, Phase::Active);
    *inner.pending.borrow_mut() = Some(handle);
}
