//! # Composition runtime
//!
//! Keyed remember slots with sweep-on-unmount.
//!
//! A compose pass runs inside [`Runtime::compose`]. Every slot touched by
//! `remember_with_key` / `remember_scoped` during the pass survives; slots
//! *not* touched are swept when the pass ends, and sweeping runs their
//! [`Dispose`]. That sweep is the engine's unmount event: a node that
//! stops composing has its timers cancelled and its visibility
//! subscription disposed synchronously, before the next frame.
//!
//! The runtime also carries the frame facilities — [`Timers`] and the
//! [`Viewport`] — and installs them thread-locally for the duration of a
//! pass so composables can reach them without threading parameters through
//! every call.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use web_time::Duration;

use crate::effects::Dispose;
use crate::geometry::Rect;
use crate::observer::Viewport;
use crate::timer::Timers;
use crate::view::View;

thread_local! {
    static COMPOSER: RefCell<Composer> = RefCell::new(Composer::default());
}

#[derive(Clone, Default)]
struct Env {
    timers: Timers,
    viewport: Viewport,
}

struct Slot {
    value: Rc<dyn Any>,
    dispose: Option<Dispose>,
}

#[derive(Default)]
struct Composer {
    slots: HashMap<String, Slot>,
    touched: HashSet<String>,
    tracking: bool,
    env: Option<Env>,
}

/// Timer facility of the currently composing runtime. Outside a compose
/// pass this falls back to a thread-local default so stray calls stay
/// harmless.
pub fn timers() -> Timers {
    COMPOSER.with(|c| {
        c.borrow_mut()
            .env
            .get_or_insert_with(Env::default)
            .timers
            .clone()
    })
}

/// Viewport facility of the currently composing runtime.
pub fn viewport() -> Viewport {
    COMPOSER.with(|c| {
        c.borrow_mut()
            .env
            .get_or_insert_with(Env::default)
            .viewport
            .clone()
    })
}

/// Number of live remember slots on this thread. Mostly useful to assert
/// that unmounting actually released state.
pub fn live_slots() -> usize {
    COMPOSER.with(|c| c.borrow().slots.len())
}

enum Lookup<T> {
    Hit(Rc<T>),
    Stale(Option<Dispose>),
    Miss,
}

fn lookup_slot<T: 'static>(key: &str) -> Lookup<T> {
    COMPOSER.with(|c| {
        let mut c = c.borrow_mut();
        if c.tracking {
            c.touched.insert(key.to_string());
        }
        match c.slots.get(key) {
            Some(slot) => match slot.value.clone().downcast::<T>() {
                Ok(rc) => Lookup::Hit(rc),
                Err(_) => {
                    let old = c.slots.remove(key);
                    Lookup::Stale(old.and_then(|s| s.dispose))
                }
            },
            None => Lookup::Miss,
        }
    })
}

fn store_slot<T: 'static>(key: String, value: Rc<T>, dispose: Option<Dispose>) {
    COMPOSER.with(|c| {
        c.borrow_mut().slots.insert(
            key,
            Slot {
                value: value.clone(),
                dispose,
            },
        );
    });
}

/// Key-based remember: the same key always yields the same stored value
/// for as long as it keeps being composed.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    match lookup_slot::<T>(&key) {
        Lookup::Hit(rc) => return rc,
        Lookup::Stale(old) => {
            log::warn!("remember_with_key: key '{key}' reused with a different type; replacing.");
            // Run the displaced slot's cleanup so its resources don't leak.
            if let Some(d) = old {
                d.run();
            }
        }
        Lookup::Miss => {}
    }
    // init runs with the composer released: it may remember in turn.
    let rc = Rc::new(init());
    store_slot(key, rc.clone(), None);
    rc
}

/// Keyed remember whose init also wires the value's side effects. The
/// returned [`Dispose`] is owned by the slot and runs exactly once, when
/// the slot is swept (its node unmounted) or replaced.
pub fn remember_scoped<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> (T, Dispose),
) -> Rc<T> {
    let key = key.into();
    match lookup_slot::<T>(&key) {
        Lookup::Hit(rc) => return rc,
        Lookup::Stale(old) => {
            log::warn!("remember_scoped: key '{key}' reused with a different type; replacing.");
            if let Some(d) = old {
                d.run();
            }
        }
        Lookup::Miss => {}
    }
    let (value, dispose) = init();
    let rc = Rc::new(value);
    store_slot(key, rc.clone(), Some(dispose));
    rc
}

/// Marks one compose pass. Touch tracking starts at `begin`; dropping the
/// guard sweeps every slot the pass did not touch and runs its cleanup.
pub struct ComposeGuard {
    _private: (),
}

impl ComposeGuard {
    pub fn begin(runtime: &Runtime) -> Self {
        COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.touched.clear();
            c.tracking = true;
            c.env = Some(Env {
                timers: runtime.timers.clone(),
                viewport: runtime.viewport.clone(),
            });
        });
        ComposeGuard { _private: () }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        // Collect first, run after the borrow is released: a disposer may
        // tear down machinery that takes its own borrows.
        let disposers: Vec<Dispose> = COMPOSER.with(|c| {
            let mut c = c.borrow_mut();
            c.tracking = false;
            let stale: Vec<String> = c
                .slots
                .keys()
                .filter(|k| !c.touched.contains(*k))
                .cloned()
                .collect();
            stale
                .into_iter()
                .filter_map(|k| c.slots.remove(&k).and_then(|s| s.dispose))
                .collect()
        });
        for d in disposers {
            d.run();
        }
    }
}

/// Owns the frame facilities and drives compose passes and frame ticks.
#[derive(Default)]
pub struct Runtime {
    timers: Timers,
    viewport: Viewport,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(bounds: Rect) -> Self {
        Self {
            timers: Timers::new(),
            viewport: Viewport::new(bounds),
        }
    }

    pub fn timers(&self) -> Timers {
        self.timers.clone()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.clone()
    }

    /// Run one compose pass. Slots not touched by `build` are swept when
    /// the pass ends — that is when unmounted nodes release their timers
    /// and subscriptions.
    pub fn compose(&self, build: impl FnOnce() -> View) -> View {
        let _guard = ComposeGuard::begin(self);
        build()
    }

    /// One frame tick: advance the clock (firing due timers), then
    /// re-evaluate viewport visibility.
    pub fn advance(&self, dt: Duration) {
        self.timers.advance(dt);
        self.viewport.dispatch();
    }

    /// Scroll the viewport and re-evaluate watchers immediately.
    pub fn scroll_to(&self, bounds: Rect) {
        self.viewport.set_bounds(bounds);
        self.viewport.dispatch();
    }
}
