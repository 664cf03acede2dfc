//! # Viewport visibility
//!
//! Two layers, mirroring how a host platform exposes intersection
//! observation:
//!
//! - [`Viewport`] — the raw facility: a registry of observable target
//!   rects plus watchers that fire whenever their target's visible area
//!   ratio meets a threshold. Dispatch is explicit and frame-driven; a
//!   watcher whose target stays visible fires on every dispatch.
//! - [`VisibilityObserver`] — the adapter the engine actually uses: it
//!   turns the raw stream into a single idempotent "became visible" event
//!   per instance. The watcher is removed no later than the first
//!   qualifying dispatch, and a disposed handle suppresses a callback that
//!   was already in flight.
//!
//! Targets are identified by [`TargetId`], a typed handle issued at
//! registration time. Observing an id that was never registered (or has
//! been unregistered since) attaches nothing; the caller stays idle and
//! the degradation is observable rather than an error.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};

use crate::geometry::Rect;

/// Fraction of a target's area that must be inside the viewport before it
/// counts as visible.
pub const VISIBLE_THRESHOLD: f32 = 0.1;

new_key_type! { pub struct TargetId; }
new_key_type! { struct WatchKey; }

struct Watcher {
    target: TargetId,
    threshold: f32,
    callback: Rc<dyn Fn()>,
}

struct ViewportInner {
    bounds: Rect,
    targets: SlotMap<TargetId, Rect>,
    watchers: SlotMap<WatchKey, Watcher>,
}

/// Registry of observable targets for one logical viewport.
#[derive(Clone)]
pub struct Viewport {
    inner: Rc<RefCell<ViewportInner>>,
}

impl Viewport {
    pub fn new(bounds: Rect) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ViewportInner {
                bounds,
                targets: SlotMap::with_key(),
                watchers: SlotMap::with_key(),
            })),
        }
    }

    /// Register a rendered element's rect; the returned id is the handle
    /// a configuration threads into the engine.
    pub fn register_target(&self, rect: Rect) -> TargetId {
        self.inner.borrow_mut().targets.insert(rect)
    }

    /// Forget a target. Watchers on it stop firing but stay attached until
    /// disposed by their owner.
    pub fn unregister_target(&self, id: TargetId) {
        self.inner.borrow_mut().targets.remove(id);
    }

    /// Update a target's rect after layout moved it.
    pub fn set_target_rect(&self, id: TargetId, rect: Rect) {
        if let Some(slot) = self.inner.borrow_mut().targets.get_mut(id) {
            *slot = rect;
        }
    }

    pub fn contains_target(&self, id: TargetId) -> bool {
        self.inner.borrow().targets.contains_key(id)
    }

    /// Move the viewport (scrolling). Takes effect on the next
    /// [`Viewport::dispatch`].
    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.borrow_mut().bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.inner.borrow().bounds
    }

    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }

    /// Attach a raw watcher. Returns `None` when the target is unknown, so
    /// the caller can degrade instead of holding a dead subscription.
    pub fn observe(
        &self,
        target: TargetId,
        threshold: f32,
        f: impl Fn() + 'static,
    ) -> Option<WatchHandle> {
        let mut inner = self.inner.borrow_mut();
        if !inner.targets.contains_key(target) {
            return None;
        }
        let key = inner.watchers.insert(Watcher {
            target,
            threshold,
            callback: Rc::new(f),
        });
        Some(WatchHandle {
            key,
            viewport: Rc::downgrade(&self.inner),
        })
    }

    /// Evaluate every watcher against the current bounds and fire those
    /// whose target meets its threshold. Callbacks run after the registry
    /// borrow is released, so they may attach or dispose watchers freely.
    pub fn dispatch(&self) {
        let fired: Vec<Rc<dyn Fn()>> = {
            let inner = self.inner.borrow();
            inner
                .watchers
                .values()
                .filter(|w| {
                    inner
                        .targets
                        .get(w.target)
                        .is_some_and(|rect| rect.visible_ratio(&inner.bounds) >= w.threshold)
                })
                .map(|w| w.callback.clone())
                .collect()
        };
        for callback in fired {
            callback();
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 1280.0, 800.0))
    }
}

/// Raw watcher handle; disposing detaches the watcher from the registry.
pub struct WatchHandle {
    key: WatchKey,
    viewport: Weak<RefCell<ViewportInner>>,
}

impl WatchHandle {
    /// Idempotent detach.
    pub fn dispose(&self) {
        if let Some(inner) = self.viewport.upgrade() {
            inner.borrow_mut().watchers.remove(self.key);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.viewport
            .upgrade()
            .is_some_and(|v| v.borrow().watchers.contains_key(self.key))
    }
}

/// One-shot "became visible" adapter over the raw watcher stream.
pub struct VisibilityObserver;

impl VisibilityObserver {
    /// Attach `on_visible` to fire exactly once, the first time `target`'s
    /// visible ratio reaches `threshold`. Returns `None` when the target
    /// cannot be located.
    ///
    /// The raw watcher detaches itself during the first qualifying
    /// dispatch, before `on_visible` runs. Disposing the returned handle
    /// first wins the race: a dispatch already in flight checks the
    /// disposed flag immediately before delivering and becomes a no-op.
    pub fn attach(
        viewport: &Viewport,
        target: TargetId,
        threshold: f32,
        on_visible: impl FnOnce() + 'static,
    ) -> Option<VisibilityHandle> {
        let disposed = Rc::new(Cell::new(false));
        let raw: Rc<RefCell<Option<WatchHandle>>> = Rc::new(RefCell::new(None));

        let callback = RefCell::new(Some(on_visible));
        let watch = viewport.observe(target, threshold, {
            let disposed = disposed.clone();
            let raw = raw.clone();
            move || {
                if disposed.replace(true) {
                    return;
                }
                if let Some(handle) = raw.borrow_mut().take() {
                    handle.dispose();
                }
                if let Some(f) = callback.borrow_mut().take() {
                    f();
                }
            }
        })?;
        *raw.borrow_mut() = Some(watch);

        Some(VisibilityHandle { disposed, raw })
    }
}

/// Handle for one attached [`VisibilityObserver`] subscription.
pub struct VisibilityHandle {
    disposed: Rc<Cell<bool>>,
    raw: Rc<RefCell<Option<WatchHandle>>>,
}

impl VisibilityHandle {
    /// Idempotent; guarantees no `on_visible` delivery afterwards, even if
    /// a dispatch was already queued.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(handle) = self.raw.borrow_mut().take() {
            handle.dispose();
        }
    }

    /// True once the callback fired or the handle was disposed.
    pub fn is_spent(&self) -> bool {
        self.disposed.get()
    }
}
