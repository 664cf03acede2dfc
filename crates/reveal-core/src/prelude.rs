pub use crate::catalog::{AnimationClasses, AnimationKind};
pub use crate::config::{AnimationConfig, Trigger};
pub use crate::effects::{Dispose, on_unmount};
pub use crate::error::ConfigError;
pub use crate::geometry::{Rect, Vec2};
pub use crate::input::{PointerEvent, PointerEventKind};
pub use crate::modifier::{Modifier, TransitionStyle};
pub use crate::observer::{
    TargetId, VISIBLE_THRESHOLD, Viewport, VisibilityHandle, VisibilityObserver, WatchHandle,
};
pub use crate::runtime::{
    ComposeGuard, Runtime, live_slots, remember_scoped, remember_with_key, timers, viewport,
};
pub use crate::timer::{TimerHandle, Timers};
pub use crate::trigger::{Phase, TriggerState};
pub use crate::view::{View, ViewKind};
