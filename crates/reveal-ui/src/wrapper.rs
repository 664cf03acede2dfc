//! # Animated wrapper
//!
//! `AnimatedWrapper` is the node the rest of an app composes: it owns one
//! [`TriggerState`], resolves the class string for the current frame, and
//! installs exactly the bindings its trigger needs. Instance state lives
//! in a keyed remember slot; when the node stops composing, the slot sweep
//! tears the machine down and every timer and subscription goes with it.

use reveal_core::*;
use web_time::Duration;

use crate::ViewExt;

/// Classes every animated node carries so class changes transition instead
/// of snapping.
pub const TRANSITION_BASE: &str = "transition-all";

/// Wrap `child` in a node whose appearance class follows `config`.
///
/// `key` must be stable across frames and unique among live wrappers; the
/// configuration is captured when the instance first composes and holds
/// for its lifetime. Changing `trigger` under the same key re-keys the
/// slot, so the old instance is torn down and a fresh one mounted.
#[allow(non_snake_case)]
pub fn AnimatedWrapper(key: impl Into<String>, config: AnimationConfig, child: View) -> View {
    let key = key.into();
    let state = remember_scoped(format!("reveal:wrapper:{key}:{:?}", config.trigger), || {
        let state = TriggerState::new(config);
        state.mount(&timers(), &viewport());
        let guard = state.clone();
        (state, on_unmount(move || guard.teardown()))
    });

    let transition = TransitionStyle {
        duration: config.duration,
        // only mount waits before the visual transition itself starts;
        // visible's delay runs in the machine, relative to the callback
        delay: match config.trigger {
            Trigger::Mount => config.delay,
            _ => Duration::ZERO,
        },
    };

    let mut modifier = Modifier::new()
        .class(TRANSITION_BASE)
        .class(state.class_name())
        .transition(transition);

    match config.trigger {
        Trigger::Hover => {
            let enter = state.clone();
            let leave = state.clone();
            modifier = modifier
                .on_pointer_enter(move |_| enter.pointer_enter())
                .on_pointer_leave(move |_| leave.pointer_leave());
        }
        Trigger::Click => {
            let clicked = state.clone();
            let timers = timers();
            modifier = modifier.on_click(move || clicked.click(&timers));
        }
        Trigger::Mount | Trigger::Visible => {}
    }

    View::new(ViewKind::Box).modifier(modifier).child(child)
}
