#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use web_time::Duration;

    use crate::catalog::AnimationKind;
    use crate::config::{AnimationConfig, Trigger};
    use crate::effects::Dispose;
    use crate::error::ConfigError;
    use crate::geometry::Rect;
    use crate::observer::{VisibilityHandle, VisibilityObserver, Viewport};
    use crate::runtime::{Runtime, live_slots, remember_scoped, remember_with_key};
    use crate::timer::Timers;
    use crate::trigger::{Phase, TriggerState};
    use crate::view::{View, ViewKind};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_catalog_total_over_kinds() {
        let kinds = [
            AnimationKind::FadeIn,
            AnimationKind::SlideUp,
            AnimationKind::SlideDown,
            AnimationKind::ScaleIn,
            AnimationKind::Heartbeat,
            AnimationKind::None,
        ];
        for kind in kinds {
            // resolve never panics and both states map somewhere
            let _ = kind.resolve(false);
            let _ = kind.resolve(true);
        }
        assert_eq!(AnimationKind::FadeIn.resolve(false), "opacity-0");
        assert_eq!(AnimationKind::FadeIn.resolve(true), "animate-fade-in");
        assert_eq!(AnimationKind::None.resolve(true), "");
        assert_eq!(AnimationKind::None.resolve(false), "");
    }

    #[test]
    fn test_heartbeat_ignores_state() {
        assert_eq!(AnimationKind::Heartbeat.resolve(false), "animate-heartbeat");
        assert_eq!(AnimationKind::Heartbeat.resolve(true), "animate-heartbeat");
    }

    #[test]
    fn test_parse_degrades_not_fails() {
        assert_eq!("slide-up".parse::<AnimationKind>(), Ok(AnimationKind::SlideUp));
        assert_eq!(
            "sparkle".parse::<AnimationKind>(),
            Err(ConfigError::UnknownKind("sparkle".into()))
        );
        assert_eq!(AnimationKind::parse_lossy("sparkle"), AnimationKind::None);

        assert_eq!("visible".parse::<Trigger>(), Ok(Trigger::Visible));
        assert_eq!(
            "wobble".parse::<Trigger>(),
            Err(ConfigError::UnknownTrigger("wobble".into()))
        );
        assert_eq!(Trigger::parse_lossy("wobble"), Trigger::Mount);
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let timers = Timers::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for delay in [30u64, 10, 20] {
            let order = order.clone();
            timers.schedule(ms(delay), move || order.borrow_mut().push(delay));
        }
        timers.advance(ms(40));
        assert_eq!(*order.borrow(), vec![10, 20, 30]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_timer_cancel_is_idempotent() {
        let timers = Timers::new();
        let fired = Rc::new(Cell::new(false));
        let handle = timers.schedule(ms(10), {
            let fired = fired.clone();
            move || fired.set(true)
        });
        handle.cancel();
        handle.cancel();
        timers.advance(ms(20));
        assert!(!fired.get());
        assert!(!handle.is_pending());

        // cancelling after the fire is equally a no-op
        let handle = timers.schedule(ms(10), || {});
        timers.advance(ms(10));
        handle.cancel();
    }

    #[test]
    fn test_timer_callback_may_schedule() {
        let timers = Timers::new();
        let fired = Rc::new(Cell::new(0u32));
        timers.schedule(ms(10), {
            let timers = timers.clone();
            let fired = fired.clone();
            move || {
                fired.set(fired.get() + 1);
                let fired = fired.clone();
                timers.schedule(ms(10), move || fired.set(fired.get() + 1));
            }
        });
        timers.advance(ms(10));
        assert_eq!(fired.get(), 1);
        timers.advance(ms(10));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_mount_zero_delay_active_on_first_render() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state =
            TriggerState::new(AnimationConfig::new(AnimationKind::FadeIn, Trigger::Mount));
        state.mount(&timers, &viewport);
        assert_eq!(state.phase(), Phase::Active);
        assert_eq!(state.class_name(), "animate-fade-in");
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_mount_delay_holds_until_deadline() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::FadeIn, Trigger::Mount).delay_ms(200),
        );
        state.mount(&timers, &viewport);
        assert_eq!(timers.pending(), 1);

        timers.advance(ms(199));
        assert_eq!(state.phase(), Phase::Idle);
        timers.advance(ms(1));
        assert_eq!(state.phase(), Phase::Active);
        assert!(!state.has_pending_timer());
    }

    #[test]
    fn test_mount_timer_cancelled_on_teardown() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::FadeIn, Trigger::Mount).delay_ms(200),
        );
        state.mount(&timers, &viewport);

        timers.advance(ms(100));
        state.teardown();
        assert_eq!(timers.pending(), 0);

        // nothing mutates at the originally scheduled deadline
        timers.advance(ms(200));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_hover_tracks_pointer_and_never_schedules() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state =
            TriggerState::new(AnimationConfig::new(AnimationKind::ScaleIn, Trigger::Hover));
        state.mount(&timers, &viewport);

        assert_eq!(state.class_name(), "opacity-0 scale-95");
        state.pointer_enter();
        assert_eq!(state.class_name(), "animate-scale-in");
        state.pointer_leave();
        assert_eq!(state.class_name(), "opacity-0 scale-95");
        state.pointer_enter();
        assert!(state.is_active());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_click_auto_reverts_after_duration() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::FadeIn, Trigger::Click).duration_ms(300),
        );
        state.mount(&timers, &viewport);

        state.click(&timers);
        assert!(state.is_active());
        timers.advance(ms(299));
        assert!(state.is_active());
        timers.advance(ms(1));
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_rapid_clicks_keep_single_revert_timer() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::FadeIn, Trigger::Click).duration_ms(300),
        );
        state.mount(&timers, &viewport);

        state.click(&timers);
        timers.advance(ms(200));
        state.click(&timers); // restarts the countdown at t=200
        assert_eq!(timers.pending(), 1);

        // original deadline passes with no revert
        timers.advance(ms(100));
        assert!(state.is_active());
        // full duration from the second click
        timers.advance(ms(200));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_visible_without_target_stays_idle() {
        let timers = Timers::new();
        let viewport = Viewport::default();
        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::SlideUp, Trigger::Visible).delay_ms(50),
        );
        state.mount(&timers, &viewport);

        assert!(!state.is_observing());
        viewport.dispatch();
        timers.advance(ms(1_000));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_visible_with_unregistered_target_stays_idle() {
        let timers = Timers::new();
        let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let target = viewport.register_target(Rect::new(0.0, 0.0, 50.0, 50.0));
        viewport.unregister_target(target);

        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::SlideUp, Trigger::Visible).target(target),
        );
        state.mount(&timers, &viewport);

        assert!(!state.is_observing());
        viewport.dispatch();
        timers.advance(ms(1_000));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_visible_activates_after_delay_from_callback() {
        let timers = Timers::new();
        let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        // starts below the fold
        let target = viewport.register_target(Rect::new(0.0, 300.0, 100.0, 50.0));

        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::SlideUp, Trigger::Visible)
                .delay_ms(80)
                .target(target),
        );
        state.mount(&timers, &viewport);
        assert!(state.is_observing());
        assert!(!state.has_pending_timer());

        viewport.dispatch();
        assert_eq!(state.phase(), Phase::Idle);

        // scroll it into view: subscription is spent, delay timer armed
        viewport.set_bounds(Rect::new(0.0, 250.0, 100.0, 100.0));
        viewport.dispatch();
        assert!(!state.is_observing());
        assert!(state.has_pending_timer());
        assert_eq!(viewport.watcher_count(), 0);

        timers.advance(ms(79));
        assert_eq!(state.phase(), Phase::Idle);
        timers.advance(ms(1));
        assert_eq!(state.phase(), Phase::Active);
        // latched: scrolling away never reverts
        viewport.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        viewport.dispatch();
        assert_eq!(state.phase(), Phase::Active);
    }

    #[test]
    fn test_visibility_callback_fires_at_most_once() {
        let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let target = viewport.register_target(Rect::new(0.0, 0.0, 100.0, 100.0));
        let count = Rc::new(Cell::new(0u32));
        let handle = VisibilityObserver::attach(&viewport, target, 0.1, {
            let count = count.clone();
            move || count.set(count.get() + 1)
        })
        .unwrap();

        viewport.dispatch();
        viewport.dispatch();
        viewport.dispatch();
        assert_eq!(count.get(), 1);
        assert_eq!(viewport.watcher_count(), 0);
        assert!(handle.is_spent());
    }

    #[test]
    fn test_visibility_threshold_is_ten_percent_inclusive() {
        let viewport = Viewport::new(Rect::new(0.0, 95.0, 100.0, 100.0));
        let target = viewport.register_target(Rect::new(0.0, 0.0, 100.0, 100.0));
        let count = Rc::new(Cell::new(0u32));
        let _handle = VisibilityObserver::attach(&viewport, target, 0.1, {
            let count = count.clone();
            move || count.set(count.get() + 1)
        })
        .unwrap();

        // 5% visible: below threshold
        viewport.dispatch();
        assert_eq!(count.get(), 0);

        // exactly 10% visible: fires
        viewport.set_bounds(Rect::new(0.0, 90.0, 100.0, 100.0));
        viewport.dispatch();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_visibility_dispose_is_idempotent() {
        let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let target = viewport.register_target(Rect::new(0.0, 0.0, 100.0, 100.0));
        let count = Rc::new(Cell::new(0u32));
        let handle = VisibilityObserver::attach(&viewport, target, 0.1, {
            let count = count.clone();
            move || count.set(count.get() + 1)
        })
        .unwrap();

        handle.dispose();
        handle.dispose();
        viewport.dispatch();
        assert_eq!(count.get(), 0);
        assert_eq!(viewport.watcher_count(), 0);
    }

    #[test]
    fn test_visibility_dispose_beats_inflight_callback() {
        // Both watchers qualify in the same dispatch; the first one
        // disposes the second's handle before its callback is delivered.
        let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let target = viewport.register_target(Rect::new(0.0, 0.0, 100.0, 100.0));

        let second: Rc<RefCell<Option<VisibilityHandle>>> = Rc::new(RefCell::new(None));
        let _first = viewport
            .observe(target, 0.1, {
                let second = second.clone();
                move || {
                    if let Some(handle) = second.borrow_mut().take() {
                        handle.dispose();
                    }
                }
            })
            .unwrap();

        let fired = Rc::new(Cell::new(0u32));
        let handle = VisibilityObserver::attach(&viewport, target, 0.1, {
            let fired = fired.clone();
            move || fired.set(fired.get() + 1)
        })
        .unwrap();
        *second.borrow_mut() = Some(handle);

        viewport.dispatch();
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let timers = Timers::new();
        let viewport = Viewport::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let target = viewport.register_target(Rect::new(0.0, 300.0, 100.0, 50.0));
        let state = TriggerState::new(
            AnimationConfig::new(AnimationKind::FadeIn, Trigger::Visible)
                .delay_ms(10)
                .target(target),
        );
        state.mount(&timers, &viewport);
        assert_eq!(viewport.watcher_count(), 1);

        state.teardown();
        state.teardown();
        assert_eq!(viewport.watcher_count(), 0);
        assert_eq!(timers.pending(), 0);

        // a torn-down machine ignores everything
        state.pointer_enter();
        state.click(&timers);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_remember_with_key_is_stable() {
        let runtime = Runtime::new();
        let first = Rc::new(Cell::new(0i32));
        let second = Rc::new(Cell::new(0i32));
        runtime.compose(|| {
            let v = remember_with_key("stable", || 42);
            first.set(*v);
            View::new(ViewKind::Box)
        });
        runtime.compose(|| {
            let v = remember_with_key("stable", || 100);
            second.set(*v);
            View::new(ViewKind::Box)
        });
        assert_eq!(first.get(), 42);
        assert_eq!(second.get(), 42); // not 100: the slot survived
    }

    #[test]
    fn test_sweep_disposes_unmounted_slots() {
        let runtime = Runtime::new();
        let disposed = Rc::new(Cell::new(false));

        runtime.compose(|| {
            let disposed = disposed.clone();
            remember_scoped("node", move || {
                ((), Dispose::new(move || disposed.set(true)))
            });
            View::new(ViewKind::Box)
        });
        assert!(!disposed.get());
        assert_eq!(live_slots(), 1);

        // the slot is not composed this frame: swept, cleanup runs
        runtime.compose(|| View::new(ViewKind::Box));
        assert!(disposed.get());
        assert_eq!(live_slots(), 0);
    }

    #[test]
    fn test_scoped_init_runs_once_while_composed() {
        let runtime = Runtime::new();
        let inits = Rc::new(Cell::new(0u32));
        for _ in 0..3 {
            let inits = inits.clone();
            runtime.compose(move || {
                remember_scoped("once", move || {
                    inits.set(inits.get() + 1);
                    ((), Dispose::new(|| {}))
                });
                View::new(ViewKind::Box)
            });
        }
        assert_eq!(inits.get(), 1);
    }

    #[test]
    fn test_dispose_runs_at_most_once() {
        let count = Rc::new(Cell::new(0u32));
        let dispose = Dispose::new({
            let count = count.clone();
            move || count.set(count.get() + 1)
        });
        assert!(!dispose.is_spent());
        dispose.run();
        dispose.run();
        assert_eq!(count.get(), 1);
        assert!(dispose.is_spent());
    }

    #[test]
    fn test_rect_visible_ratio() {
        let target = Rect::new(0.0, 200.0, 100.0, 50.0);
        let viewport = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(target.visible_ratio(&viewport), 0.0);

        let overlapping = Rect::new(0.0, 225.0, 100.0, 100.0);
        assert!((target.visible_ratio(&overlapping) - 0.5).abs() < 1e-6);

        let covering = Rect::new(0.0, 150.0, 100.0, 200.0);
        assert!((target.visible_ratio(&covering) - 1.0).abs() < 1e-6);
    }
}
