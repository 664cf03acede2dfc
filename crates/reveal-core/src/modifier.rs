use std::rc::Rc;

use smallvec::SmallVec;
use web_time::Duration;

use crate::input::PointerEvent;

/// Transition timing handed to the rendering layer alongside the class
/// string: how long the visual transition runs and how long it waits
/// before starting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionStyle {
    pub duration: Duration,
    pub delay: Duration,
}

/// Presentation attributes and event bindings of one view node.
///
/// Classes are appended as whole token groups; `class_name` joins them
/// space-separated for the rendering layer.
#[derive(Clone, Default)]
pub struct Modifier {
    pub classes: SmallVec<[&'static str; 4]>,
    pub transition: Option<TransitionStyle>,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub on_pointer_enter: Option<Rc<dyn Fn(PointerEvent)>>,
    pub on_pointer_leave: Option<Rc<dyn Fn(PointerEvent)>>,
}

impl std::fmt::Debug for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Modifier")
            .field("classes", &self.classes)
            .field("transition", &self.transition)
            .field("on_click", &self.on_click.as_ref().map(|_| "..."))
            .field(
                "on_pointer_enter",
                &self.on_pointer_enter.as_ref().map(|_| "..."),
            )
            .field(
                "on_pointer_leave",
                &self.on_pointer_leave.as_ref().map(|_| "..."),
            )
            .finish()
    }
}

impl Modifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class token group. Empty strings are dropped so state
    /// classes that resolve to nothing cost nothing.
    pub fn class(mut self, class: &'static str) -> Self {
        if !class.is_empty() {
            self.classes.push(class);
        }
        self
    }

    pub fn transition(mut self, transition: TransitionStyle) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    pub fn on_pointer_enter(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_enter = Some(Rc::new(f));
        self
    }

    pub fn on_pointer_leave(mut self, f: impl Fn(PointerEvent) + 'static) -> Self {
        self.on_pointer_leave = Some(Rc::new(f));
        self
    }

    /// Space-joined class string for the rendering layer.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}
