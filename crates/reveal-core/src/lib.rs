//! # Trigger engine, timers, and visibility
//!
//! Reveal decides *when* a view node's appearance class changes and keeps
//! that decision leak-free across the node's lifetime. There are four
//! main pieces:
//!
//! - [`AnimationKind`] / the catalog — static mapping from an animation
//!   kind to its active/inactive presentation classes.
//! - [`TriggerState`] — per-instance `Idle`/`Active` machine driven by one
//!   of four trigger strategies (mount, hover, click, visible).
//! - [`Timers`] and [`Viewport`] — the frame facilities: cancellable
//!   one-shot timers on a virtual clock, and an intersection-ratio
//!   visibility registry with a one-shot [`VisibilityObserver`] adapter.
//! - The composition runtime — keyed `remember` slots that are swept when
//!   a node stops composing, releasing its timers and subscriptions.
//!
//! ## Driving a machine directly
//!
//! ```rust
//! use reveal_core::*;
//! use web_time::Duration;
//!
//! let timers = Timers::new();
//! let viewport = Viewport::default();
//!
//! let state = TriggerState::new(
//!     AnimationConfig::new(AnimationKind::FadeIn, Trigger::Mount).delay_ms(200),
//! );
//! state.mount(&timers, &viewport);
//! assert_eq!(state.class_name(), "opacity-0");
//!
//! timers.advance(Duration::from_millis(200));
//! assert_eq!(state.class_name(), "animate-fade-in");
//! ```
//!
//! ## Composing
//!
//! Higher layers (`reveal-ui`) remember one machine per node inside
//! [`Runtime::compose`] and let the slot sweep handle teardown:
//!
//! ```rust
//! use reveal_core::*;
//!
//! let runtime = Runtime::new();
//! let view = runtime.compose(|| {
//!     // composables run here; un-composed slots are swept on exit
//!     View::new(ViewKind::Box)
//! });
//! assert!(view.class_name().is_empty());
//! ```
//!
//! Everything is single-threaded and frame-driven: the platform loop calls
//! [`Runtime::advance`] once per tick, which fires due timers and
//! re-evaluates viewport visibility. Tests drive the same entry points
//! with arbitrary steps, which makes every delay deterministic.

pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod input;
pub mod modifier;
pub mod observer;
pub mod prelude;
pub mod runtime;
pub mod tests;
pub mod timer;
pub mod trigger;
pub mod view;

pub use catalog::*;
pub use config::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use modifier::*;
pub use observer::*;
pub use prelude::*;
pub use runtime::*;
pub use timer::*;
pub use trigger::*;
pub use view::*;
