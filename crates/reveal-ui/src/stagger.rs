//! # Staggered list
//!
//! A column of [`AnimatedWrapper`]s, one per item, each with
//! `trigger=visible` and `delay = index * stagger_delay`, so items reveal
//! sequentially as they scroll into view. Wrappers are fully independent;
//! there is no shared state across siblings.
//!
//! Delays are index-derived, not identity-derived: reordering a list
//! changes which delay an item gets, and removing an item shifts the
//! delays of everything after it.

use reveal_core::*;
use web_time::Duration;

use crate::{AnimatedWrapper, Column};

pub const DEFAULT_STAGGER_DELAY: Duration = Duration::from_millis(100);

/// One list entry: the content to reveal plus the viewport target the
/// render layer registered for it. Entries without a target never reveal.
pub struct StaggerItem {
    pub target: Option<TargetId>,
    pub content: View,
}

impl StaggerItem {
    pub fn new(target: TargetId, content: View) -> Self {
        Self {
            target: Some(target),
            content,
        }
    }
}

/// Staggered list with the default cadence (100 ms) and slide-up reveal.
#[allow(non_snake_case)]
pub fn StaggeredList(key: impl Into<String>, items: Vec<StaggerItem>) -> View {
    StaggeredListWith(key, items, DEFAULT_STAGGER_DELAY, AnimationKind::SlideUp)
}

#[allow(non_snake_case)]
pub fn StaggeredListWith(
    key: impl Into<String>,
    items: Vec<StaggerItem>,
    stagger_delay: Duration,
    kind: AnimationKind,
) -> View {
    let key = key.into();
    let children: Vec<View> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut config =
                AnimationConfig::new(kind, Trigger::Visible).delay(stagger_delay * index as u32);
            if let Some(target) = item.target {
                config = config.target(target);
            }
            AnimatedWrapper(format!("{key}:{index}"), config, item.content)
        })
        .collect();

    Column(Modifier::new()).with_children(children)
}
