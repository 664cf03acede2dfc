//! # Animation catalog
//!
//! Static mapping from an [`AnimationKind`] to the presentation classes of
//! its two visual states. The mapping is pure data: the active class plays
//! the entry animation, the inactive class holds the hidden state the
//! animation starts from.
//!
//! `Heartbeat` is special: it has no inactive class and keeps animating once
//! mounted, independent of any trigger state. `None` maps both states to
//! the empty string.

use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    FadeIn,
    SlideUp,
    SlideDown,
    ScaleIn,
    Heartbeat,
    #[default]
    None,
}

/// Class pair for one animation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClasses {
    pub active: &'static str,
    pub inactive: &'static str,
}

impl AnimationKind {
    /// Total over all kinds; pure lookup, no state.
    pub fn classes(self) -> AnimationClasses {
        match self {
            AnimationKind::FadeIn => AnimationClasses {
                active: "animate-fade-in",
                inactive: "opacity-0",
            },
            AnimationKind::SlideUp => AnimationClasses {
                active: "animate-slide-up",
                inactive: "opacity-0 translate-y-8",
            },
            AnimationKind::SlideDown => AnimationClasses {
                active: "animate-slide-down",
                inactive: "opacity-0 -translate-y-8",
            },
            AnimationKind::ScaleIn => AnimationClasses {
                active: "animate-scale-in",
                inactive: "opacity-0 scale-95",
            },
            AnimationKind::Heartbeat => AnimationClasses {
                active: "animate-heartbeat",
                inactive: "",
            },
            AnimationKind::None => AnimationClasses {
                active: "",
                inactive: "",
            },
        }
    }

    /// Class for the current trigger state. `Heartbeat` ignores the state
    /// entirely: it is always animating once mounted.
    pub fn resolve(self, active: bool) -> &'static str {
        let classes = self.classes();
        if matches!(self, AnimationKind::Heartbeat) || active {
            classes.active
        } else {
            classes.inactive
        }
    }

    /// Parse that degrades instead of failing: an unrecognized kind resolves
    /// to `None` (no animation classes) so a bad configuration cannot take
    /// down a render.
    pub fn parse_lossy(s: &str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(_) => {
                log::warn!("unrecognized animation kind `{s}`; treating as `none`");
                AnimationKind::None
            }
        }
    }
}

impl FromStr for AnimationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fade-in" => Ok(AnimationKind::FadeIn),
            "slide-up" => Ok(AnimationKind::SlideUp),
            "slide-down" => Ok(AnimationKind::SlideDown),
            "scale-in" => Ok(AnimationKind::ScaleIn),
            "heartbeat" => Ok(AnimationKind::Heartbeat),
            "none" => Ok(AnimationKind::None),
            other => Err(ConfigError::UnknownKind(other.to_string())),
        }
    }
}
