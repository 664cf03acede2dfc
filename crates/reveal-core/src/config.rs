use std::str::FromStr;

use web_time::Duration;

use crate::catalog::AnimationKind;
use crate::error::ConfigError;
use crate::observer::TargetId;

/// Strategy that decides when an instance's state machine advances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Activate at mount, after `delay`. One-shot.
    #[default]
    Mount,
    /// Active exactly while the pointer is over the node. Reversible.
    Hover,
    /// Activate on click, auto-revert after `duration`. Cyclic.
    Click,
    /// Activate `delay` after the node first scrolls into view. One-shot.
    Visible,
}

impl Trigger {
    /// Degrading parse, mirroring `AnimationKind::parse_lossy`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.parse() {
            Ok(trigger) => trigger,
            Err(_) => {
                log::warn!("unrecognized trigger `{s}`; treating as `mount`");
                Trigger::Mount
            }
        }
    }
}

impl FromStr for Trigger {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mount" => Ok(Trigger::Mount),
            "hover" => Ok(Trigger::Hover),
            "click" => Ok(Trigger::Click),
            "visible" => Ok(Trigger::Visible),
            other => Err(ConfigError::UnknownTrigger(other.to_string())),
        }
    }
}

/// Immutable per-instance configuration, supplied by the calling view.
///
/// `delay` is meaningful for `Mount` and `Visible`; `duration` is both the
/// visual transition length and the hold time for `Click`'s auto-revert.
/// `target` is the handle used for viewport observation when
/// `trigger == Visible`; without one the instance stays idle forever.
#[derive(Clone, Copy, Debug)]
pub struct AnimationConfig {
    pub kind: AnimationKind,
    pub trigger: Trigger,
    pub delay: Duration,
    pub duration: Duration,
    pub target: Option<TargetId>,
}

impl AnimationConfig {
    pub fn new(kind: AnimationKind, trigger: Trigger) -> Self {
        Self {
            kind,
            trigger,
            delay: Duration::ZERO,
            duration: Duration::from_millis(300),
            target: None,
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay_ms(self, ms: u64) -> Self {
        self.delay(Duration::from_millis(ms))
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn duration_ms(self, ms: u64) -> Self {
        self.duration(Duration::from_millis(ms))
    }

    pub fn target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(AnimationKind::default(), Trigger::default())
    }
}
