use thiserror::Error;

/// Failures at the configuration parse boundary.
///
/// The engine itself never surfaces errors: a bad configuration degrades to
/// "no animation" (see `AnimationKind::parse_lossy` / `Trigger::parse_lossy`).
/// The typed variants exist for callers that want to validate up front.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unrecognized animation kind `{0}`")]
    UnknownKind(String),
    #[error("unrecognized trigger `{0}`")]
    UnknownTrigger(String),
}
