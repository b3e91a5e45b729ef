//! Error types for the engine layer.

/// Errors raised while applying a [`Configuration`](crate::Configuration).
///
/// Reported synchronously to the caller; the engine state is left exactly
/// as it was before the failed call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field is out of its allowed range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },

    /// The configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A bell could not be played (device missing, playback blocked, ...).
///
/// Never propagated into session state: the runtime logs it and moves on.
#[derive(Debug, thiserror::Error)]
#[error("audio cue failed: {0}")]
pub struct AudioError(pub String);
