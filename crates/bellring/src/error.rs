//! Unified error type for Bellring.

use bellring_engine::{AudioError, ConfigError};
use bellring_session::SessionError;

/// Top-level error wrapping every crate-specific error.
///
/// `#[from]` on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum BellringError {
    /// A configuration was invalid or could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The session runtime rejected a command.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An audio cue could not be played.
    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Reading a configuration file or the terminal failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
