//! Error types for the session runtime.

use bellring_engine::ConfigError;

/// Errors returned by [`SessionHandle`](crate::SessionHandle) calls.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The session task has shut down or its command channel is closed.
    #[error("timer session is unavailable")]
    Unavailable,

    /// A configuration was rejected. The session kept its previous one.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
