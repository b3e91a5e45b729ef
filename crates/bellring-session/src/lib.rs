//! Session runtime for Bellring.
//!
//! A timer session runs as one Tokio task (actor model) that owns the
//! [`RoundTimerEngine`](bellring_engine::RoundTimerEngine), the countdown
//! clock and the caller's presenter and audio source. Commands and ticks
//! are handled strictly one at a time.
//!
//! # Key types
//!
//! - [`spawn_session`] — start a session task
//! - [`SessionHandle`] — send commands to a running session
//! - [`SessionConfig`] — clock and channel settings
//! - [`SessionSnapshot`] — point-in-time copy of the session

mod error;
mod session;

pub use error::SessionError;
pub use session::{SessionConfig, SessionHandle, SessionSnapshot, spawn_session};
