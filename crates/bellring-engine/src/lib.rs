//! Round/break countdown state machine for Bellring.
//!
//! The engine is pure: every command and every tick returns the list of
//! [`Effect`]s it produced and never performs I/O itself. A runtime (see
//! `bellring-session`) owns the clock and the presenter and applies the
//! effects in order.
//!
//! # Key types
//!
//! - [`RoundTimerEngine`] — owns the session and runs the phase machine
//! - [`Configuration`] — user settings, validated on every (re)apply
//! - [`SessionState`] / [`Phase`] — the mutable session
//! - [`Effect`] — display, audio, button and clock instructions
//! - [`Presenter`] / [`AudioCueSource`] — capabilities the caller implements

mod config;
mod effect;
mod engine;
mod error;
mod presenter;
mod state;

pub use config::Configuration;
pub use effect::{Bell, ClockCommand, Effect, StartLabel};
pub use engine::{RoundTimerEngine, WARNING_AT_SECS};
pub use error::{AudioError, ConfigError};
pub use presenter::{AudioCueSource, Presenter, format_clock, round_label};
pub use state::{Phase, SessionState};
