//! # Bellring
//!
//! Round/break interval timer for boxing-style training.
//!
//! Callers implement [`Presenter`](prelude::Presenter) and
//! [`AudioCueSource`](prelude::AudioCueSource); the framework runs the
//! countdown and tells them what to show and which bell to ring.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bellring::prelude::*;
//!
//! // Implement Presenter and AudioCueSource for your UI, then:
//! // let handle = spawn_session(
//! //     Configuration::default(),
//! //     my_presenter,
//! //     my_audio,
//! //     SessionConfig::default(),
//! // )?;
//! // handle.start().await?;
//! ```

mod error;

pub use error::BellringError;

/// Everything needed to run a timer.
pub mod prelude {
    pub use crate::BellringError;
    pub use crate::init_tracing;
    pub use bellring_engine::{
        AudioCueSource, AudioError, Bell, ConfigError, Configuration, Phase, Presenter,
        SessionState, StartLabel, format_clock, round_label,
    };
    pub use bellring_session::{
        SessionConfig, SessionError, SessionHandle, SessionSnapshot, spawn_session,
    };
    pub use bellring_tick::TickConfig;
}

/// Installs a `tracing` subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
