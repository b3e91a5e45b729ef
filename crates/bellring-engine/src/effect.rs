//! Outward effects produced by the engine.

use serde::{Deserialize, Serialize};

/// Audio cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bell {
    /// Single bell: a round begins.
    RoundStart,
    /// Triple bell: a round ends.
    RoundEnd,
    /// The whole session is over.
    SessionEnd,
    /// Double bell: ten seconds left in the round.
    Warning,
}

/// Text for the start/resume control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartLabel {
    Start,
    Resume,
}

impl StartLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Resume => "Resume",
        }
    }
}

/// What the runtime must do with its clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockCommand {
    /// Begin ticking (no-op if already ticking).
    Start,
    /// Stop ticking and invalidate any pending tick.
    Stop,
    /// Stop and immediately start again from a fresh period.
    Restart,
}

/// A single instruction emitted by the engine, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PlayBell(Bell),
    UpdateDisplay {
        status: &'static str,
        round: u32,
        time_left_secs: u32,
    },
    SetSkipVisible(bool),
    SetStartLabel(StartLabel),
    Clock(ClockCommand),
}
