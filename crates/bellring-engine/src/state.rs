//! Session phase machine and mutable session state.

use serde::{Deserialize, Serialize};

use crate::Configuration;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The stage a session is in.
///
/// ```text
/// Idle → Preparing → InRound → (OnBreak → InRound)* → Finished
///            ↑   │
///            └───┘ skip_break
/// ```
///
/// - **Idle**: configured, never started.
/// - **Preparing**: counting down the initial delay (also re-entered when a
///   break is skipped).
/// - **InRound**: a round is running.
/// - **OnBreak**: resting between two rounds.
/// - **Finished**: all rounds done. Terminal until reset or reconfigure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Preparing,
    InRound,
    OnBreak,
    Finished,
}

impl Phase {
    /// The status text shown on the display for this phase.
    pub fn status(self) -> &'static str {
        match self {
            Self::Idle => "Prepare",
            Self::Preparing => "Prepare (Delay)",
            Self::InRound => "Round",
            Self::OnBreak => "Break",
            Self::Finished => "Finished!",
        }
    }

    /// Returns `true` for the two countdowns between rounds.
    pub fn is_between_rounds(self) -> bool {
        matches!(self, Self::Preparing | Self::OnBreak)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Preparing => write!(f, "Preparing"),
            Self::InRound => write!(f, "InRound"),
            Self::OnBreak => write!(f, "OnBreak"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Everything that changes while a session runs.
///
/// Created fresh on every configure/reset and mutated only by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// 0 until the first round starts, then `1..=total_rounds`.
    pub current_round: u32,
    /// Seconds left in the current phase.
    pub time_left_secs: u32,
    /// Whether the clock is ticking.
    pub running: bool,
}

impl SessionState {
    /// A never-started session. Shows the round length so the display
    /// previews what the first round will look like.
    pub fn idle(config: &Configuration) -> Self {
        Self {
            phase: Phase::Idle,
            current_round: 0,
            time_left_secs: config.round_duration_secs,
            running: false,
        }
    }

    /// Whether the skip button should be offered.
    ///
    /// Hidden during the very first delay (round 0) even though skipping
    /// it is accepted.
    pub fn skip_visible(&self) -> bool {
        self.running && self.phase.is_between_rounds() && self.current_round > 0
    }
}
