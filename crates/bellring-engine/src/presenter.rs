//! Capabilities the caller plugs into the runtime.

use crate::{AudioError, Bell, StartLabel};

/// Receives everything the user should see.
pub trait Presenter: Send + 'static {
    /// Shows the phase status, the round number and the time left.
    fn update_display(&mut self, status: &str, round: u32, time_left_secs: u32);

    /// Shows or hides the skip-break control.
    fn set_skip_button_visible(&mut self, visible: bool);

    /// Relabels the start control.
    fn set_start_button_label(&mut self, label: StartLabel);
}

/// Plays bells. Failures are reported but never affect the session.
pub trait AudioCueSource: Send + 'static {
    fn play(&mut self, bell: Bell) -> Result<(), AudioError>;
}

/// Renders seconds as zero-padded `MM:SS`. Minutes are not wrapped.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Renders the round counter line, e.g. `Round 2 / 6`.
pub fn round_label(round: u32, total: u32) -> String {
    format!("Round {round} / {total}")
}
