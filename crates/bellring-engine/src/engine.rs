//! The round timer engine.

use tracing::{debug, info, trace};

use crate::{
    Bell, ClockCommand, ConfigError, Configuration, Effect, Phase, SessionState, StartLabel,
};

/// Seconds left in a round when the warning bell rings.
pub const WARNING_AT_SECS: u32 = 10;

/// Owns one session and advances it.
///
/// Every method runs to completion and returns the effects it produced, in
/// the order they must be applied. The engine never starts or stops a clock
/// itself; it asks for it through [`Effect::Clock`].
#[derive(Debug, Clone)]
pub struct RoundTimerEngine {
    config: Configuration,
    state: SessionState,
}

impl RoundTimerEngine {
    /// Creates an idle engine for `config`.
    pub fn new(config: Configuration) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = SessionState::idle(&config);
        Ok(Self { config, state })
    }

    /// The configuration the current session was built from.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The current session.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Applies a new configuration, discarding the current session.
    ///
    /// On error nothing changes.
    pub fn configure(&mut self, config: Configuration) -> Result<Vec<Effect>, ConfigError> {
        config.validate()?;
        debug!(?config, "configuration applied");
        self.config = config;
        Ok(self.reinitialize())
    }

    /// Re-applies the last configuration.
    pub fn reset(&mut self) -> Vec<Effect> {
        debug!(phase = %self.state.phase, round = self.state.current_round, "session reset");
        self.reinitialize()
    }

    fn reinitialize(&mut self) -> Vec<Effect> {
        self.state = SessionState::idle(&self.config);
        vec![
            Effect::Clock(ClockCommand::Stop),
            self.display(),
            Effect::SetStartLabel(StartLabel::Start),
            Effect::SetSkipVisible(false),
        ]
    }

    /// Starts a fresh session or resumes a paused one.
    ///
    /// Only an idle session enters the initial delay. A session paused during
    /// its first delay (still round 0) resumes the delay where it stopped
    /// instead of restarting it, so no countdown progress is lost to a pause.
    ///
    /// No-op while running and once finished.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.state.running || self.state.phase == Phase::Finished {
            return Vec::new();
        }
        if self.state.phase == Phase::Idle {
            self.state.phase = Phase::Preparing;
            self.state.time_left_secs = self.config.initial_delay_secs;
            info!(delay_secs = self.state.time_left_secs, "session started");
        } else {
            debug!(phase = %self.state.phase, time_left = self.state.time_left_secs, "session resumed");
        }
        self.state.running = true;
        vec![
            Effect::SetStartLabel(StartLabel::Resume),
            Effect::Clock(ClockCommand::Start),
            self.display(),
            Effect::SetSkipVisible(self.state.skip_visible()),
        ]
    }

    /// Stops the clock, keeping phase, round and time left exactly.
    pub fn pause(&mut self) -> Vec<Effect> {
        if !self.state.running {
            return Vec::new();
        }
        self.state.running = false;
        debug!(phase = %self.state.phase, time_left = self.state.time_left_secs, "session paused");
        vec![
            Effect::Clock(ClockCommand::Stop),
            Effect::SetStartLabel(StartLabel::Resume),
            Effect::SetSkipVisible(false),
        ]
    }

    /// Abandons the current break (or delay) and counts down the initial
    /// delay again before the next round.
    ///
    /// Only effective while running between rounds; otherwise nothing
    /// changes and no effects are produced.
    pub fn skip_break(&mut self) -> Vec<Effect> {
        if !self.state.running || !self.state.phase.is_between_rounds() {
            trace!(phase = %self.state.phase, running = self.state.running, "skip ignored");
            return Vec::new();
        }
        debug!(phase = %self.state.phase, round = self.state.current_round, "break skipped");
        self.state.phase = Phase::Preparing;
        self.state.time_left_secs = self.config.initial_delay_secs;
        vec![
            Effect::Clock(ClockCommand::Restart),
            self.display(),
            Effect::SetSkipVisible(self.state.skip_visible()),
        ]
    }

    /// Advances the session by one second.
    ///
    /// Crosses at most one phase boundary per call, so a zero-length phase
    /// is resolved on the tick after it was entered. Ignored while stopped.
    pub fn tick(&mut self) -> Vec<Effect> {
        if !self.state.running {
            trace!(phase = %self.state.phase, "tick ignored while stopped");
            return Vec::new();
        }

        let mut effects = Vec::new();
        self.state.time_left_secs = self.state.time_left_secs.saturating_sub(1);

        if self.config.warning_bell_enabled
            && self.state.phase == Phase::InRound
            && self.state.time_left_secs == WARNING_AT_SECS
        {
            effects.push(Effect::PlayBell(Bell::Warning));
        }

        if self.state.time_left_secs == 0 {
            self.cross_boundary(&mut effects);
        }

        trace!(
            phase = %self.state.phase,
            round = self.state.current_round,
            time_left = self.state.time_left_secs,
            "tick"
        );

        effects.push(self.display());
        effects.push(Effect::SetSkipVisible(self.state.skip_visible()));
        effects
    }

    /// Full display refresh for the current state, for a presenter that
    /// has just attached.
    pub fn render(&self) -> Vec<Effect> {
        let label = match self.state.phase {
            Phase::Idle | Phase::Finished => StartLabel::Start,
            _ => StartLabel::Resume,
        };
        vec![
            self.display(),
            Effect::SetStartLabel(label),
            Effect::SetSkipVisible(self.state.skip_visible()),
        ]
    }

    fn cross_boundary(&mut self, effects: &mut Vec<Effect>) {
        match self.state.phase {
            Phase::Preparing | Phase::OnBreak => self.begin_next_round(effects),
            Phase::InRound => {
                effects.push(Effect::PlayBell(Bell::RoundEnd));
                if self.state.current_round < self.config.total_rounds {
                    self.state.phase = Phase::OnBreak;
                    self.state.time_left_secs = self.config.break_duration_secs;
                    debug!(round = self.state.current_round, "break started");
                } else {
                    self.finish(effects);
                }
            }
            // Never running in these phases.
            Phase::Idle | Phase::Finished => {}
        }
    }

    fn begin_next_round(&mut self, effects: &mut Vec<Effect>) {
        let next = self.state.current_round + 1;
        if next > self.config.total_rounds {
            effects.push(Effect::PlayBell(Bell::SessionEnd));
            self.finish(effects);
            return;
        }
        self.state.current_round = next;
        self.state.phase = Phase::InRound;
        self.state.time_left_secs = self.config.round_duration_secs;
        effects.push(Effect::PlayBell(Bell::RoundStart));
        info!(round = next, total = self.config.total_rounds, "round started");
    }

    fn finish(&mut self, effects: &mut Vec<Effect>) {
        self.state.phase = Phase::Finished;
        self.state.current_round = self.config.total_rounds;
        self.state.time_left_secs = 0;
        self.state.running = false;
        effects.push(Effect::Clock(ClockCommand::Stop));
        effects.push(Effect::SetStartLabel(StartLabel::Start));
        info!(rounds = self.config.total_rounds, "session finished");
    }

    fn display(&self) -> Effect {
        Effect::UpdateDisplay {
            status: self.state.phase.status(),
            round: self.state.current_round,
            time_left_secs: self.state.time_left_secs,
        }
    }
}
