//! Session actor: an isolated Tokio task that owns one timer.
//!
//! The actor is the only place the engine is touched. Commands arrive over
//! an mpsc channel and ticks come from the clock, both inside the same
//! `select!` loop, so no two of them ever interleave.

use bellring_engine::{
    AudioCueSource, ClockCommand, ConfigError, Configuration, Effect, Presenter,
    RoundTimerEngine, SessionState,
};
use bellring_tick::{TickConfig, TickScheduler};
use tokio::sync::{mpsc, oneshot};

use crate::SessionError;

/// Runtime settings for a session task.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Countdown clock settings. Default: one tick per second.
    pub tick: TickConfig,
    /// Command channel capacity. Senders wait when it is full.
    pub channel_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick: TickConfig::default(),
            channel_size: 32,
        }
    }
}

/// Commands sent to a session actor through its channel.
///
/// Variants carrying a `oneshot::Sender` expect a reply.
pub(crate) enum SessionCommand {
    Configure {
        config: Configuration,
        reply: oneshot::Sender<Result<(), ConfigError>>,
    },
    Start,
    Pause,
    Reset,
    SkipBreak,
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// A copy of the session as seen by the actor.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub config: Configuration,
    /// Generation of the countdown clock when the snapshot was taken.
    pub clock_generation: u64,
    /// Late clock wakeups seen so far. Each one advanced the session by a
    /// single second.
    pub clock_overruns: u64,
}

/// Handle to a running session actor.
///
/// Cheap to clone; every clone drives the same session.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Applies a new configuration and waits for the verdict.
    pub async fn configure(&self, config: Configuration) -> Result<(), SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SessionCommand::Configure {
            config,
            reply: reply_tx,
        })
        .await?;
        reply_rx.await.map_err(|_| SessionError::Unavailable)??;
        Ok(())
    }

    /// Starts or resumes the countdown.
    pub async fn start(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Start).await
    }

    /// Pauses the countdown.
    pub async fn pause(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Pause).await
    }

    /// Returns the session to idle with the last configuration.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Reset).await
    }

    /// Skips the current break.
    pub async fn skip_break(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::SkipBreak).await
    }

    /// Requests a copy of the current session.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot { reply: reply_tx })
            .await?;
        reply_rx.await.map_err(|_| SessionError::Unavailable)
    }

    /// Stops the session task.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Shutdown).await
    }

    async fn send(&self, cmd: SessionCommand) -> Result<(), SessionError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| SessionError::Unavailable)
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct SessionActor<P, A> {
    engine: RoundTimerEngine,
    clock: TickScheduler,
    presenter: P,
    audio: A,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl<P: Presenter, A: AudioCueSource> SessionActor<P, A> {
    /// Runs the actor loop until shutdown or until every handle is dropped.
    async fn run(mut self) {
        tracing::info!(
            rounds = self.engine.config().total_rounds,
            "timer session started"
        );
        let initial = self.engine.render();
        self.apply(initial);

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => {
                    let Some(cmd) = cmd else {
                        tracing::debug!("all handles dropped");
                        break;
                    };
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                info = self.clock.wait_for_tick() => {
                    if !self.clock.is_current(&info) {
                        tracing::debug!(
                            tick = info.tick,
                            generation = info.generation,
                            "stale tick discarded"
                        );
                        continue;
                    }
                    if info.overrun {
                        tracing::warn!(
                            tick = info.tick,
                            skipped = info.ticks_skipped,
                            total_overruns = self.clock.metrics().total_overruns,
                            "countdown clock woke late, counting one second"
                        );
                    }
                    let effects = self.engine.tick();
                    self.apply(effects);
                }
            }
        }

        self.clock.stop();
        tracing::info!("timer session stopped");
    }

    /// Returns `false` when the actor should stop.
    fn handle_command(&mut self, cmd: SessionCommand) -> bool {
        match cmd {
            SessionCommand::Configure { config, reply } => {
                let result = match self.engine.configure(config) {
                    Ok(effects) => {
                        self.apply(effects);
                        Ok(())
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "configuration rejected");
                        Err(e)
                    }
                };
                let _ = reply.send(result);
            }
            SessionCommand::Start => {
                let effects = self.engine.start();
                self.apply(effects);
            }
            SessionCommand::Pause => {
                let effects = self.engine.pause();
                self.apply(effects);
            }
            SessionCommand::Reset => {
                let effects = self.engine.reset();
                self.apply(effects);
            }
            SessionCommand::SkipBreak => {
                let effects = self.engine.skip_break();
                self.apply(effects);
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(SessionSnapshot {
                    state: self.engine.state().clone(),
                    config: self.engine.config().clone(),
                    clock_generation: self.clock.generation(),
                    clock_overruns: self.clock.metrics().total_overruns,
                });
            }
            SessionCommand::Shutdown => {
                tracing::info!("timer session shutting down");
                return false;
            }
        }
        true
    }

    /// Applies engine effects in order. Audio failures are dropped.
    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PlayBell(bell) => {
                    if let Err(e) = self.audio.play(bell) {
                        tracing::debug!(?bell, error = %e, "bell dropped");
                    }
                }
                Effect::UpdateDisplay {
                    status,
                    round,
                    time_left_secs,
                } => self.presenter.update_display(status, round, time_left_secs),
                Effect::SetSkipVisible(visible) => {
                    self.presenter.set_skip_button_visible(visible)
                }
                Effect::SetStartLabel(label) => {
                    self.presenter.set_start_button_label(label)
                }
                Effect::Clock(ClockCommand::Start) => self.clock.start(),
                Effect::Clock(ClockCommand::Stop) => self.clock.stop(),
                Effect::Clock(ClockCommand::Restart) => self.clock.restart(),
            }
        }
    }
}

/// Spawns a session task for `config` and returns a handle to it.
///
/// The presenter receives a full render of the idle session as soon as
/// the task starts. Fails without spawning if `config` is invalid.
pub fn spawn_session<P, A>(
    config: Configuration,
    presenter: P,
    audio: A,
    session_config: SessionConfig,
) -> Result<SessionHandle, SessionError>
where
    P: Presenter,
    A: AudioCueSource,
{
    let engine = RoundTimerEngine::new(config)?;
    let (tx, rx) = mpsc::channel(session_config.channel_size.max(1));

    let actor = SessionActor {
        engine,
        clock: TickScheduler::new(session_config.tick),
        presenter,
        audio,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    Ok(SessionHandle { sender: tx })
}
