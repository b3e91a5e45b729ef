//! Countdown clock for Bellring.
//!
//! A fixed-period tick source (one second by default) with explicit
//! start/stop/restart. The session actor owns exactly one scheduler and
//! awaits it inside its `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         info = clock.wait_for_tick() => {
//!             if clock.is_current(&info) {
//!                 let effects = engine.tick();
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! # Generations
//!
//! Every `start`, `stop` and `restart` bumps a generation counter and every
//! [`TickInfo`] carries the generation it was scheduled under. A consumer
//! that compares the two never applies a tick belonging to a clock run that
//! has since been cancelled.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the countdown clock.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Time between ticks. Default: one second.
    pub period: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl TickConfig {
    /// Shortest period the scheduler accepts.
    pub const MIN_PERIOD: Duration = Duration::from_millis(10);

    /// Create a config for a specific period.
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }

    /// Clamp out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TickScheduler::new`].
    pub fn validated(mut self) -> Self {
        if self.period < Self::MIN_PERIOD {
            warn!(
                period_ms = self.period.as_secs_f64() * 1000.0,
                min_ms = Self::MIN_PERIOD.as_secs_f64() * 1000.0,
                "tick period below minimum, clamping"
            );
            self.period = Self::MIN_PERIOD;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tick info
// ---------------------------------------------------------------------------

/// Information about a fired tick, returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone)]
pub struct TickInfo {
    /// Monotonically increasing tick number across all runs (starts at 1).
    pub tick: u64,
    /// Generation of the clock run this tick was scheduled under.
    pub generation: u64,
    /// `true` if the tick woke up more than 10% of a period late.
    pub overrun: bool,
    /// Whole periods lost to the late wakeup (0 in normal operation).
    pub ticks_skipped: u64,
}

/// Counters kept by the scheduler.
#[derive(Debug, Clone, Default)]
pub struct TickMetrics {
    /// Total ticks fired.
    pub total_ticks: u64,
    /// Total late wakeups detected.
    pub total_overruns: u64,
    /// Total periods lost to late wakeups.
    pub total_skipped: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Start/stop tick source. Created stopped.
pub struct TickScheduler {
    config: TickConfig,
    tick_count: u64,
    generation: u64,
    /// When the next tick should fire. `None` while stopped.
    next_tick: Option<Instant>,
    running: bool,
    metrics: TickMetrics,
}

impl TickScheduler {
    /// Create a stopped scheduler from config.
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        debug!(
            period_ms = config.period.as_secs_f64() * 1000.0,
            "countdown clock created"
        );
        Self {
            config,
            tick_count: 0,
            generation: 0,
            next_tick: None,
            running: false,
            metrics: TickMetrics::default(),
        }
    }

    /// Create a stopped scheduler ticking once per second.
    pub fn per_second() -> Self {
        Self::new(TickConfig::default())
    }

    /// Start ticking. The first tick fires one full period from now.
    ///
    /// No-op if already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.arm();
        debug!(generation = self.generation, "clock started");
    }

    /// Stop ticking. Any tick scheduled under the previous generation is
    /// now stale.
    ///
    /// No-op if already stopped.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation += 1;
        self.next_tick = None;
        debug!(generation = self.generation, "clock stopped");
    }

    /// Stop and start again in one step: the next tick fires a full period
    /// from now regardless of how far the current period had progressed.
    pub fn restart(&mut self) {
        self.running = true;
        self.arm();
        debug!(generation = self.generation, "clock restarted");
    }

    fn arm(&mut self) {
        self.generation += 1;
        self.next_tick = Some(Instant::now() + self.config.period);
    }

    /// Wait until the next tick is due.
    ///
    /// While stopped this future pends forever; `tokio::select!` keeps
    /// servicing its other branches. Cancel-safe: dropping the future
    /// before it resolves leaves the scheduler untouched.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        let next = match self.next_tick {
            Some(next) if self.running => next,
            _ => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        let period = self.config.period;
        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(next);
        let overrun = late_by > period / 10;
        let mut ticks_skipped = 0u64;

        // Late ticks are counted, never replayed: the next tick is always a
        // full period after this one was delivered.
        if overrun {
            ticks_skipped = (late_by.as_nanos() / period.as_nanos()) as u64;
            if ticks_skipped > 0 {
                warn!(
                    tick = self.tick_count,
                    skipped = ticks_skipped,
                    late_ms = late_by.as_secs_f64() * 1000.0,
                    "clock woke late, skipping ahead"
                );
            }
        }
        self.next_tick = Some(now + period);

        if overrun {
            self.metrics.total_overruns += 1;
        }
        self.metrics.total_skipped += ticks_skipped;
        self.metrics.total_ticks += 1;

        trace!(tick = self.tick_count, generation = self.generation, overrun, "tick fired");

        TickInfo {
            tick: self.tick_count,
            generation: self.generation,
            overrun,
            ticks_skipped,
        }
    }

    /// Returns `true` if `info` belongs to the current clock run.
    pub fn is_current(&self, info: &TickInfo) -> bool {
        self.running && info.generation == self.generation
    }

    /// Whether the clock is currently ticking.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The tick period.
    pub fn period(&self) -> Duration {
        self.config.period
    }

    /// Snapshot of the counters.
    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }
}
