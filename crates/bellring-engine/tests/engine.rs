//! Integration tests for the round timer engine.
//!
//! The engine is synchronous, so these tests drive it tick by tick and
//! inspect both the state and the effects each call returns.

use bellring_engine::{
    Bell, ClockCommand, ConfigError, Configuration, Effect, Phase, RoundTimerEngine,
    SessionState, StartLabel,
};

// =========================================================================
// Helpers
// =========================================================================

fn config(rounds: u32, round_secs: u32, break_secs: u32, delay_secs: u32) -> Configuration {
    Configuration {
        round_duration_secs: round_secs,
        break_duration_secs: break_secs,
        total_rounds: rounds,
        warning_bell_enabled: false,
        initial_delay_secs: delay_secs,
    }
}

fn engine(config: Configuration) -> RoundTimerEngine {
    RoundTimerEngine::new(config).unwrap()
}

fn bells(effects: &[Effect]) -> Vec<Bell> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::PlayBell(b) => Some(*b),
            _ => None,
        })
        .collect()
}

fn tick_n(engine: &mut RoundTimerEngine, n: usize) -> Vec<Effect> {
    let mut all = Vec::new();
    for _ in 0..n {
        all.extend(engine.tick());
    }
    all
}

/// Ticks until the session stops running; returns every effect produced.
fn run_to_end(engine: &mut RoundTimerEngine) -> Vec<Effect> {
    let mut all = Vec::new();
    for _ in 0..10_000 {
        if !engine.state().running {
            return all;
        }
        all.extend(engine.tick());
    }
    panic!("session never finished");
}

// =========================================================================
// configure / new
// =========================================================================

#[test]
fn test_new_engine_is_idle() {
    let e = engine(config(3, 180, 60, 10));
    assert_eq!(
        e.state(),
        &SessionState {
            phase: Phase::Idle,
            current_round: 0,
            time_left_secs: 180,
            running: false,
        }
    );
}

#[test]
fn test_configure_resets_and_shows_prepare() {
    let mut e = engine(config(3, 180, 60, 0));
    e.start();
    tick_n(&mut e, 5);

    let effects = e.configure(config(5, 120, 30, 3)).unwrap();
    assert_eq!(e.state().phase, Phase::Idle);
    assert_eq!(e.state().current_round, 0);
    assert!(!e.state().running);
    assert_eq!(e.config().total_rounds, 5);
    assert_eq!(
        effects,
        vec![
            Effect::Clock(ClockCommand::Stop),
            Effect::UpdateDisplay {
                status: "Prepare",
                round: 0,
                time_left_secs: 120,
            },
            Effect::SetStartLabel(StartLabel::Start),
            Effect::SetSkipVisible(false),
        ]
    );
}

#[test]
fn test_invalid_configure_leaves_state_untouched() {
    let mut e = engine(config(3, 60, 30, 0));
    e.start();
    tick_n(&mut e, 4);
    let before = e.state().clone();
    let config_before = e.config().clone();

    let err = e.configure(config(0, 60, 30, 0)).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
    assert_eq!(e.state(), &before);
    assert_eq!(e.config(), &config_before);

    let err = e.configure(config(3, 0, 30, 0)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidConfiguration { field: "round_duration_secs", .. }
    ));
    assert_eq!(e.state(), &before);
}

#[test]
fn test_new_rejects_invalid_config() {
    assert!(RoundTimerEngine::new(config(0, 60, 0, 0)).is_err());
}

// =========================================================================
// start
// =========================================================================

#[test]
fn test_start_enters_initial_delay() {
    let mut e = engine(config(3, 180, 60, 5));
    let effects = e.start();

    assert_eq!(e.state().phase, Phase::Preparing);
    assert_eq!(e.state().time_left_secs, 5);
    assert_eq!(e.state().current_round, 0);
    assert!(e.state().running);
    assert!(effects.contains(&Effect::Clock(ClockCommand::Start)));
    assert!(effects.contains(&Effect::SetStartLabel(StartLabel::Resume)));
    assert!(effects.contains(&Effect::UpdateDisplay {
        status: "Prepare (Delay)",
        round: 0,
        time_left_secs: 5,
    }));
}

#[test]
fn test_start_while_running_is_noop() {
    let mut e = engine(config(3, 180, 60, 5));
    e.start();
    tick_n(&mut e, 2);
    let before = e.state().clone();

    assert!(e.start().is_empty());
    assert_eq!(e.state(), &before);
}

#[test]
fn test_initial_delay_leads_into_round_one() {
    let mut e = engine(config(3, 180, 60, 5));
    e.start();

    let early = tick_n(&mut e, 4);
    assert_eq!(e.state().phase, Phase::Preparing);
    assert_eq!(e.state().time_left_secs, 1);

    let last = e.tick();
    assert_eq!(e.state().phase, Phase::InRound);
    assert_eq!(e.state().current_round, 1);
    assert_eq!(e.state().time_left_secs, 180);

    let mut all = early;
    all.extend(last);
    assert_eq!(bells(&all), vec![Bell::RoundStart]);
}

// =========================================================================
// Full sequence
// =========================================================================

#[test]
fn test_two_round_sequence() {
    let mut e = engine(config(2, 3, 2, 0));
    e.start();
    assert_eq!(e.state().phase, Phase::Preparing);
    assert_eq!(e.state().time_left_secs, 0);

    let mut trace = Vec::new();
    let mut all = Vec::new();
    for _ in 0..9 {
        all.extend(e.tick());
        let s = e.state();
        trace.push((s.phase, s.current_round, s.time_left_secs));
    }

    use Phase::*;
    assert_eq!(
        trace,
        vec![
            (InRound, 1, 3),
            (InRound, 1, 2),
            (InRound, 1, 1),
            (OnBreak, 1, 2),
            (OnBreak, 1, 1),
            (InRound, 2, 3),
            (InRound, 2, 2),
            (InRound, 2, 1),
            (Finished, 2, 0),
        ]
    );
    assert_eq!(
        bells(&all),
        vec![Bell::RoundStart, Bell::RoundEnd, Bell::RoundStart, Bell::RoundEnd]
    );
    assert!(!e.state().running);
}

#[test]
fn test_zero_break_resolves_on_next_tick() {
    let mut e = engine(config(2, 2, 0, 0));
    e.start();
    tick_n(&mut e, 3); // delay -> r1 (2s) -> 1 -> break

    assert_eq!(e.state().phase, Phase::OnBreak);
    assert_eq!(e.state().time_left_secs, 0);

    let effects = e.tick();
    assert_eq!(e.state().phase, Phase::InRound);
    assert_eq!(e.state().current_round, 2);
    assert_eq!(bells(&effects), vec![Bell::RoundStart]);
}

#[test]
fn test_round_counter_is_monotonic() {
    let mut e = engine(config(4, 3, 1, 1));
    e.start();
    let mut last = 0;
    while e.state().running {
        e.tick();
        let round = e.state().current_round;
        assert!(round == last || round == last + 1);
        assert!(round <= 4);
        last = round;
    }
    assert_eq!(last, 4);
}

// =========================================================================
// pause
// =========================================================================

#[test]
fn test_pause_preserves_state() {
    let mut e = engine(config(3, 30, 10, 0));
    e.start();
    tick_n(&mut e, 6);
    let before = e.state().clone();

    let effects = e.pause();
    assert!(effects.contains(&Effect::Clock(ClockCommand::Stop)));
    assert!(!e.state().running);

    // Stray ticks while paused are ignored.
    assert!(e.tick().is_empty());
    assert!(e.tick().is_empty());

    e.start();
    assert_eq!(e.state().phase, before.phase);
    assert_eq!(e.state().current_round, before.current_round);
    assert_eq!(e.state().time_left_secs, before.time_left_secs);
    assert!(e.state().running);
}

#[test]
fn test_pause_during_delay_keeps_delay_progress() {
    let mut e = engine(config(3, 30, 10, 8));
    e.start();
    tick_n(&mut e, 3);
    e.pause();
    e.start();
    assert_eq!(e.state().phase, Phase::Preparing);
    assert_eq!(e.state().time_left_secs, 5);
}

#[test]
fn test_pause_when_stopped_is_noop() {
    let mut e = engine(config(3, 30, 10, 8));
    assert!(e.pause().is_empty());
}

// =========================================================================
// Warning bell
// =========================================================================

#[test]
fn test_warning_bell_once_per_round_at_ten_seconds() {
    let mut e = engine(Configuration {
        warning_bell_enabled: true,
        ..config(2, 15, 15, 15)
    });
    e.start();

    let mut warnings = 0;
    while e.state().running {
        let effects = e.tick();
        if bells(&effects).contains(&Bell::Warning) {
            warnings += 1;
            assert_eq!(e.state().phase, Phase::InRound);
            assert_eq!(e.state().time_left_secs, 10);
        }
    }
    assert_eq!(warnings, 2);
}

#[test]
fn test_warning_bell_disabled() {
    let mut e = engine(config(2, 15, 15, 15));
    e.start();
    let all = run_to_end(&mut e);
    assert!(!bells(&all).contains(&Bell::Warning));
}

// =========================================================================
// skip_break
// =========================================================================

#[test]
fn test_skip_break_in_round_is_noop() {
    let mut e = engine(config(3, 30, 10, 0));
    e.start();
    tick_n(&mut e, 3);
    assert_eq!(e.state().phase, Phase::InRound);
    let before = e.state().clone();

    assert!(e.skip_break().is_empty());
    assert_eq!(e.state(), &before);
}

#[test]
fn test_skip_break_when_paused_is_noop() {
    let mut e = engine(config(3, 2, 10, 0));
    e.start();
    tick_n(&mut e, 3);
    assert_eq!(e.state().phase, Phase::OnBreak);
    e.pause();
    let before = e.state().clone();

    assert!(e.skip_break().is_empty());
    assert_eq!(e.state(), &before);
}

#[test]
fn test_skip_break_reenters_delay() {
    let mut e = engine(config(3, 2, 30, 4));
    e.start();
    tick_n(&mut e, 4 + 2 + 5); // delay, round 1, five seconds of break
    assert_eq!(e.state().phase, Phase::OnBreak);
    assert_eq!(e.state().current_round, 1);

    let effects = e.skip_break();
    assert_eq!(e.state().phase, Phase::Preparing);
    assert_eq!(e.state().time_left_secs, 4);
    assert_eq!(e.state().current_round, 1);
    assert_eq!(effects[0], Effect::Clock(ClockCommand::Restart));
    assert!(effects.contains(&Effect::UpdateDisplay {
        status: "Prepare (Delay)",
        round: 1,
        time_left_secs: 4,
    }));
    assert!(effects.contains(&Effect::SetSkipVisible(true)));

    let effects = tick_n(&mut e, 4);
    assert_eq!(e.state().phase, Phase::InRound);
    assert_eq!(e.state().current_round, 2, "skipping never replays a round");
    assert_eq!(bells(&effects), vec![Bell::RoundStart]);
}

#[test]
fn test_skip_during_first_delay_restarts_it() {
    let mut e = engine(config(3, 30, 10, 6));
    e.start();
    tick_n(&mut e, 4);

    let effects = e.skip_break();
    assert_eq!(e.state().phase, Phase::Preparing);
    assert_eq!(e.state().time_left_secs, 6);
    assert_eq!(e.state().current_round, 0);
    assert!(effects.contains(&Effect::SetSkipVisible(false)));
}

#[test]
fn test_skip_button_shown_only_on_breaks() {
    let mut e = engine(config(2, 2, 3, 2));
    let mut shown = Vec::new();
    shown.extend(e.start());
    while e.state().running {
        for effect in e.tick() {
            if effect == Effect::SetSkipVisible(true) {
                assert_eq!(e.state().phase, Phase::OnBreak);
            }
            shown.push(effect);
        }
    }
    assert!(shown.contains(&Effect::SetSkipVisible(true)));
}

// =========================================================================
// reset
// =========================================================================

#[test]
fn test_reset_from_every_phase() {
    let cfg = config(2, 3, 2, 2);
    for ticks in [0usize, 1, 3, 6, 8, 20] {
        let mut e = engine(cfg.clone());
        e.start();
        tick_n(&mut e, ticks);

        let effects = e.reset();
        assert_eq!(e.state(), &SessionState::idle(&cfg), "after {ticks} ticks");
        assert_eq!(effects[0], Effect::Clock(ClockCommand::Stop));
    }
}

#[test]
fn test_reset_uses_last_applied_config() {
    let mut e = engine(config(2, 3, 2, 2));
    e.configure(config(4, 45, 15, 5)).unwrap();
    e.start();
    tick_n(&mut e, 10);
    e.reset();
    assert_eq!(e.state().time_left_secs, 45);
    assert_eq!(e.config().total_rounds, 4);
}

// =========================================================================
// Finish
// =========================================================================

#[test]
fn test_finishing_final_round() {
    let mut e = engine(config(1, 2, 5, 0));
    e.start();
    tick_n(&mut e, 2);
    assert_eq!(e.state().phase, Phase::InRound);
    assert_eq!(e.state().time_left_secs, 1);

    let effects = e.tick();
    assert_eq!(e.state().phase, Phase::Finished);
    assert!(!e.state().running);
    assert_eq!(e.state().current_round, 1);
    assert_eq!(bells(&effects), vec![Bell::RoundEnd]);
    assert!(effects.contains(&Effect::Clock(ClockCommand::Stop)));
    assert!(effects.contains(&Effect::SetStartLabel(StartLabel::Start)));
    assert!(effects.contains(&Effect::UpdateDisplay {
        status: "Finished!",
        round: 1,
        time_left_secs: 0,
    }));
}

#[test]
fn test_finished_is_terminal_until_reset() {
    let mut e = engine(config(1, 1, 0, 0));
    e.start();
    run_to_end(&mut e);
    let finished = e.state().clone();
    assert_eq!(finished.phase, Phase::Finished);

    assert!(e.tick().is_empty());
    assert!(e.start().is_empty());
    assert!(e.skip_break().is_empty());
    assert_eq!(e.state(), &finished);

    e.reset();
    assert_eq!(e.state().phase, Phase::Idle);
    assert!(!e.start().is_empty());
}

// =========================================================================
// render
// =========================================================================

#[test]
fn test_render_reflects_current_state() {
    let mut e = engine(config(3, 60, 20, 0));
    assert!(e.render().contains(&Effect::SetStartLabel(StartLabel::Start)));

    e.start();
    tick_n(&mut e, 11);
    e.pause();
    let effects = e.render();
    assert!(effects.contains(&Effect::SetStartLabel(StartLabel::Resume)));
    assert!(effects.contains(&Effect::UpdateDisplay {
        status: "Round",
        round: 1,
        time_left_secs: 50,
    }));
}
