//! Single-threaded tick sources that drive the session engines.
//!
//! Engines expose a pure `tick()`; these types decide when it is called.

use crate::activity::{GuidedSession, GuidedTick};
use crate::breathing::{BreathingSession, TickOutcome};
use std::time::Duration;

/// Something that yields ticks at a fixed cadence
pub trait TickSource {
    /// Block until the next tick. Returns false when the source is exhausted.
    fn wait_tick(&mut self) -> bool;
}

/// Real-time ticker sleeping a fixed interval between ticks
pub struct IntervalTicker {
    interval: Duration,
}

impl IntervalTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// One tick per second
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl TickSource for IntervalTicker {
    fn wait_tick(&mut self) -> bool {
        std::thread::sleep(self.interval);
        true
    }
}

/// Yields a fixed number of instant ticks
pub struct ManualTicker {
    remaining: u64,
}

impl ManualTicker {
    pub fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }
}

impl TickSource for ManualTicker {
    fn wait_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Totals for a driven session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub elapsed_seconds: u64,
    pub cycles: u32,
}

/// Request from the user applied between ticks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionControl {
    TogglePause,
    Stop,
}

/// Drive a running breathing session until the source runs dry or
/// `stop_after_cycles` cycles have completed, then stop it.
pub fn run_breathing<S, F>(
    session: &mut BreathingSession,
    source: &mut S,
    stop_after_cycles: Option<u32>,
    on_tick: F,
) -> RunSummary
where
    S: TickSource,
    F: FnMut(&BreathingSession, TickOutcome),
{
    run_breathing_with_controls(session, source, stop_after_cycles, |_| None, on_tick)
}

/// Like [`run_breathing`], but polls `controls` before every tick so the
/// caller can pause, resume or stop the session mid-run.
pub fn run_breathing_with_controls<S, C, F>(
    session: &mut BreathingSession,
    source: &mut S,
    stop_after_cycles: Option<u32>,
    mut controls: C,
    mut on_tick: F,
) -> RunSummary
where
    S: TickSource,
    C: FnMut(&BreathingSession) -> Option<SessionControl>,
    F: FnMut(&BreathingSession, TickOutcome),
{
    'run: while session.state().running {
        if let Some(limit) = stop_after_cycles {
            if session.cycle_count() >= limit {
                tracing::debug!("Reached {} cycles, stopping", limit);
                break;
            }
        }

        while let Some(control) = controls(session) {
            match control {
                SessionControl::TogglePause => session.toggle_pause(),
                SessionControl::Stop => {
                    tracing::debug!("Stop requested");
                    break 'run;
                }
            }
        }

        if !source.wait_tick() {
            break;
        }

        let outcome = session.tick();
        on_tick(session, outcome);
    }

    let summary = RunSummary {
        elapsed_seconds: session.state().elapsed_seconds,
        cycles: session.cycle_count(),
    };
    session.stop();
    summary
}

/// Drive a guided session until it completes or the source runs dry.
/// Returns true if the activity ran to completion.
pub fn run_guided<S, F>(session: &mut GuidedSession, source: &mut S, mut on_tick: F) -> bool
where
    S: TickSource,
    F: FnMut(&GuidedSession, GuidedTick),
{
    while session.is_running() {
        if !source.wait_tick() {
            session.stop();
            return false;
        }

        let outcome = session.tick();
        on_tick(session, outcome);
        if outcome == GuidedTick::Completed {
            return true;
        }
    }
    false
}
