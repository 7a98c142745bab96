//! Breathing cycle engine.
//!
//! Turns a [`BreathingPattern`] and a one-second tick into the current
//! phase and the number of completed cycles. The engine never schedules
//! anything itself; a [`crate::ticker::TickSource`] calls [`BreathingSession::tick`].
//!
//! Phase rule, evaluated against `position = (elapsed + 1) % cycle`:
//! 1. `position == 0` starts a new cycle on inhale
//! 2. `position == inhale` moves to hold
//! 3. `position == inhale + hold` moves to exhale
//!
//! With `hold == 0` rules 2 and 3 match the same second, so the phase goes
//! straight from inhale to exhale.

use crate::{BreathingPattern, Phase};
use serde::{Deserialize, Serialize};

/// Mutable state of a breathing session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingSessionState {
    pub elapsed_seconds: u64,
    pub cycle_count: u32,
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
}

/// Lifecycle of a session as seen by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
}

/// What a single tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session idle or paused; nothing advanced
    Ignored,
    /// Time advanced within the same phase
    Steady,
    /// Entered a new phase in the current cycle
    PhaseChanged(Phase),
    /// Finished a cycle and started the next one on inhale
    CycleCompleted,
}

/// A breathing exercise driven one second at a time
#[derive(Clone, Debug, Default)]
pub struct BreathingSession {
    pattern: Option<BreathingPattern>,
    state: BreathingSessionState,
}

impl BreathingSession {
    /// Create an idle session
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh session with the given pattern
    pub fn start(&mut self, pattern: BreathingPattern) {
        self.pattern = Some(pattern);
        self.state = BreathingSessionState {
            running: true,
            ..BreathingSessionState::default()
        };
        tracing::debug!(
            "Breathing session started ({}-{}-{})",
            pattern.inhale,
            pattern.hold,
            pattern.exhale
        );
    }

    /// Advance the session by one second
    pub fn tick(&mut self) -> TickOutcome {
        let pattern = match self.pattern {
            Some(p) if self.state.running && !self.state.paused => p,
            _ => {
                tracing::debug!("Ignoring tick while {:?}", self.status());
                return TickOutcome::Ignored;
            }
        };

        let total = pattern.cycle_seconds();
        if total == 0 {
            self.state.elapsed_seconds += 1;
            return TickOutcome::Steady;
        }

        let position = (self.state.elapsed_seconds + 1) % total;
        let inhale = u64::from(pattern.inhale);
        let hold = u64::from(pattern.hold);
        let before = self.state.phase;

        let mut outcome = TickOutcome::Steady;
        if position == 0 {
            self.state.phase = Phase::Inhale;
            self.state.cycle_count += 1;
            outcome = TickOutcome::CycleCompleted;
        } else {
            if position == inhale {
                self.state.phase = Phase::Hold;
            }
            if position == inhale + hold {
                self.state.phase = Phase::Exhale;
            }
            if self.state.phase != before {
                outcome = TickOutcome::PhaseChanged(self.state.phase);
            }
        }

        self.state.elapsed_seconds += 1;
        outcome
    }

    /// Suspend ticking; the caller should also suspend its tick source
    pub fn pause(&mut self) {
        if self.state.running {
            self.state.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.state.running {
            self.state.paused = false;
        }
    }

    /// Flip between paused and running
    pub fn toggle_pause(&mut self) {
        if self.state.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Reset to the idle defaults; calling it twice is harmless
    pub fn stop(&mut self) {
        if self.state.running {
            tracing::debug!(
                "Breathing session stopped after {}s, {} cycles",
                self.state.elapsed_seconds,
                self.state.cycle_count
            );
        }
        self.state = BreathingSessionState::default();
    }

    pub fn status(&self) -> SessionStatus {
        match (self.state.running, self.state.paused) {
            (false, _) => SessionStatus::Idle,
            (true, true) => SessionStatus::Paused,
            (true, false) => SessionStatus::Running,
        }
    }

    pub fn state(&self) -> &BreathingSessionState {
        &self.state
    }

    pub fn pattern(&self) -> Option<BreathingPattern> {
        self.pattern
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn cycle_count(&self) -> u32 {
        self.state.cycle_count
    }

    /// Instruction to show for the current phase
    pub fn instruction(&self) -> &'static str {
        self.state.phase.instruction()
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
