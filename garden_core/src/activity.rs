//! Fixed-duration guided activities and the one-activity-at-a-time rule.
//!
//! Unlike breathing, a guided session counts up to a known duration and
//! stops on its own.

use crate::{Error, GuidedActivity, Result};

/// Result of advancing a guided session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuidedTick {
    Ignored,
    Running { remaining: u32 },
    Completed,
}

/// Countdown state for a guided activity
#[derive(Clone, Debug)]
pub struct GuidedSession {
    activity: GuidedActivity,
    elapsed: u32,
    running: bool,
    paused: bool,
}

impl GuidedSession {
    pub fn start(activity: GuidedActivity) -> Self {
        tracing::debug!(
            "Guided session '{}' started ({}s)",
            activity.slug,
            activity.duration_seconds
        );
        Self {
            activity,
            elapsed: 0,
            running: true,
            paused: false,
        }
    }

    /// Advance by one second, stopping once the duration is reached
    pub fn tick(&mut self) -> GuidedTick {
        if !self.running || self.paused {
            return GuidedTick::Ignored;
        }

        let duration = self.activity.duration_seconds;
        self.elapsed += 1;
        if self.elapsed >= duration {
            self.elapsed = duration;
            self.running = false;
            tracing::info!("Guided session '{}' completed", self.activity.slug);
            return GuidedTick::Completed;
        }

        GuidedTick::Running {
            remaining: duration - self.elapsed,
        }
    }

    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn remaining(&self) -> u32 {
        self.activity.duration_seconds.saturating_sub(self.elapsed)
    }

    pub fn activity(&self) -> &GuidedActivity {
        &self.activity
    }
}

/// Which activity currently owns the mindfulness screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveActivity {
    Breathing,
    Guided(String),
}

impl ActiveActivity {
    fn name(&self) -> &str {
        match self {
            ActiveActivity::Breathing => "breathing",
            ActiveActivity::Guided(slug) => slug,
        }
    }
}

/// Caller-side guard allowing a single guided activity at a time
#[derive(Clone, Debug, Default)]
pub struct ActivityCoordinator {
    active: Option<ActiveActivity>,
}

impl ActivityCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the screen for `activity`
    ///
    /// Re-claiming the activity that is already active succeeds.
    pub fn try_begin(&mut self, activity: ActiveActivity) -> Result<()> {
        match &self.active {
            Some(current) if *current != activity => Err(Error::ActivityBusy {
                active: current.name().to_string(),
            }),
            _ => {
                self.active = Some(activity);
                Ok(())
            }
        }
    }

    /// Release the screen
    pub fn finish(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<&ActiveActivity> {
        self.active.as_ref()
    }
}
