#![forbid(unsafe_code)]

//! Core domain model and logic for the Mind Garden wellness tracker.
//!
//! This crate provides:
//! - Domain types (breathing patterns, moods, plants, trend points)
//! - The breathing cycle engine and guided activity timer
//! - Tick sources that drive those engines
//! - Mood to garden growth mapping and weekly trend series
//! - Theme context, configuration and a blocking backend client

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod breathing;
pub mod activity;
pub mod ticker;
pub mod garden;
pub mod trend;
pub mod theme;
pub mod entries;
pub mod client;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{get_default_catalog, Catalog};
pub use config::{CheckinFormat, Config};
pub use breathing::{BreathingSession, BreathingSessionState, SessionStatus, TickOutcome};
pub use activity::{ActiveActivity, ActivityCoordinator, GuidedSession, GuidedTick};
pub use ticker::{IntervalTicker, ManualTicker, SessionControl, TickSource};
pub use garden::{garden_health_score, growth_for, growth_message, plant_type_for};
pub use theme::{ThemeContext, ThemeMode};
pub use entries::load_entries_csv;
pub use client::{ApiClient, MoodCheckin};
