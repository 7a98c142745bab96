//! Core domain types for the Mind Garden system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Breathing phases, patterns and presets
//! - Mood entries, mood levels and quick check-in emotions
//! - Garden plants and derived day states
//! - Backend trend and quote payloads

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Breathing Types
// ============================================================================

/// Stage of a breathing cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// On-screen instruction for this phase
    pub fn instruction(&self) -> &'static str {
        match self {
            Phase::Inhale => "Breathe In",
            Phase::Hold => "Hold",
            Phase::Exhale => "Breathe Out",
        }
    }

    /// Scale of the pulsing circle while in this phase
    pub fn scale(&self) -> f32 {
        match self {
            Phase::Inhale => 1.2,
            Phase::Hold => 1.1,
            Phase::Exhale => 0.8,
        }
    }
}

/// Seconds spent in each phase of one breathing cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreathingPattern {
    pub inhale: u32,
    pub hold: u32,
    pub exhale: u32,
}

impl BreathingPattern {
    /// Build a pattern, rejecting one whose cycle would last zero seconds
    pub fn new(inhale: u32, hold: u32, exhale: u32) -> Result<Self> {
        let pattern = Self {
            inhale,
            hold,
            exhale,
        };
        if pattern.cycle_seconds() == 0 {
            return Err(Error::InvalidPattern(
                "inhale + hold + exhale must be greater than zero".into(),
            ));
        }
        Ok(pattern)
    }

    /// Length of one full cycle in seconds
    ///
    /// Summed in `u64` so three `u32::MAX` phases cannot wrap.
    pub fn cycle_seconds(&self) -> u64 {
        u64::from(self.inhale) + u64::from(self.hold) + u64::from(self.exhale)
    }
}

/// Kind of reference link attached to a preset
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Info,
    Video,
}

/// A named, built-in breathing pattern
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BreathingPreset {
    pub slug: String,
    pub name: String,
    pub pattern: BreathingPattern,
    pub description: String,
    pub suggested_duration: String,
    pub link_kind: LinkKind,
    pub reference_url: String,
}

// ============================================================================
// Mood Types
// ============================================================================

/// One mood rating for one calendar day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood_value: i32,
}

impl MoodEntry {
    pub fn new(date: NaiveDate, mood_value: i32) -> Self {
        Self { date, mood_value }
    }
}

/// The five-point mood scale
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    Terrible = 1,
    Low = 2,
    Okay = 3,
    Good = 4,
    Amazing = 5,
}

impl MoodLevel {
    /// All levels, best first (the order the picker shows them)
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::Amazing,
        MoodLevel::Good,
        MoodLevel::Okay,
        MoodLevel::Low,
        MoodLevel::Terrible,
    ];

    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            1 => Some(MoodLevel::Terrible),
            2 => Some(MoodLevel::Low),
            3 => Some(MoodLevel::Okay),
            4 => Some(MoodLevel::Good),
            5 => Some(MoodLevel::Amazing),
            _ => None,
        }
    }

    pub fn value(&self) -> i32 {
        *self as i32
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodLevel::Terrible => "Terrible",
            MoodLevel::Low => "Low",
            MoodLevel::Okay => "Okay",
            MoodLevel::Good => "Good",
            MoodLevel::Amazing => "Amazing",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodLevel::Terrible => "😢",
            MoodLevel::Low => "😔",
            MoodLevel::Okay => "😐",
            MoodLevel::Good => "😊",
            MoodLevel::Amazing => "😄",
        }
    }

    /// Indicator colour as a hex string
    pub fn colour(&self) -> &'static str {
        match self {
            MoodLevel::Terrible => "#F44336",
            MoodLevel::Low => "#FF9800",
            MoodLevel::Okay => "#FFC107",
            MoodLevel::Good => "#8BC34A",
            MoodLevel::Amazing => "#4CAF50",
        }
    }
}

/// Emotions offered by the quick mood check
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Calm,
    Sad,
    Anxious,
    Angry,
    Tired,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Calm,
        Emotion::Sad,
        Emotion::Anxious,
        Emotion::Angry,
        Emotion::Tired,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Calm => "Calm",
            Emotion::Sad => "Sad",
            Emotion::Anxious => "Anxious",
            Emotion::Angry => "Angry",
            Emotion::Tired => "Tired",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Calm => "😌",
            Emotion::Sad => "😔",
            Emotion::Anxious => "😰",
            Emotion::Angry => "😡",
            Emotion::Tired => "😴",
        }
    }

    /// Case-insensitive lookup by label
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.label().eq_ignore_ascii_case(s.trim()))
    }
}

// ============================================================================
// Garden Types
// ============================================================================

/// Plant drawn for a day in the garden
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    #[default]
    Sprout,
    Flower,
    Tree,
}

impl PlantType {
    pub fn symbol(&self) -> &'static str {
        match self {
            PlantType::Sprout => "🌱",
            PlantType::Flower => "🌸",
            PlantType::Tree => "🌳",
        }
    }
}

/// Derived garden state for a logged day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GardenDayState {
    pub growth_percent: u32,
    pub plant_type: PlantType,
}

// ============================================================================
// Backend Payload Types
// ============================================================================

/// Daily average from the backend's weekly mood trend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MoodTrendPoint {
    pub date: NaiveDate,
    pub average_score: f64,
    pub count: u32,
}

/// Weekly mood trend response
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MoodTrend {
    #[serde(default)]
    pub trend: Vec<MoodTrendPoint>,
}

/// A motivational quote or affirmation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: Option<String>,
}

// ============================================================================
// Guided Activity Type
// ============================================================================

/// A fixed-length mindfulness activity
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GuidedActivity {
    pub slug: String,
    pub title: String,
    pub duration_seconds: u32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_pattern_rejected() {
        assert!(matches!(
            BreathingPattern::new(0, 0, 0),
            Err(Error::InvalidPattern(_))
        ));
        assert_eq!(BreathingPattern::new(4, 0, 6).unwrap().cycle_seconds(), 10);
    }

    #[test]
    fn test_huge_pattern_does_not_wrap() {
        let pattern = BreathingPattern::new(u32::MAX, 1, 0).unwrap();
        assert_eq!(pattern.cycle_seconds(), u64::from(u32::MAX) + 1);

        let pattern = BreathingPattern::new(u32::MAX, u32::MAX, u32::MAX).unwrap();
        assert_eq!(pattern.cycle_seconds(), 3 * u64::from(u32::MAX));
    }

    #[test]
    fn test_mood_level_values() {
        for level in MoodLevel::ALL {
            assert_eq!(MoodLevel::from_value(level.value()), Some(level));
        }
        assert_eq!(MoodLevel::from_value(0), None);
        assert_eq!(MoodLevel::from_value(6), None);
    }

    #[test]
    fn test_emotion_parse() {
        assert_eq!(Emotion::parse("happy"), Some(Emotion::Happy));
        assert_eq!(Emotion::parse(" ANXIOUS "), Some(Emotion::Anxious));
        assert_eq!(Emotion::parse("bored"), None);
    }

    #[test]
    fn test_trend_missing_field_defaults_empty() {
        let trend: MoodTrend = serde_json::from_str("{}").unwrap();
        assert!(trend.trend.is_empty());

        let trend: MoodTrend = serde_json::from_str(
            r#"{"trend":[{"date":"2024-05-06","average_score":3.5,"count":2}]}"#,
        )
        .unwrap();
        assert_eq!(trend.trend[0].count, 2);
    }
}
