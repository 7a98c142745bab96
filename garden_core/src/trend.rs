//! Weekly mood trend series for charting.
//!
//! The backend returns only the days that have check-ins; the chart always
//! shows the last seven days ending today, with missing days at zero.

use crate::{MoodEntry, MoodTrend};
use chrono::{Duration, NaiveDate};

/// Average used when no day in the window has data
pub const NEUTRAL_AVERAGE: f64 = 3.0;

/// Difference between first and last score still considered steady
const STEADY_TOLERANCE: f64 = 0.25;

/// Highest score the chart draws
pub const MAX_SCORE: f64 = 5.0;

/// Bar cells drawn per score point
const CELLS_PER_POINT: f64 = 4.0;

/// One chart column
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub label: String,
    pub score: f64,
}

/// Direction of mood over the charted window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrendDirection {
    Improving,
    Declining,
    Steady,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Improving => "Positive trend",
            TrendDirection::Declining => "Needs care",
            TrendDirection::Steady => "Steady",
        }
    }
}

/// Colour band of the weekly average, highest first
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoodTone {
    Flourishing,
    Good,
    Okay,
    Low,
    Struggling,
}

impl MoodTone {
    pub fn from_average(average: f64) -> Self {
        match average {
            a if a >= 4.5 => MoodTone::Flourishing,
            a if a >= 3.5 => MoodTone::Good,
            a if a >= 2.5 => MoodTone::Okay,
            a if a >= 1.5 => MoodTone::Low,
            _ => MoodTone::Struggling,
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            MoodTone::Flourishing => "#4CAF50",
            MoodTone::Good => "#8BC34A",
            MoodTone::Okay => "#FFC107",
            MoodTone::Low => "#FF9800",
            MoodTone::Struggling => "#F44336",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodTone::Flourishing => "Flourishing",
            MoodTone::Good => "Good",
            MoodTone::Okay => "Okay",
            MoodTone::Low => "Low",
            MoodTone::Struggling => "Struggling",
        }
    }
}

/// Width of a chart bar, with the score clamped to `0..=MAX_SCORE`
pub fn bar_width(score: f64) -> usize {
    if !score.is_finite() {
        return 0;
    }
    (score.clamp(0.0, MAX_SCORE) * CELLS_PER_POINT).round() as usize
}

/// Seven points for `today - 6 ..= today`, zero where the backend had no data
pub fn weekly_series(trend: &MoodTrend, today: NaiveDate) -> Vec<SeriesPoint> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let score = trend
                .trend
                .iter()
                .find(|p| p.date == date)
                .map(|p| p.average_score)
                .unwrap_or(0.0);
            SeriesPoint {
                date,
                label: date.format("%a").to_string(),
                score,
            }
        })
        .collect()
}

/// Mean of the days that have data, or [`NEUTRAL_AVERAGE`]
pub fn series_average(series: &[SeriesPoint]) -> f64 {
    let scored: Vec<f64> = series
        .iter()
        .map(|p| p.score)
        .filter(|s| *s > 0.0)
        .collect();

    if scored.is_empty() {
        NEUTRAL_AVERAGE
    } else {
        scored.iter().sum::<f64>() / scored.len() as f64
    }
}

/// Compare the first and last logged day in the window
///
/// Returns `None` when fewer than two days have data.
pub fn trend_direction(series: &[SeriesPoint]) -> Option<TrendDirection> {
    let mut scored = series.iter().filter(|p| p.score > 0.0);
    let first = scored.next()?;
    let last = scored.last()?;

    let delta = last.score - first.score;
    let direction = if delta > STEADY_TOLERANCE {
        TrendDirection::Improving
    } else if delta < -STEADY_TOLERANCE {
        TrendDirection::Declining
    } else {
        TrendDirection::Steady
    };
    Some(direction)
}

/// Convert trend points into whole-number mood entries
pub fn entries_from_trend(trend: &MoodTrend) -> Vec<MoodEntry> {
    let mut entries: Vec<MoodEntry> = trend
        .trend
        .iter()
        .map(|p| MoodEntry::new(p.date, p.average_score.round() as i32))
        .collect();
    entries.sort_by_key(|e| e.date);
    entries
}
