//! Mood to garden growth mapping.
//!
//! Each logged day becomes a plant whose size and kind follow the mood.
//! Out-of-range moods fall back to an empty sprout instead of failing so a
//! bad record never breaks rendering.

use crate::{GardenDayState, MoodEntry, MoodLevel, PlantType};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Growth percentage for a mood value (0 when out of range)
pub fn growth_for(mood_value: i32) -> u32 {
    match mood_value {
        1 => 20,
        2 => 40,
        3 => 60,
        4 => 80,
        5 => 100,
        _ => 0,
    }
}

/// Plant type for a mood value (sprout when out of range)
pub fn plant_type_for(mood_value: i32) -> PlantType {
    match mood_value {
        3 | 4 => PlantType::Flower,
        5 => PlantType::Tree,
        _ => PlantType::Sprout,
    }
}

/// Status label for a growth percentage
pub fn growth_message(growth: u32) -> &'static str {
    match growth {
        90.. => "Thriving!",
        70..=89 => "Growing strong",
        50..=69 => "Budding",
        30..=49 => "Sprouting",
        _ => "Just planted",
    }
}

/// Aggregate mood over `entries` as a 0-100 score
///
/// Returns `None` for an empty slice; there is no meaningful score without
/// data. The result is clamped to 0..=100 when entries carry out-of-range
/// moods.
pub fn garden_health_score(entries: &[MoodEntry]) -> Option<u32> {
    if entries.is_empty() {
        return None;
    }

    let total: i64 = entries.iter().map(|e| i64::from(e.mood_value)).sum();
    let max = 5.0 * entries.len() as f64;
    let score = (100.0 * total as f64 / max).round();
    Some(score.clamp(0.0, 100.0) as u32)
}

/// Derived plant state for one entry
pub fn day_state(entry: &MoodEntry) -> GardenDayState {
    GardenDayState {
        growth_percent: growth_for(entry.mood_value),
        plant_type: plant_type_for(entry.mood_value),
    }
}

/// Monday of the week containing `date`
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// One plot in the weekly garden
#[derive(Clone, Debug, PartialEq)]
pub struct GardenDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub mood: Option<MoodLevel>,
    pub state: Option<GardenDayState>,
}

impl GardenDay {
    /// Label under the plot
    pub fn status(&self) -> &'static str {
        match self.state {
            Some(state) => growth_message(state.growth_percent),
            None => "Not logged",
        }
    }
}

/// Lay out the Monday..Sunday week containing `any_day`
///
/// Days without an entry have no state. If several entries share a date the
/// last one wins.
pub fn garden_week(entries: &[MoodEntry], any_day: NaiveDate) -> Vec<GardenDay> {
    let monday = week_start_of(any_day);

    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let entry = entries.iter().rev().find(|e| e.date == date);
            GardenDay {
                date,
                weekday: date.weekday(),
                mood: entry.and_then(|e| MoodLevel::from_value(e.mood_value)),
                state: entry.map(day_state),
            }
        })
        .collect()
}

/// Entries that fall inside the week containing `any_day`
pub fn entries_in_week(entries: &[MoodEntry], any_day: NaiveDate) -> Vec<MoodEntry> {
    let monday = week_start_of(any_day);
    let sunday = monday + Duration::days(6);
    entries
        .iter()
        .filter(|e| e.date >= monday && e.date <= sunday)
        .cloned()
        .collect()
}

/// How a plant is drawn for a given growth
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantVisual {
    pub scale: f32,
    pub opacity: f32,
    pub growth_ring: bool,
    pub sparkle: bool,
}

impl PlantVisual {
    pub fn for_growth(growth: u32) -> Self {
        let g = growth.min(100) as f32 / 100.0;
        Self {
            scale: 0.3 + g * 0.7,
            opacity: 0.5 + g * 0.5,
            growth_ring: growth > 70,
            sparkle: growth > 90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entries(moods: &[i32]) -> Vec<MoodEntry> {
        let start = date("2024-05-06");
        moods
            .iter()
            .enumerate()
            .map(|(i, m)| MoodEntry::new(start + Duration::days(i as i64), *m))
            .collect()
    }

    #[test]
    fn test_lookup_tables() {
        let expected = [
            (1, 20, PlantType::Sprout),
            (2, 40, PlantType::Sprout),
            (3, 60, PlantType::Flower),
            (4, 80, PlantType::Flower),
            (5, 100, PlantType::Tree),
        ];
        for (mood, growth, plant) in expected {
            assert_eq!(growth_for(mood), growth);
            assert_eq!(plant_type_for(mood), plant);
        }
    }

    #[test]
    fn test_out_of_range_defaults() {
        for mood in [-3, 0, 6, 42] {
            assert_eq!(growth_for(mood), 0);
            assert_eq!(plant_type_for(mood), PlantType::Sprout);
        }
    }

    #[test]
    fn test_health_score() {
        assert_eq!(garden_health_score(&entries(&[4, 3, 5, 4, 2])), Some(72));
        assert_eq!(garden_health_score(&entries(&[5, 5])), Some(100));
        assert_eq!(garden_health_score(&entries(&[1])), Some(20));
        // 100 * 7 / 15 = 46.67
        assert_eq!(garden_health_score(&entries(&[2, 2, 3])), Some(47));
    }

    #[test]
    fn test_health_score_empty_is_none() {
        assert_eq!(garden_health_score(&[]), None);
    }

    #[test]
    fn test_growth_message_boundaries() {
        assert_eq!(growth_message(100), "Thriving!");
        assert_eq!(growth_message(90), "Thriving!");
        assert_eq!(growth_message(89), "Growing strong");
        assert_eq!(growth_message(70), "Growing strong");
        assert_eq!(growth_message(69), "Budding");
        assert_eq!(growth_message(50), "Budding");
        assert_eq!(growth_message(30), "Sprouting");
        assert_eq!(growth_message(29), "Just planted");
        assert_eq!(growth_message(0), "Just planted");
    }

    #[test]
    fn test_garden_week_layout() {
        // 2024-05-08 is a Wednesday
        let log = vec![
            MoodEntry::new(date("2024-05-06"), 5),
            MoodEntry::new(date("2024-05-08"), 2),
            MoodEntry::new(date("2024-05-13"), 4),
        ];
        let week = garden_week(&log, date("2024-05-08"));

        assert_eq!(week.len(), 7);
        assert_eq!(week[0].weekday, Weekday::Mon);
        assert_eq!(week[6].weekday, Weekday::Sun);
        assert_eq!(
            week[0].state,
            Some(GardenDayState {
                growth_percent: 100,
                plant_type: PlantType::Tree
            })
        );
        assert_eq!(week[0].status(), "Thriving!");
        assert_eq!(week[1].state, None);
        assert_eq!(week[1].status(), "Not logged");
        assert_eq!(week[2].mood, Some(MoodLevel::Low));
        assert!(week.iter().all(|d| d.date < date("2024-05-13")));
    }

    #[test]
    fn test_entries_in_week() {
        let log = vec![
            MoodEntry::new(date("2024-05-05"), 3),
            MoodEntry::new(date("2024-05-06"), 4),
            MoodEntry::new(date("2024-05-12"), 2),
            MoodEntry::new(date("2024-05-13"), 5),
        ];
        let week = entries_in_week(&log, date("2024-05-10"));
        assert_eq!(week.len(), 2);
        assert_eq!(garden_health_score(&week), Some(60));
    }

    #[test]
    fn test_plant_visual() {
        let small = PlantVisual::for_growth(0);
        assert!((small.scale - 0.3).abs() < f32::EPSILON);
        assert!(!small.growth_ring);

        let full = PlantVisual::for_growth(100);
        assert!((full.scale - 1.0).abs() < 1e-6);
        assert!((full.opacity - 1.0).abs() < 1e-6);
        assert!(full.growth_ring && full.sparkle);

        let good = PlantVisual::for_growth(80);
        assert!(good.growth_ring && !good.sparkle);
    }
}
