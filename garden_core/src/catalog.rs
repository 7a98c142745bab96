//! Built-in breathing presets and guided mindfulness activities.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;

/// Cached catalog - built once and shared by every lookup
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Everything the mindfulness screen can offer
#[derive(Clone, Debug)]
pub struct Catalog {
    pub presets: Vec<BreathingPreset>,
    pub activities: Vec<GuidedActivity>,
}

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// Prefer `get_default_catalog()`; this is kept for tests and custom catalogs.
pub fn build_default_catalog() -> Catalog {
    let presets = vec![
        BreathingPreset {
            slug: "478".into(),
            name: "4-7-8 Breathing".into(),
            pattern: BreathingPattern {
                inhale: 4,
                hold: 7,
                exhale: 8,
            },
            description: "Relaxing pattern for stress relief".into(),
            suggested_duration: "5 min".into(),
            link_kind: LinkKind::Info,
            reference_url: "https://health.clevelandclinic.org/4-7-8-breathing".into(),
        },
        BreathingPreset {
            slug: "box".into(),
            name: "Box Breathing".into(),
            pattern: BreathingPattern {
                inhale: 4,
                hold: 4,
                exhale: 4,
            },
            description: "Equal breathing for focus and calm".into(),
            suggested_duration: "4 min".into(),
            link_kind: LinkKind::Info,
            reference_url: "https://health.clevelandclinic.org/box-breathing-benefits".into(),
        },
        BreathingPreset {
            slug: "simple".into(),
            name: "Simple Breath".into(),
            pattern: BreathingPattern {
                inhale: 4,
                hold: 0,
                exhale: 6,
            },
            description: "Basic breathing for beginners".into(),
            suggested_duration: "3 min".into(),
            link_kind: LinkKind::Video,
            reference_url:
                "https://www.youtube.com/results?search_query=simple+breathing+exercise+for+beginners"
                    .into(),
        },
    ];

    let activities = vec![
        GuidedActivity {
            slug: "body-scan".into(),
            title: "Body Scan".into(),
            duration_seconds: 600,
            description: "Progressive relaxation through your body".into(),
        },
        GuidedActivity {
            slug: "loving-kindness".into(),
            title: "Loving Kindness".into(),
            duration_seconds: 480,
            description: "Cultivate compassion for yourself and others".into(),
        },
        GuidedActivity {
            slug: "nature-sounds".into(),
            title: "Nature Sounds".into(),
            duration_seconds: 900,
            description: "Relax with calming forest and ocean sounds".into(),
        },
        GuidedActivity {
            slug: "gratitude".into(),
            title: "Gratitude Practice".into(),
            duration_seconds: 300,
            description: "Focus on things you appreciate".into(),
        },
    ];

    Catalog {
        presets,
        activities,
    }
}

impl Catalog {
    /// Look up a breathing preset by slug (case-insensitive)
    pub fn preset(&self, slug: &str) -> Result<&BreathingPreset> {
        self.presets
            .iter()
            .find(|p| p.slug.eq_ignore_ascii_case(slug))
            .ok_or_else(|| Error::UnknownPreset(slug.to_string()))
    }

    /// Look up a guided activity by slug (case-insensitive)
    pub fn activity(&self, slug: &str) -> Result<&GuidedActivity> {
        self.activities
            .iter()
            .find(|a| a.slug.eq_ignore_ascii_case(slug))
            .ok_or_else(|| Error::UnknownPreset(slug.to_string()))
    }

    /// Validate catalog integrity
    ///
    /// Returns a list of validation errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for preset in &self.presets {
            if preset.pattern.cycle_seconds() == 0 {
                errors.push(format!("Preset {} has a zero-length cycle", preset.slug));
            }
        }

        for activity in &self.activities {
            if activity.duration_seconds == 0 {
                errors.push(format!("Activity {} has no duration", activity.slug));
            }
        }

        let mut slugs: Vec<_> = self
            .presets
            .iter()
            .map(|p| p.slug.as_str())
            .chain(self.activities.iter().map(|a| a.slug.as_str()))
            .collect();
        slugs.sort_unstable();
        for pair in slugs.windows(2) {
            if pair[0] == pair[1] {
                errors.push(format!("Duplicate slug {}", pair[0]));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.presets.len(), 3);
        assert_eq!(catalog.activities.len(), 4);
    }

    #[test]
    fn test_preset_lookup() {
        let catalog = get_default_catalog();
        let simple = catalog.preset("SIMPLE").unwrap();
        assert_eq!(simple.pattern.hold, 0);
        assert_eq!(catalog.preset("478").unwrap().pattern.exhale, 8);
        assert!(matches!(
            catalog.preset("wim-hof"),
            Err(Error::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_activity_lookup() {
        let catalog = get_default_catalog();
        assert_eq!(catalog.activity("body-scan").unwrap().duration_seconds, 600);
        assert!(catalog.activity("yoga").is_err());
    }

    #[test]
    fn test_default_catalog_validates() {
        let errors = build_default_catalog().validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_duplicate_slug_detected() {
        let mut catalog = build_default_catalog();
        let dup = catalog.presets[0].clone();
        catalog.presets.push(dup);
        assert_eq!(catalog.validate(), vec!["Duplicate slug 478".to_string()]);
    }
}
