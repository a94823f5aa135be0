//! Data shown by the site overlays: the project case-study catalog and the
//! visitor's cookie-consent choice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Case studies, embedded at build time.
pub const PROJECTS_JSON: &str = include_str!("../assets/projects.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Day,
    Week,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseDuration {
    pub amount: f64,
    pub unit: DurationUnit,
}

impl PhaseDuration {
    pub fn in_days(&self) -> f64 {
        match self.unit {
            DurationUnit::Day => self.amount,
            DurationUnit::Week => self.amount * 7.0,
        }
    }
}

impl fmt::Display for PhaseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            DurationUnit::Day => "day",
            DurationUnit::Week => "week",
        };
        let plural = if (self.amount - 1.0).abs() < f64::EPSILON { "" } else { "s" };
        write!(f, "{} {unit}{plural}", self.amount)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelinePhase {
    pub name: String,
    pub duration: PhaseDuration,
}

/// Horizontal placement of one timeline bar, in percent of the track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarSpan {
    pub start_pct: f64,
    pub width_pct: f64,
}

/// Lay phases end to end, each sized by its share of the total duration.
pub fn timeline_layout(phases: &[TimelinePhase]) -> Vec<BarSpan> {
    let total: f64 = phases.iter().map(|p| p.duration.in_days().max(0.0)).sum();
    if total <= 0.0 {
        return phases.iter().map(|_| BarSpan { start_pct: 0.0, width_pct: 0.0 }).collect();
    }
    let mut start = 0.0;
    phases
        .iter()
        .map(|p| {
            let width = p.duration.in_days().max(0.0) / total * 100.0;
            let span = BarSpan { start_pct: start, width_pct: width };
            start += width;
            span
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SectionBody {
    Paragraph { text: String },
    Bullets { items: Vec<String> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    #[serde(flatten)]
    pub body: SectionBody,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRow {
    pub label: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub year: u16,
    pub tagline: String,
    /// e.g. "Branding & Web Development / 2025".
    pub discipline: String,
    /// e.g. "Industry: Elderly Care Services".
    pub industry: String,
    pub summary: String,
    pub hero: Image,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub gallery: Vec<Image>,
    #[serde(default)]
    pub timeline: Vec<TimelinePhase>,
    #[serde(default)]
    pub stack: Vec<StackRow>,
    #[serde(default)]
    pub launch_note: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub in_development: bool,
}

/// What the "Live Site" button of a project does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiveSiteAction {
    OpenUrl(String),
    ShowInDevelopment,
    Nothing,
}

impl Project {
    pub fn live_site_action(&self) -> LiveSiteAction {
        if self.in_development {
            LiveSiteAction::ShowInDevelopment
        } else if let Some(url) = &self.live_url {
            LiveSiteAction::OpenUrl(url.clone())
        } else {
            LiveSiteAction::Nothing
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub projects: Vec<Project>,
}

impl Catalog {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

/// Minimal get/set contract of the browser's key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl KeyValueStore for web_sys::Storage {
    fn get(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let _ = self.set_item(key, value);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentChoice {
    Accepted,
    Declined,
}

impl ConsentChoice {
    pub const STORAGE_KEY: &'static str = "cookieConsent";

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentChoice::Accepted => "accepted",
            ConsentChoice::Declined => "declined",
        }
    }

    /// Whether the visitor already answered the banner. Any non-empty stored
    /// value counts, including values written by older versions of the page.
    pub fn decided(store: &impl KeyValueStore) -> bool {
        store.get(Self::STORAGE_KEY).is_some_and(|v| !v.is_empty())
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        store.set(Self::STORAGE_KEY, self.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    fn phase(name: &str, amount: f64, unit: DurationUnit) -> TimelinePhase {
        TimelinePhase { name: name.into(), duration: PhaseDuration { amount, unit } }
    }

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::from_json(PROJECTS_JSON).unwrap();
        for id in ["aswent", "lumena", "tintara", "ges", "cherry-detailing", "finizen"] {
            assert!(catalog.get(id).is_some(), "missing project {id}");
        }
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn live_site_actions() {
        let catalog = Catalog::from_json(PROJECTS_JSON).unwrap();
        assert_eq!(
            catalog.get("aswent").unwrap().live_site_action(),
            LiveSiteAction::ShowInDevelopment
        );
        assert_eq!(
            catalog.get("lumena").unwrap().live_site_action(),
            LiveSiteAction::OpenUrl("https://www.lumenacare.eu/".into())
        );
    }

    #[test]
    fn timeline_splits_proportionally() {
        let spans = timeline_layout(&[
            phase("Branding", 3.0, DurationUnit::Week),
            phase("Design", 3.5, DurationUnit::Week),
            phase("Development", 3.5, DurationUnit::Week),
        ]);
        assert!((spans[0].start_pct - 0.0).abs() < 1e-9);
        assert!((spans[0].width_pct - 30.0).abs() < 1e-9);
        assert!((spans[1].start_pct - 30.0).abs() < 1e-9);
        assert!((spans[2].start_pct - 65.0).abs() < 1e-9);
        assert!((spans[2].width_pct - 35.0).abs() < 1e-9);
    }

    #[test]
    fn timeline_mixes_units() {
        let spans = timeline_layout(&[
            phase("Concept", 7.0, DurationUnit::Day),
            phase("Build", 1.0, DurationUnit::Week),
        ]);
        assert!((spans[0].width_pct - 50.0).abs() < 1e-9);
        assert!((spans[1].start_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn empty_timeline_has_no_nan() {
        let spans = timeline_layout(&[phase("Idle", 0.0, DurationUnit::Day)]);
        assert_eq!(spans, vec![BarSpan { start_pct: 0.0, width_pct: 0.0 }]);
    }

    #[test]
    fn duration_labels() {
        assert_eq!(PhaseDuration { amount: 1.0, unit: DurationUnit::Day }.to_string(), "1 day");
        assert_eq!(PhaseDuration { amount: 3.5, unit: DurationUnit::Week }.to_string(), "3.5 weeks");
    }

    #[test]
    fn consent_round_trips_through_store() {
        let store = MemStore::default();
        assert!(!ConsentChoice::decided(&store));
        ConsentChoice::Declined.save(&store);
        assert!(ConsentChoice::decided(&store));
        assert_eq!(store.get("cookieConsent").as_deref(), Some("declined"));
    }

    #[test]
    fn any_stored_consent_value_counts_as_decided() {
        let store = MemStore::default();
        store.set(ConsentChoice::STORAGE_KEY, "maybe");
        assert!(ConsentChoice::decided(&store));
        store.set(ConsentChoice::STORAGE_KEY, "");
        assert!(!ConsentChoice::decided(&store));
    }
}
