//! Tunables for the carousel and the page timers.
//!
//! Both structs deserialize from JSON with every field optional, so a page can
//! override a single value through a `data-*` attribute and keep the rest.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Space between slides in CSS pixels.
    pub gap: f64,
    /// Share of the overshoot applied when dragging past the first/last slide.
    pub resistance: f64,
    /// Fraction of the slide width a release must travel to change slides.
    pub snap_ratio: f64,
    /// Movement (px) below which a gesture still counts as a tap.
    pub jitter_px: f64,
    pub release_reset_ms: u32,
    pub resize_settle_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            gap: 20.0,
            resistance: 0.25,
            snap_ratio: 0.15,
            jitter_px: 3.0,
            release_reset_ms: 100,
            resize_settle_ms: 50,
        }
    }
}

impl CarouselConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Self::parse(raw).map(Self::sanitized)
    }

    /// Parse without range checks, so callers can report what `sanitized` replaced.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(raw)
    }

    /// Replace values that would break the drag math with their defaults.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let pick = |v: f64, ok: bool, fallback: f64| if v.is_finite() && ok { v } else { fallback };
        Self {
            gap: pick(self.gap, self.gap >= 0.0, d.gap),
            resistance: pick(self.resistance, (0.0..=1.0).contains(&self.resistance), d.resistance),
            snap_ratio: pick(self.snap_ratio, (0.0..=1.0).contains(&self.snap_ratio), d.snap_ratio),
            jitter_px: pick(self.jitter_px, self.jitter_px >= 0.0, d.jitter_px),
            release_reset_ms: self.release_reset_ms,
            resize_settle_ms: self.resize_settle_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub loader_reveal_ms: u32,
    pub loader_remove_ms: u32,
    pub hero_start_ms: u32,
    pub pills_ms: u32,
    pub modal_close_ms: u32,
    pub scroll_behavior_restore_ms: u32,
    pub dev_popup_ms: u32,
    pub consent_banner_ms: u32,
    /// Widest viewport (px) treated as mobile.
    pub mobile_breakpoint_px: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            loader_reveal_ms: 300,
            loader_remove_ms: 1100,
            hero_start_ms: 1100,
            pills_ms: 1200,
            modal_close_ms: 500,
            scroll_behavior_restore_ms: 50,
            dev_popup_ms: 2500,
            consent_banner_ms: 1000,
            mobile_breakpoint_px: 767,
        }
    }
}

impl Timings {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Timings for the current page: `<body data-timings='{...}'>` or defaults.
    pub fn for_page() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .and_then(|b| b.get_attribute("data-timings"));
        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                crate::util::cwarn(&format!("ignoring data-timings: {e}"));
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn is_mobile_width(&self, width: f64) -> bool {
        width <= self.mobile_breakpoint_px as f64
    }
}
