//! Section visibility flags
//!
//! The editor stores visibility toggles loosely: real booleans, numbers,
//! or strings like `"yes"`. Flags are re-derived once per render; unset
//! or unparseable values default to visible.

use serde::{Deserialize, Serialize};

use crate::card::CardConfig;

/// A loosely-typed visibility toggle as the editor emits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShowFlag {
    /// Real boolean.
    Bool(bool),
    /// Numeric toggle; only `1` counts as visible.
    Number(f64),
    /// String toggle.
    Text(String),
}

impl ShowFlag {
    /// Resolve the toggle. The truthy set is {`true`, `1`, `yes`},
    /// case-insensitive; blank and placeholder strings fall back to
    /// visible.
    pub fn is_visible(&self) -> bool {
        match self {
            ShowFlag::Bool(b) => *b,
            ShowFlag::Number(n) => *n == 1.0,
            ShowFlag::Text(s) => {
                let norm = s.trim().to_ascii_lowercase();
                if norm.is_empty() || norm == "null" || norm == "undefined" {
                    return true;
                }
                matches!(norm.as_str(), "true" | "1" | "yes")
            }
        }
    }
}

/// The `show` section of the card configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Title/header visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ShowFlag>,
    /// Camera feed visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<ShowFlag>,
    /// Control row visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<ShowFlag>,
    /// AMS slot section visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ams_slots: Option<ShowFlag>,
}

/// Resolved per-render visibility of the card sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibilityFlags {
    /// Show the title/header section.
    pub title: bool,
    /// Show the camera feed.
    pub camera: bool,
    /// Show the control row.
    pub control: bool,
    /// Show the AMS slot section.
    pub ams_slots: bool,
}

impl VisibilityFlags {
    /// Derive flags from a configuration; every unset flag is visible.
    pub fn from_config(config: &CardConfig) -> Self {
        let resolve = |flag: &Option<ShowFlag>| flag.as_ref().map_or(true, ShowFlag::is_visible);
        Self {
            title: resolve(&config.show.title),
            camera: resolve(&config.show.camera),
            control: resolve(&config.show.control),
            ams_slots: resolve(&config.show.ams_slots),
        }
    }
}

impl Default for VisibilityFlags {
    fn default() -> Self {
        Self {
            title: true,
            camera: true,
            control: true,
            ams_slots: true,
        }
    }
}
