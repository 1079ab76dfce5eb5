use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::AlertLevel;
use super::feature::FeatureVector;

/// Region used when the selected event carries no place name
pub const DEFAULT_REGION: &str = "Affected area";

/// Fixed safety guidance attached to every announcement
pub const SAFETY_TIPS: [&str; 3] = [
    "Take cover under a sturdy table or structure",
    "Stay away from elevators and glass",
    "Shut off gas and electricity",
];

/// Format of `last_updated`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Default announcement text for a predicted level
pub fn default_message(level: &AlertLevel) -> String {
    format!(
        "Seismic activity detected at alert level {}. Please follow the safety guidance below.",
        level.display_name()
    )
}

/// The persisted announcement document; holds only the latest publish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementDocument {
    /// UTC time of the most recent publish
    pub last_updated: String,

    /// Entries to display, newest publish only
    pub announcements: Vec<AnnouncementEntry>,
}

impl AnnouncementDocument {
    /// Document holding exactly one entry, stamped with `now`
    pub fn single(entry: AnnouncementEntry, now: DateTime<Utc>) -> Self {
        Self {
            last_updated: now.format(TIMESTAMP_FORMAT).to_string(),
            announcements: vec![entry],
        }
    }
}

/// A single public announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementEntry {
    /// Publish-time epoch seconds; not unique within the same second
    #[serde(default)]
    pub id: String,

    #[serde(default = "unknown_region")]
    pub region: String,

    pub risk_level: AlertLevel,

    pub message: String,

    #[serde(default)]
    pub tips: Vec<String>,

    /// Readings that produced the prediction
    #[serde(default)]
    pub inputs: FeatureVector,
}

/// Region shown for stored entries that carry none
pub const UNKNOWN_REGION: &str = "-";

fn unknown_region() -> String {
    UNKNOWN_REGION.to_string()
}

impl AnnouncementEntry {
    pub fn new(
        risk_level: AlertLevel,
        region: impl Into<String>,
        message: impl Into<String>,
        inputs: FeatureVector,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: now.timestamp().to_string(),
            region: region.into(),
            risk_level,
            message: message.into(),
            tips: SAFETY_TIPS.iter().map(|t| t.to_string()).collect(),
            inputs,
        }
    }
}
