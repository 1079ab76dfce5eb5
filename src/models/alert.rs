use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert level label as learned from the training data (e.g. "green", "orange").
///
/// The vocabulary is not compiled in; valid values are whatever the fitted
/// label encoder knows about. Stored lowercase, displayed uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertLevel(String);

impl AlertLevel {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_lowercase())
    }

    /// Canonical lowercase label
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase form for display
    pub fn display_name(&self) -> String {
        self.0.to_uppercase()
    }

    /// Colour marker shown next to the level on the board
    pub fn marker(&self) -> &'static str {
        match self.0.as_str() {
            "green" => "🟢",
            "yellow" => "🟡",
            "orange" => "🟠",
            "red" => "🔴",
            _ => "🔶",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AlertLevel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}
