use crate::announcement::AnnouncementStore;
use crate::error::Result;
use crate::models::{
    default_message, AlertLevel, AnnouncementDocument, AnnouncementEntry, FeatureVector,
    DEFAULT_REGION,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Editable announcement awaiting publication
#[derive(Debug, Clone, PartialEq)]
pub struct AnnouncementDraft {
    pub risk_level: AlertLevel,
    pub region: String,
    pub message: String,
    pub inputs: FeatureVector,
}

impl AnnouncementDraft {
    /// Draft with the default message; region falls back to "Affected area"
    pub fn new(risk_level: AlertLevel, inputs: FeatureVector, region: Option<&str>) -> Self {
        let message = default_message(&risk_level);
        Self {
            risk_level,
            region: region
                .filter(|r| !r.trim().is_empty())
                .unwrap_or(DEFAULT_REGION)
                .to_string(),
            message,
            inputs,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Publishes drafts by replacing the whole announcement document
#[derive(Clone)]
pub struct AnnouncementPublisher {
    store: Arc<dyn AnnouncementStore>,
}

impl AnnouncementPublisher {
    pub fn new(store: Arc<dyn AnnouncementStore>) -> Self {
        Self { store }
    }

    /// Publish stamped with the current UTC time
    pub fn publish(&self, draft: &AnnouncementDraft) -> Result<AnnouncementDocument> {
        self.publish_at(draft, Utc::now())
    }

    /// Publish stamped with `now`; any previous document is overwritten
    pub fn publish_at(
        &self,
        draft: &AnnouncementDraft,
        now: DateTime<Utc>,
    ) -> Result<AnnouncementDocument> {
        let entry = AnnouncementEntry::new(
            draft.risk_level.clone(),
            draft.region.clone(),
            draft.message.clone(),
            draft.inputs,
            now,
        );
        let document = AnnouncementDocument::single(entry, now);

        self.store.write(&document)?;
        info!(
            risk_level = %draft.risk_level,
            region = %draft.region,
            "📢 Announcement published"
        );

        Ok(document)
    }
}
