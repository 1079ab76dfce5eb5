//! Operator session: the single slot that carries a prediction to the publish step.
//!
//! States move `NoPrediction → Predicted → Published` only on explicit operator
//! actions. Predicting again after a publish starts a new draft; publishing
//! again overwrites the board.

use crate::announcement::{AnnouncementDraft, AnnouncementPublisher};
use crate::dataset::EarthquakeRecord;
use crate::error::{AppError, Result};
use crate::ml::PredictionService;
use crate::models::{AnnouncementDocument, FeatureField, FeatureVector};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    NoPrediction,
    Predicted(AnnouncementDraft),
    Published {
        draft: AnnouncementDraft,
        document: AnnouncementDocument,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::NoPrediction => "no prediction yet",
            SessionState::Predicted(_) => "predicted, not yet published",
            SessionState::Published { .. } => "published",
        }
    }

    fn draft_mut(&mut self) -> Option<&mut AnnouncementDraft> {
        match self {
            SessionState::NoPrediction => None,
            SessionState::Predicted(draft) => Some(draft),
            SessionState::Published { draft, .. } => Some(draft),
        }
    }
}

/// One operator's working state
#[derive(Debug, Clone)]
pub struct OperatorSession {
    events: Vec<EarthquakeRecord>,
    selected: Option<usize>,
    inputs: FeatureVector,
    state: SessionState,
}

impl OperatorSession {
    /// Start a session over the selectable events, with the most recent one selected
    pub fn new(events: &[EarthquakeRecord]) -> Result<Self> {
        let mut session = Self {
            events: events.to_vec(),
            selected: None,
            inputs: FeatureVector::default(),
            state: SessionState::NoPrediction,
        };

        if !session.events.is_empty() {
            session.select(session.events.len() - 1)?;
        }

        Ok(session)
    }

    pub fn events(&self) -> &[EarthquakeRecord] {
        &self.events
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_event(&self) -> Option<&EarthquakeRecord> {
        self.selected.and_then(|idx| self.events.get(idx))
    }

    /// Select an event; its readings replace the current inputs
    pub fn select(&mut self, index: usize) -> Result<()> {
        let record = self.events.get(index).ok_or_else(|| {
            AppError::Validation(format!(
                "row {} is out of range (0..{})",
                index,
                self.events.len()
            ))
        })?;

        self.inputs = record.features()?;
        self.selected = Some(index);
        Ok(())
    }

    /// Manually override one reading
    pub fn set_feature(&mut self, field: FeatureField, value: f64) {
        self.inputs.set(field, value);
    }

    /// Manually override one reading from text
    pub fn set_feature_text(&mut self, name: &str, raw: &str) -> Result<()> {
        let field: FeatureField = name
            .parse()
            .map_err(|_| AppError::Validation(format!("unknown feature {:?}", name)))?;
        let value = field.parse_value(raw)?;
        self.set_feature(field, value);
        Ok(())
    }

    pub fn inputs(&self) -> &FeatureVector {
        &self.inputs
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Pending or last published draft
    pub fn draft(&self) -> Option<&AnnouncementDraft> {
        match &self.state {
            SessionState::NoPrediction => None,
            SessionState::Predicted(draft) => Some(draft),
            SessionState::Published { draft, .. } => Some(draft),
        }
    }

    /// Classify the current inputs and hold the result for publishing
    pub fn predict(&mut self, predictor: &PredictionService) -> Result<AnnouncementDraft> {
        let level = predictor.predict(&self.inputs)?;
        let region = self.selected_event().and_then(|e| e.place.as_deref());
        let draft = AnnouncementDraft::new(level, self.inputs, region);

        info!(risk_level = %draft.risk_level, inputs = %self.inputs, "Prediction held for publishing");
        self.state = SessionState::Predicted(draft.clone());
        Ok(draft)
    }

    pub fn set_region(&mut self, region: impl Into<String>) -> Result<()> {
        let draft = self.require_draft()?;
        draft.region = region.into();
        Ok(())
    }

    pub fn set_message(&mut self, message: impl Into<String>) -> Result<()> {
        let draft = self.require_draft()?;
        draft.message = message.into();
        Ok(())
    }

    /// Publish the held prediction, overwriting any earlier announcement
    pub fn publish(&mut self, publisher: &AnnouncementPublisher) -> Result<AnnouncementDocument> {
        let draft = self.draft().cloned().ok_or_else(Self::no_prediction)?;
        let document = publisher.publish(&draft)?;
        self.state = SessionState::Published {
            draft,
            document: document.clone(),
        };
        Ok(document)
    }

    fn require_draft(&mut self) -> Result<&mut AnnouncementDraft> {
        self.state.draft_mut().ok_or_else(Self::no_prediction)
    }

    fn no_prediction() -> AppError {
        AppError::InvalidState("no prediction to publish; run a prediction first".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::announcement::{AnnouncementStore, InMemoryAnnouncementStore};
    use crate::dataset::Dataset;
    use crate::ml::{Classifier, LabelEncoder};
    use crate::models::DEFAULT_REGION;
    use assert_matches::assert_matches;
    use ndarray::Array2;
    use std::sync::Arc;

    /// Orange when sig >= 500, green otherwise
    struct SigThreshold;

    impl Classifier for SigThreshold {
        fn predict_batch(&self, features: &Array2<f64>) -> Result<Vec<usize>> {
            Ok(features
                .rows()
                .into_iter()
                .map(|row| if row[4] >= 500.0 { 1 } else { 0 })
                .collect())
        }
    }

    fn predictor() -> PredictionService {
        let encoder = LabelEncoder::fit(["green", "orange"]).unwrap();
        PredictionService::new(Box::new(SigThreshold), encoder)
    }

    fn events() -> Vec<EarthquakeRecord> {
        let csv = "place,magnitude,depth,cdi,mmi,sig\nNorth Ridge,6.5,12,4,5,650\n,4.0,30,2,2,120\n";
        Dataset::from_reader(csv.as_bytes())
            .unwrap()
            .records()
            .to_vec()
    }

    #[test]
    fn test_new_session_selects_last_event() {
        let session = OperatorSession::new(&events()).unwrap();

        assert_eq!(session.selected_index(), Some(1));
        assert_eq!(session.inputs().sig, 120.0);
        assert_eq!(session.state(), &SessionState::NoPrediction);
    }

    #[test]
    fn test_empty_session_uses_fallback_inputs() {
        let session = OperatorSession::new(&[]).unwrap();
        assert_eq!(session.selected_index(), None);
        assert_eq!(*session.inputs(), FeatureVector::default());
    }

    #[test]
    fn test_predict_carries_place_as_region() {
        let mut session = OperatorSession::new(&events()).unwrap();
        session.select(0).unwrap();

        let draft = session.predict(&predictor()).unwrap();
        assert_eq!(draft.risk_level.as_str(), "orange");
        assert_eq!(draft.region, "North Ridge");
        assert!(draft.message.contains("ORANGE"));
    }

    #[test]
    fn test_manual_override_keeps_selected_region() {
        let mut session = OperatorSession::new(&events()).unwrap();
        session.set_feature_text("sig", "900").unwrap();

        let draft = session.predict(&predictor()).unwrap();
        assert_eq!(draft.risk_level.as_str(), "orange");
        assert_eq!(draft.region, DEFAULT_REGION);
        assert_eq!(draft.inputs.sig, 900.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut session = OperatorSession::new(&events()).unwrap();

        assert_matches!(session.set_feature_text("sig", "loud"), Err(AppError::Validation(_)));
        assert_matches!(session.set_feature_text("speed", "1"), Err(AppError::Validation(_)));
        assert_matches!(session.select(9), Err(AppError::Validation(_)));
    }

    #[test]
    fn test_publish_requires_prediction() {
        let store = Arc::new(InMemoryAnnouncementStore::new());
        let publisher = AnnouncementPublisher::new(store.clone());
        let mut session = OperatorSession::new(&events()).unwrap();

        assert_matches!(session.publish(&publisher), Err(AppError::InvalidState(_)));
        assert_matches!(session.set_region("x"), Err(AppError::InvalidState(_)));
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_publish_flow_and_republish() {
        let store = Arc::new(InMemoryAnnouncementStore::new());
        let publisher = AnnouncementPublisher::new(store.clone());
        let mut session = OperatorSession::new(&events()).unwrap();

        session.select(0).unwrap();
        session.predict(&predictor()).unwrap();
        session.set_region("Test Region").unwrap();
        session.set_message("Take shelter").unwrap();
        session.publish(&publisher).unwrap();
        assert_eq!(session.state().name(), "published");

        session.set_message("Aftershocks expected").unwrap();
        session.publish(&publisher).unwrap();

        let stored = store.read().unwrap().unwrap();
        assert_eq!(stored.announcements.len(), 1);
        assert_eq!(stored.announcements[0].region, "Test Region");
        assert_eq!(stored.announcements[0].message, "Aftershocks expected");
    }
}
