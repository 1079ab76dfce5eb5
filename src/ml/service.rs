use crate::error::Result;
use crate::ml::artifact;
use crate::ml::classifier::{Classifier, RandomForestAlertClassifier};
use crate::ml::encoder::LabelEncoder;
use crate::models::{AlertLevel, FeatureVector};
use std::path::Path;
use tracing::{debug, info};

/// Alert-level prediction over a fitted classifier and label encoder
pub struct PredictionService {
    /// Classifier producing integer class codes
    classifier: Box<dyn Classifier>,

    /// Decoder for the classifier's codes
    encoder: LabelEncoder,
}

impl PredictionService {
    /// Create a new prediction service
    pub fn new(classifier: Box<dyn Classifier>, encoder: LabelEncoder) -> Self {
        Self {
            classifier,
            encoder,
        }
    }

    /// Load the persisted random forest and label encoder
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(model_path: P, encoder_path: Q) -> Result<Self> {
        let classifier: RandomForestAlertClassifier = artifact::load(model_path.as_ref())?;
        let encoder: LabelEncoder = artifact::load(encoder_path.as_ref())?;

        info!(
            model = %model_path.as_ref().display(),
            classes = ?encoder.classes(),
            "Prediction service loaded"
        );

        Ok(Self::new(Box::new(classifier), encoder))
    }

    /// Predict the alert level for one feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<AlertLevel> {
        let code = self.classifier.predict(features)?;
        let level = self.encoder.inverse_transform(code)?;
        debug!(%features, level = %level, "Alert level predicted");
        Ok(level)
    }

    /// Alert levels the loaded encoder knows about
    pub fn labels(&self) -> &[AlertLevel] {
        self.encoder.classes()
    }
}
