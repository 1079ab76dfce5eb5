//! Offline training pipeline: dataset → encoder → split → forest → metrics → artifacts.

use crate::config::TrainingConfig;
use crate::dataset::Dataset;
use crate::error::{AppError, Result};
use crate::ml::artifact;
use crate::ml::classifier::{Classifier, ForestParams, RandomForestAlertClassifier};
use crate::ml::encoder::LabelEncoder;
use crate::ml::models::{ModelMetrics, TrainingDataset};
use crate::models::FeatureVector;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Outcome of a training run
pub struct TrainedModel {
    pub classifier: RandomForestAlertClassifier,
    pub encoder: LabelEncoder,
    pub report: TrainingReport,
}

/// Diagnostic summary of a training run; has no effect on the artifacts
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub n_samples: usize,
    pub n_train: usize,
    pub n_test: usize,
    pub metrics: ModelMetrics,
}

/// Fit the label encoder and forest on `dataset` and evaluate on the held-out split
pub fn train(dataset: &Dataset, config: &TrainingConfig) -> Result<TrainedModel> {
    dataset.require_training_columns()?;

    if dataset.is_empty() {
        return Err(AppError::DataShape("dataset has no rows".to_string()));
    }

    let labels: Vec<&str> = dataset
        .records()
        .iter()
        .map(|record| record.training_label())
        .collect::<Result<_>>()?;
    let encoder = LabelEncoder::fit(&labels)?;
    if encoder.n_classes() < 2 {
        return Err(AppError::DataShape(format!(
            "at least two alert levels are needed to train, found only {:?}",
            encoder.classes()
        )));
    }
    info!(classes = ?encoder.classes(), "Label encoder fitted");

    let samples = dataset
        .records()
        .iter()
        .zip(labels.iter())
        .map(|(record, label)| -> Result<(FeatureVector, usize)> {
            Ok((record.training_features()?, encoder.transform(label)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let full = TrainingDataset::from_samples(&samples);
    let (train_set, test_set) = full.train_test_split(config.test_size, config.seed)?;
    info!(
        train = train_set.n_samples,
        test = test_set.n_samples,
        "Dataset split"
    );

    let train_classes: BTreeSet<usize> = train_set.labels.iter().copied().collect();
    if train_classes.len() < 2 {
        return Err(AppError::DataShape(
            "training partition holds a single alert level; add rows for other levels".to_string(),
        ));
    }

    let params = ForestParams {
        n_trees: config.n_trees,
        seed: config.seed,
    };
    let classifier = RandomForestAlertClassifier::fit(&train_set, &params)?;

    let predictions = classifier.predict_batch(&test_set.features)?;
    let class_names: Vec<String> = encoder
        .classes()
        .iter()
        .map(|level| level.to_string())
        .collect();
    let metrics = ModelMetrics::calculate(&test_set.labels, &predictions, &class_names);
    info!(
        "Random forest trained successfully - Accuracy: {:.2}%",
        metrics.accuracy * 100.0
    );

    Ok(TrainedModel {
        classifier,
        encoder,
        report: TrainingReport {
            n_samples: full.n_samples,
            n_train: train_set.n_samples,
            n_test: test_set.n_samples,
            metrics,
        },
    })
}

impl TrainedModel {
    /// Write the classifier and encoder artifacts
    pub fn save<P: AsRef<Path>, Q: AsRef<Path>>(&self, model_path: P, encoder_path: Q) -> Result<()> {
        artifact::save(&self.classifier, model_path.as_ref())?;
        artifact::save(&self.encoder, encoder_path.as_ref())?;
        info!(
            model = %model_path.as_ref().display(),
            encoder = %encoder_path.as_ref().display(),
            "Artifacts saved"
        );
        Ok(())
    }
}
