/// Machine learning module for alert-level classification
///
/// This module provides:
/// - Label encoding of alert levels learned from the dataset
/// - A random forest classifier behind the `Classifier` trait
/// - The offline training pipeline and its evaluation metrics
/// - Binary persistence of the fitted artifacts
/// - The prediction service used by the operator flow

pub mod artifact;
pub mod classifier;
pub mod encoder;
pub mod models;
pub mod service;
pub mod training;

pub use classifier::{Classifier, ForestParams, RandomForestAlertClassifier};
pub use encoder::LabelEncoder;
pub use models::{ClassMetrics, ModelMetrics, TrainingDataset};
pub use service::PredictionService;
pub use training::{train, TrainedModel, TrainingReport};
