use crate::error::{AppError, Result};
use crate::ml::models::TrainingDataset;
use crate::models::{FeatureVector, N_FEATURES};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::SplitCriterion;

/// Trait for alert-level classifiers.
///
/// Implementations only deal in integer class codes; decoding to labels is
/// the label encoder's job.
pub trait Classifier: Send + Sync {
    /// Predict class codes for each row of the feature matrix
    fn predict_batch(&self, features: &Array2<f64>) -> Result<Vec<usize>>;

    /// Predict the class code for a single feature vector
    fn predict(&self, features: &FeatureVector) -> Result<usize> {
        let row = Array2::from_shape_vec((1, N_FEATURES), features.to_row().to_vec())
            .map_err(|e| AppError::Validation(format!("Failed to create feature array: {}", e)))?;

        self.predict_batch(&row)?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Model("Classifier returned no prediction".to_string()))
    }
}

/// Random forest hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: u16,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
        }
    }
}

/// Random forest over the five seismic readings
#[derive(Serialize, Deserialize)]
pub struct RandomForestAlertClassifier {
    model: RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>,
    n_features: usize,
}

impl RandomForestAlertClassifier {
    /// Fit a forest on the training partition
    pub fn fit(dataset: &TrainingDataset, params: &ForestParams) -> Result<Self> {
        if dataset.n_samples == 0 {
            return Err(AppError::DataShape(
                "No training samples provided".to_string(),
            ));
        }

        let x = ndarray_to_densematrix(&dataset.features);
        let y: Vec<i32> = dataset.labels.iter().map(|&l| l as i32).collect();

        let forest_params = RandomForestClassifierParameters::default()
            .with_n_trees(params.n_trees)
            .with_criterion(SplitCriterion::Gini)
            .with_seed(params.seed);

        let model = RandomForestClassifier::fit(&x, &y, forest_params)
            .map_err(|e| AppError::Model(format!("Failed to train random forest: {}", e)))?;

        tracing::debug!(
            n_trees = params.n_trees,
            n_samples = dataset.n_samples,
            "Random forest fitted"
        );

        Ok(Self {
            model,
            n_features: dataset.n_features,
        })
    }
}

impl Classifier for RandomForestAlertClassifier {
    fn predict_batch(&self, features: &Array2<f64>) -> Result<Vec<usize>> {
        if features.ncols() != self.n_features {
            return Err(AppError::Validation(format!(
                "expected {} features per row, got {}",
                self.n_features,
                features.ncols()
            )));
        }

        let x = ndarray_to_densematrix(features);
        let predictions = self
            .model
            .predict(&x)
            .map_err(|e| AppError::Model(format!("Prediction failed: {}", e)))?;

        predictions
            .into_iter()
            .map(|code| {
                usize::try_from(code)
                    .map_err(|_| AppError::Model(format!("Negative class code {}", code)))
            })
            .collect()
    }
}

fn ndarray_to_densematrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
    let shape = arr.shape();
    let data: Vec<f64> = arr.iter().copied().collect();
    DenseMatrix::new(shape[0], shape[1], data, false)
}
