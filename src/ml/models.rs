use crate::error::{AppError, Result};
use crate::models::{FeatureVector, N_FEATURES};
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Training dataset
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// Feature matrix (n_samples × n_features)
    pub features: Array2<f64>,

    /// Encoded alert labels
    pub labels: Vec<usize>,

    /// Number of samples
    pub n_samples: usize,

    /// Number of features
    pub n_features: usize,
}

impl TrainingDataset {
    /// Create a new training dataset from encoded samples
    pub fn from_samples(samples: &[(FeatureVector, usize)]) -> Self {
        let n_samples = samples.len();
        let mut features = Array2::zeros((n_samples, N_FEATURES));
        let mut labels = Vec::with_capacity(n_samples);

        for (i, (vector, label)) in samples.iter().enumerate() {
            for (j, value) in vector.to_row().iter().enumerate() {
                features[[i, j]] = *value;
            }
            labels.push(*label);
        }

        Self {
            features,
            labels,
            n_samples,
            n_features: N_FEATURES,
        }
    }

    /// Shuffle rows with a seeded RNG and hold out `ceil(n * test_size)` for testing
    pub fn train_test_split(
        &self,
        test_size: f64,
        seed: u64,
    ) -> Result<(TrainingDataset, TrainingDataset)> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(AppError::Configuration(format!(
                "test_size must be between 0 and 1, got {}",
                test_size
            )));
        }

        let n_test = (self.n_samples as f64 * test_size).ceil() as usize;
        if n_test == 0 || n_test >= self.n_samples {
            return Err(AppError::DataShape(format!(
                "{} rows are too few for a {:.0}% test split",
                self.n_samples,
                test_size * 100.0
            )));
        }

        let mut indices: Vec<usize> = (0..self.n_samples).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok((self.subset(train_idx), self.subset(test_idx)))
    }

    fn subset(&self, indices: &[usize]) -> TrainingDataset {
        TrainingDataset {
            features: self.features.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            n_samples: indices.len(),
            n_features: self.n_features,
        }
    }
}

/// Model evaluation metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Accuracy
    pub accuracy: f64,

    /// Macro-averaged precision
    pub precision: f64,

    /// Macro-averaged recall
    pub recall: f64,

    /// Macro-averaged F1 score
    pub f1_score: f64,

    /// Support-weighted averages
    pub weighted: ClassMetrics,

    /// Per-class metrics, in code order; classes seen in neither truth nor prediction are omitted
    pub per_class_metrics: Vec<(String, ClassMetrics)>,
}

/// Per-class evaluation metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

impl ModelMetrics {
    pub fn new() -> Self {
        Self {
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
            f1_score: 0.0,
            weighted: ClassMetrics::default(),
            per_class_metrics: Vec::new(),
        }
    }

    /// Compare predictions against ground truth; `class_names[i]` names code `i`
    pub fn calculate(y_true: &[usize], y_pred: &[usize], class_names: &[String]) -> Self {
        let n_samples = y_true.len();
        if n_samples == 0 {
            return Self::new();
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t == p)
            .count();
        let accuracy = correct as f64 / n_samples as f64;

        let mut per_class = Vec::with_capacity(class_names.len());

        // Classes absent from both truth and prediction are not reported
        for (class_idx, name) in class_names.iter().enumerate() {
            if !y_true.contains(&class_idx) && !y_pred.contains(&class_idx) {
                continue;
            }

            let tp = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|(t, p)| **t == class_idx && **p == class_idx)
                .count();

            let fp = y_pred
                .iter()
                .zip(y_true.iter())
                .filter(|(p, t)| **p == class_idx && **t != class_idx)
                .count();

            let fn_count = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|(t, p)| **t == class_idx && **p != class_idx)
                .count();

            let precision = if tp + fp > 0 {
                tp as f64 / (tp + fp) as f64
            } else {
                0.0
            };

            let recall = if tp + fn_count > 0 {
                tp as f64 / (tp + fn_count) as f64
            } else {
                0.0
            };

            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            let support = y_true.iter().filter(|&&t| t == class_idx).count();

            per_class.push((
                name.clone(),
                ClassMetrics {
                    precision,
                    recall,
                    f1_score: f1,
                    support,
                },
            ));
        }

        let reported: Vec<&ClassMetrics> = per_class.iter().map(|(_, m)| m).collect();
        let n_reported = reported.len().max(1) as f64;

        let macro_avg = |f: fn(&ClassMetrics) -> f64| -> f64 {
            reported.iter().map(|m| f(m)).sum::<f64>() / n_reported
        };
        let weighted_avg = |f: fn(&ClassMetrics) -> f64| -> f64 {
            reported
                .iter()
                .map(|m| f(m) * m.support as f64)
                .sum::<f64>()
                / n_samples as f64
        };

        Self {
            accuracy,
            precision: macro_avg(|m| m.precision),
            recall: macro_avg(|m| m.recall),
            f1_score: macro_avg(|m| m.f1_score),
            weighted: ClassMetrics {
                precision: weighted_avg(|m| m.precision),
                recall: weighted_avg(|m| m.recall),
                f1_score: weighted_avg(|m| m.f1_score),
                support: n_samples,
            },
            per_class_metrics: per_class,
        }
    }

    /// Text classification report: one line per class, then accuracy and averages
    pub fn report(&self) -> String {
        let width = self
            .per_class_metrics
            .iter()
            .map(|(name, _)| name.len())
            .chain(["weighted avg".len()])
            .max()
            .unwrap_or(12);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}\n",
            "",
            "precision",
            "recall",
            "f1-score",
            "support",
            width = width
        );

        let row = |out: &mut String, name: &str, m: &ClassMetrics| {
            let _ = writeln!(
                out,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name,
                m.precision,
                m.recall,
                m.f1_score,
                m.support,
                width = width
            );
        };

        for (name, metrics) in &self.per_class_metrics {
            row(&mut out, name, metrics);
        }

        let _ = writeln!(
            out,
            "\n{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.weighted.support,
            width = width
        );
        row(
            &mut out,
            "macro avg",
            &ClassMetrics {
                precision: self.precision,
                recall: self.recall,
                f1_score: self.f1_score,
                support: self.weighted.support,
            },
        );
        row(&mut out, "weighted avg", &self.weighted);

        out
    }
}

impl Default for ModelMetrics {
    fn default() -> Self {
        Self::new()
    }
}
