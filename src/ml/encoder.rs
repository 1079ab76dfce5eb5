use crate::error::{AppError, Result};
use crate::models::AlertLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Bidirectional mapping between alert labels and integer class codes.
///
/// Codes are assigned in sorted label order starting at zero, so the same
/// label set always produces the same mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<AlertLevel>,
}

impl LabelEncoder {
    /// Fit the encoder on the distinct labels observed in the training data
    pub fn fit<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<AlertLevel> = labels
            .into_iter()
            .map(|label| AlertLevel::new(label))
            .collect();

        if classes.is_empty() {
            return Err(AppError::DataShape(
                "cannot fit label encoder on an empty label set".to_string(),
            ));
        }

        Ok(Self {
            classes: classes.into_iter().collect(),
        })
    }

    /// Fitted labels, indexed by code
    pub fn classes(&self) -> &[AlertLevel] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Code for a label
    pub fn transform(&self, label: &str) -> Result<usize> {
        let level = AlertLevel::new(label);
        self.classes
            .binary_search(&level)
            .map_err(|_| AppError::UnknownLabel(format!("{:?} is not a fitted label", label)))
    }

    /// Label for a code; only codes seen during fit are valid
    pub fn inverse_transform(&self, code: usize) -> Result<AlertLevel> {
        self.classes.get(code).cloned().ok_or_else(|| {
            AppError::UnknownLabel(format!(
                "code {} is outside the fitted range 0..{}",
                code,
                self.classes.len()
            ))
        })
    }
}
