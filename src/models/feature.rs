use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// One of the five seismic readings fed to the classifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum FeatureField {
    Magnitude,
    Depth,
    Cdi,
    Mmi,
    Sig,
}

impl FeatureField {
    /// Column name in the dataset and the announcement inputs
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Column order expected by the classifier
    pub fn ordered() -> impl Iterator<Item = FeatureField> {
        FeatureField::iter()
    }

    /// Value used when a dataset row has no reading for this field
    pub fn fallback(&self) -> f64 {
        match self {
            FeatureField::Magnitude => 5.0,
            FeatureField::Depth => 10.0,
            FeatureField::Cdi => 3.0,
            FeatureField::Mmi => 3.0,
            FeatureField::Sig => 300.0,
        }
    }

    /// Coerce a text value into a reading for this field
    pub fn parse_value(&self, raw: &str) -> Result<f64> {
        let value: f64 = raw.trim().parse().map_err(|_| {
            AppError::Validation(format!("{} must be numeric, got {:?}", self, raw))
        })?;

        if !value.is_finite() {
            return Err(AppError::Validation(format!(
                "{} must be a finite number, got {}",
                self, raw
            )));
        }

        Ok(value)
    }
}

/// Number of classifier input columns
pub const N_FEATURES: usize = 5;

/// The five numeric readings that produce a prediction.
///
/// Serialized as a mapping of field name to value, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub magnitude: f64,
    pub depth: f64,
    pub cdi: f64,
    pub mmi: f64,
    pub sig: f64,
}

impl FeatureVector {
    pub fn new(magnitude: f64, depth: f64, cdi: f64, mmi: f64, sig: f64) -> Self {
        Self {
            magnitude,
            depth,
            cdi,
            mmi,
            sig,
        }
    }

    /// Build from exactly five values in column order
    pub fn from_values(values: &[f64]) -> Result<Self> {
        match values {
            [magnitude, depth, cdi, mmi, sig] => {
                Ok(Self::new(*magnitude, *depth, *cdi, *mmi, *sig))
            }
            _ => Err(AppError::Validation(format!(
                "expected {} feature values, got {}",
                N_FEATURES,
                values.len()
            ))),
        }
    }

    pub fn get(&self, field: FeatureField) -> f64 {
        match field {
            FeatureField::Magnitude => self.magnitude,
            FeatureField::Depth => self.depth,
            FeatureField::Cdi => self.cdi,
            FeatureField::Mmi => self.mmi,
            FeatureField::Sig => self.sig,
        }
    }

    pub fn set(&mut self, field: FeatureField, value: f64) {
        match field {
            FeatureField::Magnitude => self.magnitude = value,
            FeatureField::Depth => self.depth = value,
            FeatureField::Cdi => self.cdi = value,
            FeatureField::Mmi => self.mmi = value,
            FeatureField::Sig => self.sig = value,
        }
    }

    /// Values in classifier column order
    pub fn to_row(&self) -> [f64; N_FEATURES] {
        [self.magnitude, self.depth, self.cdi, self.mmi, self.sig]
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        let mut vector = Self::new(0.0, 0.0, 0.0, 0.0, 0.0);
        for field in FeatureField::ordered() {
            vector.set(field, field.fallback());
        }
        vector
    }
}

impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = FeatureField::ordered()
            .map(|field| format!("{}={}", field, self.get(field)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
