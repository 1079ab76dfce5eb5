//! Historical earthquake dataset loaded from CSV.
//!
//! The interactive flow only needs the readings (with fallbacks for absent
//! values) and the optional `place` column; training additionally requires
//! every feature column plus `alert` with no empty cells.

use crate::error::{AppError, Result};
use crate::models::{FeatureField, FeatureVector, N_FEATURES};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Target column holding the alert level
pub const ALERT_COLUMN: &str = "alert";

/// Optional column used as the default announcement region
pub const PLACE_COLUMN: &str = "place";

/// One row of the dataset
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeRecord {
    /// 1-based data row number (header excluded)
    pub row: usize,

    readings: [Option<String>; N_FEATURES],

    /// Alert label, if the column exists and the cell is non-empty
    pub alert: Option<String>,

    /// Place name, if the column exists and the cell is non-empty
    pub place: Option<String>,
}

impl EarthquakeRecord {
    /// Raw text of a reading
    pub fn raw(&self, field: FeatureField) -> Option<&str> {
        self.readings[field as usize].as_deref()
    }

    /// Readings with fallbacks for absent values; unparsable cells are an error
    pub fn features(&self) -> Result<FeatureVector> {
        let mut vector = FeatureVector::default();
        for field in FeatureField::ordered() {
            if let Some(raw) = self.raw(field) {
                vector.set(field, field.parse_value(raw)?);
            }
        }
        Ok(vector)
    }

    /// Readings for training; every cell must be present and numeric
    pub fn training_features(&self) -> Result<FeatureVector> {
        let mut vector = FeatureVector::default();
        for field in FeatureField::ordered() {
            let raw = self.raw(field).ok_or_else(|| {
                AppError::DataShape(format!("row {}: missing value for {}", self.row, field))
            })?;
            let value = field.parse_value(raw).map_err(|_| {
                AppError::DataShape(format!(
                    "row {}: non-numeric value {:?} for {}",
                    self.row, raw, field
                ))
            })?;
            vector.set(field, value);
        }
        Ok(vector)
    }

    /// Alert label for training
    pub fn training_label(&self) -> Result<&str> {
        self.alert.as_deref().ok_or_else(|| {
            AppError::DataShape(format!("row {}: missing value for {}", self.row, ALERT_COLUMN))
        })
    }
}

/// Parsed dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<EarthquakeRecord>,
}

impl Dataset {
    /// Load a dataset from a CSV file with a header row
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = dataset.len(), "Dataset loaded");
        Ok(dataset)
    }

    /// Parse CSV content from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let position = |name: &str| columns.iter().position(|c| c == name);

        let mut feature_idx = [None; N_FEATURES];
        for field in FeatureField::ordered() {
            feature_idx[field as usize] = position(field.name());
        }
        let alert_idx = position(ALERT_COLUMN);
        let place_idx = position(PLACE_COLUMN);

        let cell = |record: &csv::StringRecord, idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| record.get(i))
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };

        let mut records = Vec::new();
        for (i, result) in reader.records().enumerate() {
            let record = result?;
            let mut readings: [Option<String>; N_FEATURES] = Default::default();
            for (slot, idx) in readings.iter_mut().zip(feature_idx.iter()) {
                *slot = cell(&record, *idx);
            }

            records.push(EarthquakeRecord {
                row: i + 1,
                readings,
                alert: cell(&record, alert_idx),
                place: cell(&record, place_idx),
            });
        }

        Ok(Self { columns, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        &self.records
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> &[EarthquakeRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Last `n` rows, oldest first
    pub fn tail(&self, n: usize) -> &[EarthquakeRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Names from `required` that are not columns of this dataset
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.columns.iter().any(|c| c == name))
            .collect()
    }

    /// Fail with a data-shape error unless every training column is present
    pub fn require_training_columns(&self) -> Result<()> {
        let mut required: Vec<&str> = FeatureField::ordered().map(|f| f.name()).collect();
        required.push(ALERT_COLUMN);

        let missing = self.missing_columns(&required);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::DataShape(format!(
                "dataset is missing required columns: {}",
                missing.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLE: &str = "\
time,place,magnitude,depth,cdi,mmi,sig,alert
2023-01-01,North Ridge,6.1,15.0,5,6,700,orange
2023-01-02,,4.2,40.0,2,3,250,green
2023-01-03,Bay Area,7.4,8.0,8,8,1200,red
";

    #[test]
    fn test_load_columns_and_rows() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.columns()[1], "place");
        assert_eq!(dataset.records()[0].place.as_deref(), Some("North Ridge"));
        assert_eq!(dataset.records()[1].place, None);
        assert_eq!(dataset.records()[2].alert.as_deref(), Some("red"));
    }

    #[test]
    fn test_head_and_tail() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.head(2).len(), 2);
        assert_eq!(dataset.head(10).len(), 3);
        let tail = dataset.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[1].row, 3);
        assert_eq!(dataset.tail(200).len(), 3);
    }

    #[test]
    fn test_features_use_fallbacks_for_absent_columns() {
        let csv = "magnitude,sig\n6.0,\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let features = dataset.records()[0].features().unwrap();

        assert_eq!(features, FeatureVector::new(6.0, 10.0, 3.0, 3.0, 300.0));
    }

    #[test]
    fn test_require_training_columns() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(dataset.require_training_columns().is_ok());

        let partial = Dataset::from_reader("magnitude,depth,alert\n1,2,green\n".as_bytes()).unwrap();
        let err = partial.require_training_columns().unwrap_err();
        assert_matches!(err, AppError::DataShape(ref msg) if msg.contains("cdi, mmi, sig"));
    }

    #[test]
    fn test_training_features_reject_empty_cells() {
        let csv = "magnitude,depth,cdi,mmi,sig,alert\n6.0,,4,5,600,orange\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        let err = dataset.records()[0].training_features().unwrap_err();
        assert_matches!(err, AppError::DataShape(ref msg) if msg.contains("row 1") && msg.contains("depth"));
    }

    #[test]
    fn test_training_label_required() {
        let csv = "magnitude,depth,cdi,mmi,sig,alert\n6.0,10,4,5,600,\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_matches!(dataset.records()[0].training_label(), Err(AppError::DataShape(_)));
    }
}
