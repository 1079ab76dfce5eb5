//! Shared fixtures for the integration tests.
//!
//! The synthetic dataset has four alert levels whose readings sit in
//! disjoint bands on every feature, so any fitted forest separates them.

#![allow(dead_code)]

use quake_alert::config::{PathsConfig, TrainingConfig};
use quake_alert::dataset::Dataset;
use quake_alert::ml;
use quake_alert::models::FeatureVector;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Readings inside the orange band
pub fn orange_readings() -> FeatureVector {
    FeatureVector::new(6.5, 12.0, 4.0, 5.0, 650.0)
}

/// CSV text with `rows_per_class` rows for each of green, yellow, orange and red
pub fn banded_csv(rows_per_class: usize) -> String {
    let mut csv = String::from("time,place,magnitude,depth,cdi,mmi,sig,alert\n");
    let step = 1.0 / rows_per_class as f64;

    for i in 0..rows_per_class {
        let t = i as f64 * step;
        let rows = [
            (4.0 + 0.5 * t, 40.0 + 5.0 * t, 2, 2, 100.0 + 50.0 * t, "green"),
            (5.5 + 0.4 * t, 25.0 + 4.0 * t, 3, 4, 400.0 + 50.0 * t, "yellow"),
            (6.3 + 0.4 * t, 10.0 + 4.0 * t, 4, 5, 600.0 + 100.0 * t, "orange"),
            (7.5 + 0.5 * t, 2.0 + 4.0 * t, 8, 8, 1200.0 + 200.0 * t, "red"),
        ];
        for (magnitude, depth, cdi, mmi, sig, alert) in rows {
            let _ = writeln!(
                csv,
                "2023-01-{:02},Station {} {},{:.3},{:.3},{},{},{:.1},{}",
                i % 28 + 1,
                alert,
                i,
                magnitude,
                depth,
                cdi,
                mmi,
                sig,
                alert
            );
        }
    }

    csv
}

pub fn paths_in(dir: &Path) -> PathsConfig {
    PathsConfig {
        dataset: dir.join("data/earthquakes.csv"),
        model: dir.join("artifacts/earthquake_model.bin"),
        encoder: dir.join("artifacts/label_encoder.bin"),
        announcements: dir.join("storage/public_announcements.json"),
    }
}

pub fn small_training() -> TrainingConfig {
    TrainingConfig {
        n_trees: 20,
        seed: 42,
        test_size: 0.2,
    }
}

/// Write the banded dataset, train on it and save both artifacts under `dir`
pub fn prepare_workspace(dir: &Path) -> PathsConfig {
    let paths = paths_in(dir);
    fs::create_dir_all(dir.join("data")).unwrap();
    fs::write(&paths.dataset, banded_csv(30)).unwrap();

    let dataset = Dataset::load(&paths.dataset).unwrap();
    let trained = ml::train(&dataset, &small_training()).unwrap();
    trained.save(&paths.model, &paths.encoder).unwrap();

    paths
}
