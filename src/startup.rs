//! Startup checks and loading of everything the operator flow needs.

use crate::announcement::{AnnouncementPublisher, AnnouncementStore, FileAnnouncementStore};
use crate::config::{Config, PathsConfig};
use crate::dataset::Dataset;
use crate::error::{AppError, Result};
use crate::ml::PredictionService;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Fail with every missing input file if the dataset or either artifact is absent
pub fn check_prerequisites(paths: &PathsConfig) -> Result<()> {
    let missing: Vec<PathBuf> = [&paths.dataset, &paths.model, &paths.encoder]
        .into_iter()
        .filter(|path| !path.exists())
        .cloned()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        for path in &missing {
            warn!(path = %path.display(), "Required file not found");
        }
        Err(AppError::MissingPrerequisites(missing))
    }
}

/// Loaded dataset, prediction service and announcement store
pub struct AppContext {
    pub config: Config,
    pub dataset: Dataset,
    pub predictor: PredictionService,
    pub store: Arc<dyn AnnouncementStore>,
}

impl AppContext {
    /// Check prerequisites, then load the dataset and artifacts
    pub fn load(config: Config) -> Result<Self> {
        check_prerequisites(&config.paths)?;

        let dataset = Dataset::load(&config.paths.dataset)?;
        info!("📦 Dataset rows: {}", dataset.len());

        let predictor = PredictionService::load(&config.paths.model, &config.paths.encoder)?;
        let store: Arc<dyn AnnouncementStore> =
            Arc::new(FileAnnouncementStore::new(config.paths.announcements.clone()));

        Ok(Self {
            config,
            dataset,
            predictor,
            store,
        })
    }

    pub fn publisher(&self) -> AnnouncementPublisher {
        AnnouncementPublisher::new(self.store.clone())
    }
}
