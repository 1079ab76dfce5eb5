use crate::announcement::AnnouncementStore;
use crate::error::{AppError, Result};
use crate::models::AnnouncementDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Announcement store backed by a single JSON file.
///
/// Writes truncate and rewrite the file in place; a reader racing a writer
/// may see a partial or missing file.
#[derive(Debug, Clone)]
pub struct FileAnnouncementStore {
    path: PathBuf,
}

impl FileAnnouncementStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnnouncementStore for FileAnnouncementStore {
    fn write(&self, document: &AnnouncementDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;

        tracing::debug!(path = %self.path.display(), "Announcement document written");
        Ok(())
    }

    fn read(&self) -> Result<Option<AnnouncementDocument>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Io(e)),
        };

        let document = serde_json::from_str(&content).map_err(|e| {
            AppError::Serialization(format!(
                "Malformed announcement file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(document))
    }
}

/// In-memory announcement store (for testing)
#[derive(Debug, Default)]
pub struct InMemoryAnnouncementStore {
    document: RwLock<Option<AnnouncementDocument>>,
}

impl InMemoryAnnouncementStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnouncementStore for InMemoryAnnouncementStore {
    fn write(&self, document: &AnnouncementDocument) -> Result<()> {
        let mut slot = self
            .document
            .write()
            .map_err(|_| AppError::InvalidState("announcement store lock poisoned".to_string()))?;
        *slot = Some(document.clone());
        Ok(())
    }

    fn read(&self) -> Result<Option<AnnouncementDocument>> {
        let slot = self
            .document
            .read()
            .map_err(|_| AppError::InvalidState("announcement store lock poisoned".to_string()))?;
        Ok(slot.clone())
    }
}
