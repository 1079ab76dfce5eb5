//! Binary persistence for fitted model artifacts.

use crate::error::{AppError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serialize an artifact to `path`, creating parent directories as needed
pub fn save<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(fs::File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|e| {
        AppError::Serialization(format!("Failed to write {}: {}", path.display(), e))
    })?;
    // Small artifacts sit entirely in the buffer until this flush
    writer.flush()?;

    tracing::debug!(path = %path.display(), "Artifact saved");
    Ok(())
}

/// Deserialize an artifact previously written by [`save`]
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let reader = BufReader::new(fs::File::open(path)?);
    bincode::deserialize_from(reader).map_err(|e| {
        AppError::Serialization(format!("Failed to read {}: {}", path.display(), e))
    })
}
