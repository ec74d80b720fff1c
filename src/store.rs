use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::MangaRecord;

pub const DEFAULT_DB_FILE: &str = "site_obj.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Tracking file not found: {0}")]
    Missing(PathBuf),
    #[error("Failed to read or write tracking file")]
    Io(#[from] std::io::Error),
    #[error("Tracking file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Source entry '{site}' of '{title}' does not match its identity fields")]
    MismatchedSource { title: String, site: String },
    #[error("'{title}' marks '{site}' authoritative but does not track it")]
    DanglingAuthoritative { title: String, site: String },
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// Whole-file JSON store of tracked titles. Loaded once at startup, saved as
/// a whole after a pass or an edit; a missing or malformed file is fatal.
pub struct Store {
    path: PathBuf,
    pub records: BTreeMap<String, MangaRecord>,
}

impl Store {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(StoreError::Missing(path));
        }

        let raw = fs::read_to_string(&path)?;
        let records: BTreeMap<String, MangaRecord> = serde_json::from_str(&raw)?;

        for (title, record) in &records {
            for (site, source) in &record.sources {
                if *site != source.kind() {
                    return Err(StoreError::MismatchedSource {
                        title: title.clone(),
                        site: site.to_string(),
                    });
                }
            }
            if let Some(site) = record.authoritative_site {
                if !record.sources.contains_key(&site) {
                    return Err(StoreError::DanglingAuthoritative {
                        title: title.clone(),
                        site: site.to_string(),
                    });
                }
            }
        }

        debug!("Loaded {} tracked titles from {:?}", records.len(), path);
        Ok(Store { path, records })
    }

    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, raw)?;
        debug!("Saved {} tracked titles to {:?}", self.records.len(), self.path);
        Ok(())
    }
}
