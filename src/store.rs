// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! File-backed collection store
//!
//! A data directory holds the collection document, the catalog and the
//! persisted achievement snapshot:
//!
//! ```text
//! <data_dir>/collection.json
//! <data_dir>/catalog.json | catalog.toml
//! <data_dir>/achievements.json
//! ```

use crate::achievements::UserAchievementProgress;
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::types::{CollectionRecord, UserCollection};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const COLLECTION_FILE: &str = "collection.json";
const ACHIEVEMENTS_FILE: &str = "achievements.json";
const CATALOG_FILES: [&str; 2] = ["catalog.json", "catalog.toml"];

/// Read a `.json` or `.toml` document
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if ext != "json" && ext != "toml" {
        return Err(Error::UnsupportedFormat(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    if ext == "json" {
        serde_json::from_str(&content).map_err(|e| Error::json(path, e))
    } else {
        toml::from_str(&content).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}

/// Accepted collection layouts
/// Collection file as read from disk; records are decoded one at a time
#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionDocument {
    Items(Vec<Value>),
    Document(RawCollection),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollection {
    #[serde(default)]
    user_id: Value,
    #[serde(default)]
    items: Vec<Value>,
    #[serde(default)]
    last_updated: Value,
}

/// Decode records, skipping any that do not have the record shape
fn decode_records(items: Vec<Value>, path: &Path) -> Vec<CollectionRecord> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record #{} in {}: {}", i, path.display(), e);
                None
            }
        })
        .collect()
}

/// The collection of one user, backed by a data directory
#[derive(Debug, Clone)]
pub struct CollectionStore {
    dir: PathBuf,
    /// The loaded collection document
    pub collection: UserCollection,
}

impl CollectionStore {
    /// Open the store; a missing collection file is an empty collection
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(COLLECTION_FILE);
        let collection = if path.exists() {
            match read_document::<CollectionDocument>(&path)? {
                CollectionDocument::Items(items) => UserCollection {
                    items: decode_records(items, &path),
                    ..UserCollection::default()
                },
                CollectionDocument::Document(doc) => UserCollection {
                    user_id: serde_json::from_value(doc.user_id).unwrap_or_default(),
                    items: decode_records(doc.items, &path),
                    last_updated: serde_json::from_value(doc.last_updated).unwrap_or_default(),
                },
            }
        } else {
            debug!("No collection at {}, starting empty", path.display());
            UserCollection::default()
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            collection,
        })
    }

    /// Data directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Current records
    #[must_use]
    pub fn records(&self) -> &[CollectionRecord] {
        &self.collection.items
    }

    /// Record for a figure
    #[must_use]
    pub fn get(&self, figure_id: &str) -> Option<&CollectionRecord> {
        self.collection.items.iter().find(|r| r.figure_id == figure_id)
    }

    /// Insert a record, replacing any existing record for the same figure
    ///
    /// Returns true when an existing record was replaced.
    pub fn upsert(&mut self, record: CollectionRecord) -> bool {
        if let Some(existing) = self
            .collection
            .items
            .iter_mut()
            .find(|r| r.figure_id == record.figure_id)
        {
            *existing = record;
            true
        } else {
            self.collection.items.push(record);
            false
        }
    }

    /// Remove the record for a figure; returns true when one was removed
    pub fn remove(&mut self, figure_id: &str) -> bool {
        let before = self.collection.items.len();
        self.collection.items.retain(|r| r.figure_id != figure_id);
        self.collection.items.len() < before
    }

    /// Write the collection, stamping `last_updated`
    pub fn save(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.collection.last_updated = Some(now);
        let path = self.dir.join(COLLECTION_FILE);
        write_json(&path, &self.collection)?;
        info!("Saved {} records to {}", self.collection.items.len(), path.display());
        Ok(())
    }

    /// Load the catalog stored next to the collection
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = CATALOG_FILES
            .iter()
            .map(|name| self.dir.join(name))
            .find(|p| p.exists())
            .unwrap_or_else(|| self.dir.join(CATALOG_FILES[0]));
        Catalog::load(&path)
    }

    /// Load the persisted achievement snapshot, `None` on first run
    pub fn load_achievement_snapshot(&self) -> Result<Option<UserAchievementProgress>> {
        let path = self.dir.join(ACHIEVEMENTS_FILE);
        if !path.exists() {
            return Ok(None);
        }
        read_document(&path).map(Some)
    }

    /// Persist the achievement snapshot
    pub fn save_achievement_snapshot(&self, progress: &UserAchievementProgress) -> Result<()> {
        write_json(&self.dir.join(ACHIEVEMENTS_FILE), progress)
    }
}
