// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod achievements;
pub mod analyze;
pub mod collection;
pub mod completions;
pub mod config;
pub mod insights;
pub mod milestones;
pub mod share;

use anyhow::{Context, Result};
use collectory::achievements::{default_definitions, load_definitions, Achievement};
use collectory::analytics::generate_analytics_with;
use collectory::catalog::Catalog;
use collectory::config::Config;
use collectory::store::CollectionStore;
use collectory::types::CollectionAnalytics;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;

/// Shared state for a single CLI invocation
pub struct Session {
    /// Effective configuration
    pub config: Config,
    /// Emit JSON instead of text
    pub json: bool,
    /// Colorize text output
    pub color: bool,
    /// Time the invocation started
    pub now: DateTime<Utc>,
}

impl Session {
    /// Open the collection store in the configured data directory
    pub fn open_store(&self) -> Result<CollectionStore> {
        let dir = &self.config.data_dir;
        CollectionStore::open(dir)
            .with_context(|| format!("Failed to load collection from {}", dir.display()))
    }

    /// Load the catalog stored next to the collection
    pub fn load_catalog(&self, store: &CollectionStore) -> Result<Catalog> {
        store.load_catalog().with_context(|| {
            format!(
                "Failed to load catalog from {} (expected catalog.json or catalog.toml)",
                store.dir().display()
            )
        })
    }

    /// Achievement definitions: the configured file or the built-in table
    pub fn definitions(&self) -> Result<Vec<Achievement>> {
        match &self.config.achievements.definitions {
            Some(path) => load_definitions(path)
                .with_context(|| format!("Failed to load achievement definitions from {}", path.display())),
            None => Ok(default_definitions()),
        }
    }

    /// Analytics for the stored collection
    pub fn analytics(&self, store: &CollectionStore, catalog: &Catalog) -> CollectionAnalytics {
        generate_analytics_with(store.records(), catalog, self.now, &self.config.analytics)
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
        Ok(())
    }

    /// Completed / open marker
    pub fn mark(&self, done: bool) -> String {
        match (done, self.color) {
            (true, true) => "✔".green().to_string(),
            (true, false) => "✔".to_string(),
            (false, true) => "·".dimmed().to_string(),
            (false, false) => "·".to_string(),
        }
    }

    /// Section heading
    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}
