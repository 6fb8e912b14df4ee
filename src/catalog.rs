// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The figure catalog - fixed reference data supplied to the analytics

use crate::error::Result;
use crate::store::read_document;
use crate::types::Figure;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// An immutable, id-indexed list of figures
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    figures: Vec<Figure>,
    index: HashMap<String, usize>,
}

/// On-disk shape: either a bare list or a table with a `figures` list
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Figure>),
    Table { figures: Vec<Figure> },
}

impl Catalog {
    /// Build a catalog, keeping catalog order
    ///
    /// When two figures share an id the first one is what lookups resolve to.
    #[must_use]
    pub fn new(figures: Vec<Figure>) -> Self {
        let mut index = HashMap::with_capacity(figures.len());
        for (i, figure) in figures.iter().enumerate() {
            if index.contains_key(&figure.id) {
                warn!("Duplicate figure id in catalog: {}", figure.id);
                continue;
            }
            index.insert(figure.id.clone(), i);
        }
        Self { figures, index }
    }

    /// Load a catalog from a `.json` or `.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let doc: CatalogDocument = read_document(path)?;
        let figures = match doc {
            CatalogDocument::List(figures) | CatalogDocument::Table { figures } => figures,
        };
        Ok(Self::new(figures))
    }

    /// Look up a figure by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Figure> {
        self.index.get(id).map(|&i| &self.figures[i])
    }

    /// All figures in catalog order
    #[must_use]
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Number of figures
    #[must_use]
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Check if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Distinct series names in first-appearance order
    #[must_use]
    pub fn series_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for figure in &self.figures {
            if !names.contains(&figure.series.as_str()) {
                names.push(&figure.series);
            }
        }
        names
    }
}

impl From<Vec<Figure>> for Catalog {
    fn from(figures: Vec<Figure>) -> Self {
        Self::new(figures)
    }
}
