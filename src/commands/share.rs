// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Share command - export the collection as text, JSON or CSV

use super::Session;
use anyhow::{bail, Context, Result};
use collectory::achievements::check_achievements;
use collectory::sharing::{self, ExportFormat};
use std::path::Path;
use tracing::info;

/// Run the share command
pub fn run(session: &Session, format: &str, output: Option<&Path>) -> Result<()> {
    let Some(format) = ExportFormat::parse(format) else {
        bail!("Unknown format: {}. Valid: txt, json, csv", format);
    };

    let store = session.open_store()?;
    let catalog = session.load_catalog(&store)?;
    let analytics = session.analytics(&store, &catalog);

    let prior = store
        .load_achievement_snapshot()
        .context("Failed to read achievement snapshot")?
        .map(|snapshot| snapshot.achievements());
    let check = check_achievements(
        &session.definitions()?,
        store.records(),
        &analytics,
        prior.as_deref(),
        session.now,
    );

    let rendered = sharing::export(
        format,
        store.records(),
        &catalog,
        &analytics,
        &check.achievements,
        session.now,
    )
    .context("Failed to render export")?;

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(format!("collection-export.{}", format.extension()))
            } else {
                path.to_path_buf()
            };
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported {} records to {}", store.records().len(), path.display());
            println!("Wrote {}", path.display());
        }
        None => {
            println!("{rendered}");
            if format == ExportFormat::Txt && !session.json {
                let content = sharing::generate_shareable_content(
                    store.records(),
                    &analytics,
                    &check.achievements,
                );
                let suggestions = sharing::sharing_suggestions(&content);
                println!();
                for suggestion in suggestions {
                    println!("💡 {suggestion}");
                }
            }
        }
    }

    Ok(())
}
