// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Collection command - add, wish, remove and list records

use super::Session;
use anyhow::{bail, Context, Result};
use collectory::store::CollectionStore;
use collectory::types::CollectionRecord;
use tracing::warn;

/// Run the collection command
pub fn run(
    session: &Session,
    action: &str,
    figure_id: Option<&str>,
    photo: Option<&str>,
) -> Result<()> {
    let mut store = session.open_store()?;

    match action {
        "list" | "ls" => {
            let catalog = session.load_catalog(&store)?;
            if session.json {
                return session.print_json(&store.records());
            }
            if store.records().is_empty() {
                println!("Collection is empty.");
            }
            for record in store.records() {
                let (name, series) = catalog
                    .get(&record.figure_id)
                    .map_or(("(unknown)", ""), |f| (f.name.as_str(), f.series.as_str()));
                let state = match (record.owned, record.wishlist) {
                    (true, true) => "owned+wish",
                    (true, false) => "owned",
                    (false, true) => "wish",
                    (false, false) => "-",
                };
                println!(
                    "{:<12} {:<10} {:<28} {:<20} {}",
                    record.figure_id,
                    state,
                    name,
                    series,
                    record.date_added.as_deref().unwrap_or("")
                );
            }
            return Ok(());
        }
        "add" | "wish" => {
            let Some(figure_id) = figure_id else {
                bail!("Figure id required for '{}'", action);
            };
            let catalog = session.load_catalog(&store)?;
            if catalog.get(figure_id).is_none() {
                warn!("Figure {} is not in the catalog; it will not count towards analytics", figure_id);
            }

            let today = session.now.date_naive().to_string();
            let mut record = store
                .get(figure_id)
                .cloned()
                .unwrap_or_else(|| CollectionRecord::wished(figure_id).added_on(today.clone()));
            if action == "add" {
                record.owned = true;
                record.wishlist = false;
                record.date_added = Some(today);
            } else {
                record.wishlist = true;
            }
            if let Some(photo) = photo {
                record.user_photo_ref = Some(photo.to_string());
            }

            let replaced = store.upsert(record);
            save(&mut store, session)?;
            println!(
                "{} {} {}",
                if replaced { "Updated" } else { "Added" },
                figure_id,
                if action == "add" { "as owned" } else { "to wishlist" }
            );
        }
        "remove" | "rm" => {
            let Some(figure_id) = figure_id else {
                bail!("Figure id required for '{}'", action);
            };
            if !store.remove(figure_id) {
                bail!("Figure {} is not in the collection", figure_id);
            }
            save(&mut store, session)?;
            println!("Removed {figure_id}");
        }
        _ => bail!("Unknown action: {}. Valid: add, wish, remove, list", action),
    }

    Ok(())
}

fn save(store: &mut CollectionStore, session: &Session) -> Result<()> {
    store
        .save(session.now)
        .with_context(|| format!("Failed to save collection in {}", store.dir().display()))
}
