// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Analyze command - prints the analytics snapshot

use super::Session;
use anyhow::Result;
use collectory::types::ValueSummary;
use tracing::info;

/// Run the analyze command
pub fn run(session: &Session) -> Result<()> {
    let store = session.open_store()?;
    let catalog = session.load_catalog(&store)?;
    info!("Analyzing {} records against {} figures", store.records().len(), catalog.len());

    let analytics = session.analytics(&store, &catalog);
    if session.json {
        return session.print_json(&analytics);
    }

    println!("{}", session.heading("Collection"));
    println!(
        "  owned {} / {} ({}%), wishlist {}",
        analytics.owned_count,
        analytics.total_figures,
        analytics.completion_percentage,
        analytics.wishlist_count
    );
    println!("  owned value     {}", value_line(&analytics.owned_value));
    println!("  wishlist value  {}", value_line(&analytics.wishlist_value));
    println!("  catalog value   {}", value_line(&analytics.total_value));

    println!();
    println!("{}", session.heading("Series"));
    for series in &analytics.series_stats {
        println!(
            "  {} {:<28} {:>3}/{:<3} {:>3}%  ${}-${}",
            session.mark(series.completion_percentage == 100),
            series.series_name,
            series.owned_in_series,
            series.total_in_series,
            series.completion_percentage,
            series.series_value.min,
            series.series_value.max
        );
    }

    println!();
    println!("{}", session.heading("Rarity"));
    for rarity in &analytics.rarity_stats {
        println!(
            "  {:<11} {:>3}/{:<3} {:>3}%  avg ${}",
            rarity.rarity.label(),
            rarity.owned_count,
            rarity.total_count,
            rarity.completion_percentage,
            rarity.average_value
        );
    }

    if !analytics.recent_additions.is_empty() {
        println!();
        println!("{}", session.heading("Recently added"));
        for record in &analytics.recent_additions {
            let name = catalog
                .get(&record.figure_id)
                .map_or(record.figure_id.as_str(), |f| f.name.as_str());
            println!("  {} {}", record.date_added.as_deref().unwrap_or(""), name);
        }
    }

    Ok(())
}

fn value_line(value: &ValueSummary) -> String {
    format!("${}-${} (avg ${})", value.min, value.max, value.average)
}
