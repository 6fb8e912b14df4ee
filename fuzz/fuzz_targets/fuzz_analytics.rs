// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

//! Structured fuzzing of the aggregator: counts stay partitioned and
//! percentages stay in range for any catalog and record mix.

use arbitrary::Arbitrary;
use chrono::{Duration, TimeZone, Utc};
use collectory::analytics::generate_analytics;
use collectory::catalog::Catalog;
use collectory::types::{CollectionRecord, EstimatedValue, Figure, Rarity};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FigureInput {
    series: u8,
    rarity: u8,
    min: f64,
    max: f64,
}

#[derive(Arbitrary, Debug)]
struct RecordInput {
    figure: u16,
    owned: bool,
    wishlist: bool,
    days_ago: Option<u16>,
}

#[derive(Arbitrary, Debug)]
struct AnalyticsInput {
    figures: Vec<FigureInput>,
    records: Vec<RecordInput>,
}

fuzz_target!(|input: AnalyticsInput| {
    let figures: Vec<Figure> = input
        .figures
        .iter()
        .take(256)
        .enumerate()
        .map(|(i, f)| Figure {
            id: i.to_string(),
            name: format!("Figure {i}"),
            series: format!("Series {}", f.series % 8),
            rarity: Rarity::BY_IMPORTANCE[usize::from(f.rarity) % Rarity::BY_IMPORTANCE.len()],
            estimated_value: EstimatedValue { min: f.min, max: f.max },
        })
        .collect();
    let total = figures.len();
    let catalog = Catalog::from(figures);

    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let records: Vec<CollectionRecord> = input
        .records
        .iter()
        .take(512)
        .map(|r| CollectionRecord {
            figure_id: (usize::from(r.figure) % (total + 4)).to_string(),
            owned: r.owned,
            wishlist: r.wishlist,
            date_added: r
                .days_ago
                .map(|d| (now - Duration::days(i64::from(d))).to_rfc3339()),
            ..CollectionRecord::default()
        })
        .collect();

    let analytics = generate_analytics(&records, &catalog, now);

    assert_eq!(analytics.total_figures, total);
    assert!(analytics.owned_count <= total);
    assert!(analytics.wishlist_count <= total);
    assert!(analytics.completion_percentage <= 100);
    for series in &analytics.series_stats {
        assert!(series.owned_in_series <= series.total_in_series);
        assert!(series.completion_percentage <= 100);
    }
    let rarity_total: usize = analytics.rarity_stats.iter().map(|r| r.total_count).sum();
    assert_eq!(rarity_total, total);
    assert!(analytics.recent_additions.len() <= 10);
});
