// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
#![no_main]

//! Feed arbitrary JSON through the collection and catalog decoders, then
//! through the aggregator and the achievement engine.

use chrono::{TimeZone, Utc};
use collectory::achievements::{check_achievements, default_definitions};
use collectory::analytics::generate_analytics;
use collectory::catalog::Catalog;
use collectory::types::{CollectionRecord, Figure};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let (catalog_json, records_json) = text.split_once('\n').unwrap_or((text, "[]"));

    let Ok(figures) = serde_json::from_str::<Vec<Figure>>(catalog_json) else {
        return;
    };
    let records: Vec<CollectionRecord> = serde_json::from_str(records_json).unwrap_or_default();

    let catalog = Catalog::from(figures);
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let analytics = generate_analytics(&records, &catalog, now);

    assert!(analytics.owned_count <= analytics.total_figures);
    assert!(analytics.completion_percentage <= 100);

    let check = check_achievements(&default_definitions(), &records, &analytics, None, now);
    let _ = serde_json::to_string(&check.progress());
});
