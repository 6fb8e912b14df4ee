// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Collection analytics - totals, value ranges, series and rarity breakdowns
//!
//! [`generate_analytics`] is total: it never fails, whatever the records
//! contain. Records whose figure id is unknown to the catalog are skipped,
//! malformed dates only drop the record from the recent-additions window,
//! and empty groups report 0% instead of dividing by zero.

use crate::catalog::Catalog;
use crate::milestones::{generate_milestones, MilestoneSettings};
use crate::types::{
    CollectionAnalytics, CollectionRecord, Figure, Rarity, RarityStats, SeriesStats, SeriesValue,
    ValueSummary,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::debug;

/// Tunables for the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Size of the recent-additions window in days (inclusive)
    pub recent_window_days: i64,
    /// Maximum number of recent additions reported
    pub recent_limit: usize,
    /// Milestone thresholds and rewards
    pub milestones: MilestoneSettings,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            recent_limit: 10,
            milestones: MilestoneSettings::default(),
        }
    }
}

/// Generate analytics with the default settings
#[must_use]
pub fn generate_analytics(
    records: &[CollectionRecord],
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> CollectionAnalytics {
    generate_analytics_with(records, catalog, now, &AnalyticsSettings::default())
}

/// Generate analytics for a collection snapshot
#[must_use]
pub fn generate_analytics_with(
    records: &[CollectionRecord],
    catalog: &Catalog,
    now: DateTime<Utc>,
    settings: &AnalyticsSettings,
) -> CollectionAnalytics {
    let owned = resolve(records, catalog, |r| r.owned);
    let wishlist = resolve(records, catalog, |r| r.wishlist);

    let total_figures = catalog.len();
    let owned_count = owned.len();
    let owned_value = value_summary(owned.iter().copied());

    let series_stats = series_stats(catalog, &owned, &wishlist);
    let rarity_stats = rarity_stats(catalog, &owned, &wishlist);
    let milestones = generate_milestones(
        owned_count,
        owned_value.average,
        &series_stats,
        &rarity_stats,
        &settings.milestones,
    );

    debug!(
        "Analytics: {} owned, {} wishlisted of {} figures",
        owned_count,
        wishlist.len(),
        total_figures
    );

    CollectionAnalytics {
        total_figures,
        owned_count,
        wishlist_count: wishlist.len(),
        completion_percentage: percentage(owned_count, total_figures),
        total_value: value_summary(catalog.figures()),
        owned_value,
        wishlist_value: value_summary(wishlist.iter().copied()),
        series_stats,
        rarity_stats,
        recent_additions: recent_additions(records, catalog, now, settings),
        milestones,
    }
}

/// Rounded `part / whole` as a percentage, 0 for an empty whole
#[must_use]
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = (part as f64 / whole as f64 * 100.0).round() as u32;
    pct
}

/// Summed, rounded value range of a set of figures
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn value_summary<'a>(figures: impl IntoIterator<Item = &'a Figure>) -> ValueSummary {
    let (min, max) = figures.into_iter().fold((0.0_f64, 0.0_f64), |(min, max), figure| {
        let (lo, hi) = figure.estimated_value.sanitized();
        (min + lo, max + hi)
    });

    ValueSummary {
        min: min.round() as i64,
        max: max.round() as i64,
        average: ((min + max) / 2.0).round() as i64,
    }
}

/// Resolve the records selected by `keep` to distinct catalog figures
///
/// Unknown figure ids are dropped; a figure referenced by several records
/// counts once.
fn resolve<'a>(
    records: &[CollectionRecord],
    catalog: &'a Catalog,
    keep: impl Fn(&CollectionRecord) -> bool,
) -> Vec<&'a Figure> {
    let mut seen = HashSet::new();
    let mut figures = Vec::new();

    for record in records.iter().filter(|r| keep(r)) {
        let Some(figure) = catalog.get(&record.figure_id) else {
            debug!("Skipping record for unknown figure: {}", record.figure_id);
            continue;
        };
        if seen.insert(figure.id.as_str()) {
            figures.push(figure);
        }
    }

    figures
}

/// Per-group counts collected while walking the catalog
struct Tally<'a> {
    total: usize,
    owned: Vec<&'a Figure>,
    wishlist: usize,
}

/// Group catalog, owned and wishlisted figures by `key`, in catalog order
fn tally_by<'a, K, F>(
    catalog: &'a Catalog,
    owned: &[&'a Figure],
    wishlist: &[&'a Figure],
    key: F,
) -> Vec<(K, Tally<'a>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&Figure) -> K,
{
    let mut groups: Vec<(K, Tally<'a>)> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for figure in catalog.figures() {
        let k = key(figure);
        let pos = *positions.entry(k.clone()).or_insert_with(|| {
            groups.push((k, Tally { total: 0, owned: Vec::new(), wishlist: 0 }));
            groups.len() - 1
        });
        groups[pos].1.total += 1;
    }

    for &figure in owned {
        if let Some(&pos) = positions.get(&key(figure)) {
            groups[pos].1.owned.push(figure);
        }
    }
    for &figure in wishlist {
        if let Some(&pos) = positions.get(&key(figure)) {
            groups[pos].1.wishlist += 1;
        }
    }

    groups
}

/// Series breakdown, most complete series first (ties keep catalog order)
fn series_stats(catalog: &Catalog, owned: &[&Figure], wishlist: &[&Figure]) -> Vec<SeriesStats> {
    let mut stats: Vec<SeriesStats> = tally_by(catalog, owned, wishlist, |f| f.series.clone())
        .into_iter()
        .map(|(series_name, tally)| {
            let value = value_summary(tally.owned.iter().copied());
            SeriesStats {
                series_name,
                total_in_series: tally.total,
                owned_in_series: tally.owned.len(),
                wishlist_in_series: tally.wishlist,
                completion_percentage: percentage(tally.owned.len(), tally.total),
                series_value: SeriesValue {
                    min: value.min,
                    max: value.max,
                },
            }
        })
        .collect();

    stats.sort_by(|a, b| b.completion_percentage.cmp(&a.completion_percentage));
    stats
}

/// Rarity breakdown for the tiers present in the catalog, rarest first
fn rarity_stats(catalog: &Catalog, owned: &[&Figure], wishlist: &[&Figure]) -> Vec<RarityStats> {
    let mut stats: Vec<RarityStats> = tally_by(catalog, owned, wishlist, |f| f.rarity)
        .into_iter()
        .map(|(rarity, tally): (Rarity, Tally<'_>)| RarityStats {
            rarity,
            total_count: tally.total,
            owned_count: tally.owned.len(),
            wishlist_count: tally.wishlist,
            completion_percentage: percentage(tally.owned.len(), tally.total),
            average_value: if tally.owned.is_empty() {
                0
            } else {
                value_summary(tally.owned.iter().copied()).average
            },
        })
        .collect();

    stats.sort_by(|a, b| {
        a.rarity
            .importance()
            .cmp(&b.rarity.importance())
            .then(b.completion_percentage.cmp(&a.completion_percentage))
    });
    stats
}

/// Records added within the window ending at `now`, newest first
///
/// Only records that resolve to the catalog are reported. A window too large
/// to represent has no lower bound.
fn recent_additions(
    records: &[CollectionRecord],
    catalog: &Catalog,
    now: DateTime<Utc>,
    settings: &AnalyticsSettings,
) -> Vec<CollectionRecord> {
    let cutoff = Duration::try_days(settings.recent_window_days)
        .and_then(|window| now.checked_sub_signed(window));

    let mut dated: Vec<(DateTime<Utc>, &CollectionRecord)> = records
        .iter()
        .filter(|record| catalog.get(&record.figure_id).is_some())
        .filter_map(|record| {
            let raw = record.date_added.as_deref()?;
            match record.added_at() {
                Some(at) => Some((at, record)),
                None => {
                    debug!("Ignoring unparsable dateAdded {:?} on {}", raw, record.figure_id);
                    None
                }
            }
        })
        .filter(|(at, _)| cutoff.map_or(true, |cutoff| *at >= cutoff))
        .collect();

    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated
        .into_iter()
        .take(settings.recent_limit)
        .map(|(_, record)| record.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EstimatedValue;
    use chrono::TimeZone;

    fn figure(id: &str, series: &str, rarity: Rarity, min: f64, max: f64) -> Figure {
        Figure {
            id: id.into(),
            name: String::new(),
            series: series.into(),
            rarity,
            estimated_value: EstimatedValue { min, max },
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 30, 12, 0, 0).unwrap()
    }

    fn small_catalog() -> Catalog {
        Catalog::new(vec![
            figure("1", "Monsters", Rarity::Common, 10.0, 20.0),
            figure("2", "Monsters", Rarity::Rare, 30.5, 45.0),
            figure("3", "Macarons", Rarity::Common, 15.0, 25.0),
            figure("4", "Macarons", Rarity::UltraRare, 200.0, 300.0),
        ])
    }

    #[test]
    fn test_percentage_rounding_and_zero_whole() {
        assert_eq!(percentage(10, 58), 17);
        assert_eq!(percentage(10, 29), 34);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 0), 0);
    }

    #[test]
    fn test_value_summary_rounds_sums_not_terms() {
        let figures = [
            figure("a", "S", Rarity::Common, 10.4, 20.4),
            figure("b", "S", Rarity::Common, 10.4, 20.4),
        ];
        let summary = value_summary(figures.iter());
        assert_eq!(summary, ValueSummary { min: 21, max: 41, average: 31 });
        assert_eq!(value_summary(std::iter::empty()), ValueSummary::default());
    }

    #[test]
    fn test_value_summary_ignores_non_finite() {
        let figures = [figure("a", "S", Rarity::Common, f64::NAN, 20.0)];
        assert_eq!(value_summary(figures.iter()), ValueSummary { min: 0, max: 20, average: 10 });
    }

    #[test]
    fn test_owned_and_wishlist_partition() {
        let records = vec![
            CollectionRecord::owned("1"),
            CollectionRecord::owned("4"),
            CollectionRecord::wished("3"),
            CollectionRecord::owned("999"),
        ];
        let analytics = generate_analytics(&records, &small_catalog(), now());

        assert_eq!(analytics.total_figures, 4);
        assert_eq!(analytics.owned_count, 2);
        assert_eq!(analytics.wishlist_count, 1);
        assert_eq!(analytics.completion_percentage, 50);
        assert_eq!(analytics.owned_value, ValueSummary { min: 210, max: 320, average: 265 });
        assert_eq!(analytics.wishlist_value, ValueSummary { min: 15, max: 25, average: 20 });
        assert_eq!(analytics.total_value, ValueSummary { min: 256, max: 390, average: 323 });
    }

    #[test]
    fn test_record_both_owned_and_wishlisted_counts_twice() {
        let record = CollectionRecord {
            figure_id: "2".into(),
            owned: true,
            wishlist: true,
            ..CollectionRecord::default()
        };
        let analytics = generate_analytics(&[record], &small_catalog(), now());
        assert_eq!(analytics.owned_count, 1);
        assert_eq!(analytics.wishlist_count, 1);
    }

    #[test]
    fn test_duplicate_records_count_once() {
        let records = vec![CollectionRecord::owned("1"), CollectionRecord::owned("1")];
        let analytics = generate_analytics(&records, &small_catalog(), now());
        assert_eq!(analytics.owned_count, 1);
        let monsters = analytics.series("Monsters").unwrap();
        assert_eq!(monsters.owned_in_series, 1);
    }

    #[test]
    fn test_series_stats_sorted_by_completion() {
        let records = vec![CollectionRecord::owned("3"), CollectionRecord::owned("4")];
        let analytics = generate_analytics(&records, &small_catalog(), now());

        let names: Vec<_> = analytics.series_stats.iter().map(|s| s.series_name.as_str()).collect();
        assert_eq!(names, vec!["Macarons", "Monsters"]);

        let macarons = &analytics.series_stats[0];
        assert_eq!(macarons.completion_percentage, 100);
        assert_eq!(macarons.series_value, SeriesValue { min: 215, max: 325 });
        assert_eq!(analytics.series_stats[1].series_value, SeriesValue::default());
    }

    #[test]
    fn test_rarity_stats_order_and_average() {
        let records = vec![CollectionRecord::owned("1"), CollectionRecord::owned("4")];
        let analytics = generate_analytics(&records, &small_catalog(), now());

        let tiers: Vec<_> = analytics.rarity_stats.iter().map(|r| r.rarity).collect();
        assert_eq!(tiers, vec![Rarity::UltraRare, Rarity::Rare, Rarity::Common]);

        let common = analytics.rarity(Rarity::Common).unwrap();
        assert_eq!(common.total_count, 2);
        assert_eq!(common.owned_count, 1);
        assert_eq!(common.average_value, 15);
        assert_eq!(analytics.rarity(Rarity::Rare).unwrap().average_value, 0);
        assert!(analytics.rarity(Rarity::VeryRare).is_none());
    }

    #[test]
    fn test_recent_additions_window_order_and_cap() {
        let mut records: Vec<CollectionRecord> = (1..=12)
            .map(|day| CollectionRecord::owned("1").added_on(format!("2025-06-{day:02}T10:00:00Z")))
            .collect();
        records.push(CollectionRecord::owned("2").added_on("2025-05-31T12:00:00Z"));
        records.push(CollectionRecord::owned("2").added_on("2025-05-31T11:59:59Z"));
        records.push(CollectionRecord::owned("3").added_on("last tuesday"));
        records.push(CollectionRecord::owned("4"));

        let analytics = generate_analytics(&records, &small_catalog(), now());
        let recent = &analytics.recent_additions;

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].date_added.as_deref(), Some("2025-06-12T10:00:00Z"));
        assert_eq!(recent[9].date_added.as_deref(), Some("2025-06-03T10:00:00Z"));

        let settings = AnalyticsSettings { recent_limit: 50, ..AnalyticsSettings::default() };
        let all = generate_analytics_with(&records, &small_catalog(), now(), &settings);
        // exactly 30 days before is inside the window, one second earlier is not
        assert_eq!(all.recent_additions.len(), 13);
        assert_eq!(
            all.recent_additions.last().and_then(|r| r.date_added.as_deref()),
            Some("2025-05-31T12:00:00Z")
        );
    }

    #[test]
    fn test_recent_additions_skip_unknown_figures() {
        let records = vec![
            CollectionRecord::owned("1").added_on("2025-06-20"),
            CollectionRecord::owned("ghost").added_on("2025-06-21"),
            CollectionRecord::wished("phantom").added_on("2025-06-22"),
        ];
        let analytics = generate_analytics(&records, &small_catalog(), now());

        let ids: Vec<_> = analytics.recent_additions.iter().map(|r| r.figure_id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn test_oversized_window_has_no_lower_bound() {
        let records = vec![
            CollectionRecord::owned("1").added_on("1970-01-01"),
            CollectionRecord::owned("2").added_on("2025-06-29"),
        ];
        for days in [i64::MAX / 1000, i64::MAX, i64::MIN] {
            let settings = AnalyticsSettings { recent_window_days: days, ..AnalyticsSettings::default() };
            let analytics = generate_analytics_with(&records, &small_catalog(), now(), &settings);
            assert_eq!(analytics.owned_count, 2);
            if days > 0 {
                assert_eq!(analytics.recent_additions.len(), 2);
            }
        }
    }

    #[test]
    fn test_empty_catalog_is_all_zero() {
        let records = vec![CollectionRecord::owned("1")];
        let analytics = generate_analytics(&records, &Catalog::default(), now());

        assert_eq!(analytics.total_figures, 0);
        assert_eq!(analytics.owned_count, 0);
        assert_eq!(analytics.completion_percentage, 0);
        assert!(analytics.series_stats.is_empty());
        assert!(analytics.rarity_stats.is_empty());
        assert_eq!(analytics.milestones.len(), 11);
    }
}
