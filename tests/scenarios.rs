// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! End-to-end scenarios through the public library API

use chrono::{DateTime, Duration, TimeZone, Utc};
use collectory::prelude::*;
use collectory::achievements::{default_definitions, UserAchievementProgress};
use collectory::sharing::{generate_shareable_content, sharing_suggestions, text_summary};

// =============================================================================
// Test Helpers
// =============================================================================

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
}

fn figure(id: &str, series: &str, rarity: Rarity, min: f64, max: f64) -> Figure {
    Figure {
        id: id.into(),
        name: format!("Figure {id}"),
        series: series.into(),
        rarity,
        estimated_value: EstimatedValue { min, max },
    }
}

/// 58 figures, 29 in each of two series, all Rare
fn two_series_catalog() -> Catalog {
    let mut figures = Vec::new();
    for i in 0..29 {
        figures.push(figure(&format!("a{i}"), "Series A", Rarity::Rare, 20.0, 40.0));
    }
    for i in 0..29 {
        figures.push(figure(&format!("b{i}"), "Series B", Rarity::Rare, 20.0, 40.0));
    }
    Catalog::from(figures)
}

fn owned_records(ids: impl IntoIterator<Item = String>) -> Vec<CollectionRecord> {
    ids.into_iter().map(CollectionRecord::owned).collect()
}

fn achievement<'a>(check: &'a AchievementCheck, id: &str) -> &'a Achievement {
    check
        .achievements
        .iter()
        .find(|a| a.id == id)
        .unwrap_or_else(|| panic!("missing achievement {id}"))
}

// =============================================================================
// Aggregator Scenarios
// =============================================================================

#[test]
fn test_ten_owned_in_one_of_two_series() {
    let catalog = two_series_catalog();
    let records = owned_records((0..10).map(|i| format!("a{i}")));

    let analytics = generate_analytics(&records, &catalog, now());

    assert_eq!(analytics.total_figures, 58);
    assert_eq!(analytics.owned_count, 10);
    assert_eq!(analytics.completion_percentage, 17);
    assert_eq!(analytics.series("Series A").unwrap().completion_percentage, 34);
    assert_eq!(analytics.series("Series B").unwrap().completion_percentage, 0);
    assert_eq!(analytics.series_stats[0].series_name, "Series A");

    let rare = analytics.rarity(Rarity::Rare).unwrap();
    assert_eq!(rare.total_count, 58);
    assert_eq!(rare.owned_count, 10);
    assert_eq!(rare.average_value, 300);
    assert_eq!(analytics.rarity_stats.len(), 1);

    assert_eq!(analytics.owned_value, ValueSummary { min: 200, max: 400, average: 300 });
}

#[test]
fn test_empty_collection() {
    let catalog = two_series_catalog();
    let analytics = generate_analytics(&[], &catalog, now());

    assert_eq!(analytics.owned_count, 0);
    assert_eq!(analytics.completion_percentage, 0);
    assert_eq!(analytics.owned_value, ValueSummary::default());
    assert!(!analytics.milestones.is_empty());
    assert!(analytics.milestones.iter().all(|m| !m.completed));
    assert_eq!(analytics.milestones.len(), 11);

    let insights = collection_insights(&analytics);
    assert_eq!(insights.len(), 1);
    assert!(insights[0].starts_with("🚀 Just getting started!"));
}

#[test]
fn test_unknown_figure_id_is_ignored() {
    let catalog = two_series_catalog();
    let mut records = owned_records(["a0".to_string(), "a1".to_string()]);
    records.push(CollectionRecord::owned("does-not-exist").added_on("2025-03-14"));
    records.push(CollectionRecord::wished("also-missing"));

    let analytics = generate_analytics(&records, &catalog, now());
    let baseline = generate_analytics(&records[..2], &catalog, now());

    assert_eq!(analytics.owned_count, 2);
    assert_eq!(analytics.wishlist_count, 0);
    assert_eq!(analytics.series_stats, baseline.series_stats);
    assert_eq!(analytics.rarity_stats, baseline.rarity_stats);
    assert_eq!(analytics.owned_value, baseline.owned_value);
}

#[test]
fn test_empty_catalog_yields_zeroes() {
    let catalog = Catalog::default();
    let records = owned_records(["x".to_string()]);
    let analytics = generate_analytics(&records, &catalog, now());

    assert_eq!(analytics.total_figures, 0);
    assert_eq!(analytics.owned_count, 0);
    assert_eq!(analytics.completion_percentage, 0);
    assert!(analytics.series_stats.is_empty());
    assert!(analytics.rarity_stats.is_empty());
}

#[test]
fn test_analytics_is_deterministic() {
    let catalog = two_series_catalog();
    let records: Vec<_> = (0..20)
        .map(|i| {
            CollectionRecord::owned(format!("b{i}"))
                .added_on((now() - Duration::days(i)).to_rfc3339())
        })
        .collect();

    let first = serde_json::to_string(&generate_analytics(&records, &catalog, now())).unwrap();
    let second = serde_json::to_string(&generate_analytics(&records, &catalog, now())).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Achievement Scenarios
// =============================================================================

#[test]
fn test_collector_5_unlocks_and_stays_unlocked() {
    let catalog = two_series_catalog();
    let definitions = default_definitions();

    // Four owned: locked
    let records = owned_records((0..4).map(|i| format!("a{i}")));
    let analytics = generate_analytics(&records, &catalog, now());
    let first = check_achievements(&definitions, &records, &analytics, None, now());
    assert!(!achievement(&first, "collector_5").unlocked);
    assert_eq!(achievement(&first, "collector_5").progress, 4);
    let snapshot = first.progress();

    // Five owned: unlocked and stamped
    let t2 = now() + Duration::days(1);
    let records = owned_records((0..5).map(|i| format!("a{i}")));
    let analytics = generate_analytics(&records, &catalog, t2);
    let prior = snapshot.achievements();
    let second = check_achievements(&definitions, &records, &analytics, Some(&prior), t2);
    let unlocked = achievement(&second, "collector_5");
    assert!(unlocked.unlocked);
    assert_eq!(unlocked.unlocked_at, Some(t2));
    assert!(second.newly_unlocked.iter().any(|a| a.id == "collector_5"));

    // Persist through JSON the way the store does
    let persisted: UserAchievementProgress =
        serde_json::from_str(&serde_json::to_string(&second.progress()).unwrap()).unwrap();

    // Three owned: still unlocked, timestamp unchanged, nothing new
    let t3 = t2 + Duration::days(1);
    let records = owned_records((0..3).map(|i| format!("a{i}")));
    let analytics = generate_analytics(&records, &catalog, t3);
    let prior = persisted.achievements();
    let third = check_achievements(&definitions, &records, &analytics, Some(&prior), t3);
    let kept = achievement(&third, "collector_5");
    assert!(kept.unlocked);
    assert_eq!(kept.unlocked_at, Some(t2));
    assert!(third.newly_unlocked.is_empty());
}

#[test]
fn test_custom_definitions_are_injected() {
    let catalog = two_series_catalog();
    let records = owned_records((0..2).map(|i| format!("a{i}")));
    let analytics = generate_analytics(&records, &catalog, now());

    let definitions: Vec<Achievement> = default_definitions()
        .into_iter()
        .filter(|a| a.id == "first_collector")
        .collect();
    let check = check_achievements(&definitions, &records, &analytics, None, now());

    assert_eq!(check.achievements.len(), 1);
    assert_eq!(check.newly_unlocked.len(), 1);
    assert_eq!(check.progress().total_points, 10);
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_share_summary_for_started_collection() {
    let catalog = two_series_catalog();
    let records = owned_records((0..10).map(|i| format!("a{i}")));
    let analytics = generate_analytics(&records, &catalog, now());
    let check = check_achievements(&default_definitions(), &records, &analytics, None, now());

    let content = generate_shareable_content(&records, &analytics, &check.achievements);
    let text = text_summary(&content);

    assert!(text.starts_with("🏆 My Figure Collection 🏆"));
    assert!(text.contains("10"));
    assert!(text.ends_with("#Collection #Collectibles #DesignerToys"));
    assert!(sharing_suggestions(&content)
        .iter()
        .any(|s| s == "Share your impressive collection size!"));
}
