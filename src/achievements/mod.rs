// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Achievement engine
//!
//! Achievements are defined by an immutable table handed in by the caller
//! (see [`definitions::default_definitions`]). Progress is recomputed from
//! the analytics on every call. Unlocking is one-way: once an achievement
//! is unlocked in the prior snapshot it stays unlocked and keeps its
//! original `unlocked_at`, whatever the current progress.

pub mod definitions;
pub mod progress;

pub use definitions::{default_definitions, load_definitions};
pub use progress::{CategoryGroup, UserAchievementProgress};

use crate::types::{CollectionAnalytics, CollectionRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

// =========================================================================
// Definitions
// =========================================================================

/// Achievement category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Collection size
    Collection,
    /// Collection value
    Value,
    /// Series completion
    Series,
    /// Rare figures
    Rarity,
    /// Sharing
    Social,
    /// Everything else
    Special,
}

impl Category {
    /// Identifier as serialized
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Value => "value",
            Self::Series => "series",
            Self::Rarity => "rarity",
            Self::Social => "social",
            Self::Special => "special",
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Collection => "Collection",
            Self::Value => "Value",
            Self::Series => "Series",
            Self::Rarity => "Rarity",
            Self::Social => "Social",
            Self::Special => "Special",
        }
    }

    /// Display icon
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Collection => "📦",
            Self::Value => "💰",
            Self::Series => "📚",
            Self::Rarity => "✨",
            Self::Social => "👥",
            Self::Special => "🎯",
        }
    }

    /// One-line description
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Collection => "Build your collection",
            Self::Value => "Increase collection value",
            Self::Series => "Complete series",
            Self::Rarity => "Find rare figures",
            Self::Social => "Share with community",
            Self::Special => "Special achievements",
        }
    }
}

/// Achievement rarity tier (unrelated to figure rarity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    /// Common
    Common,
    /// Uncommon
    Uncommon,
    /// Rare
    Rare,
    /// Epic
    Epic,
    /// Legendary
    Legendary,
}

impl AchievementTier {
    /// Badge color as a hex string
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Common => "#95A5A6",
            Self::Uncommon => "#2ECC71",
            Self::Rare => "#3498DB",
            Self::Epic => "#9B59B6",
            Self::Legendary => "#F39C12",
        }
    }
}

impl std::fmt::Display for AchievementTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        })
    }
}

/// What a requirement measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// Number of owned figures
    OwnedCount,
    /// Rounded owned value average
    ValueThreshold,
    /// Number of fully owned series
    SeriesComplete,
    /// Ownership of rare figures
    RarityCount,
    /// Daily streak (not tracked, always 0)
    ConsecutiveDays,
    /// Shares (not tracked, always 0)
    SocialShare,
}

/// A typed threshold descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// What is measured
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    /// Threshold
    pub value: u64,
    /// Display text
    #[serde(default)]
    pub description: String,
}

/// Reward kind (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// A title
    Title,
    /// A badge
    Badge,
    /// Achievement points
    Points,
    /// Unlocks an app feature
    UnlockFeature,
}

/// Reward payload, either text or a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RewardValue {
    /// Numeric reward
    Number(i64),
    /// Text reward
    Text(String),
}

/// A display-only reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Reward kind
    #[serde(rename = "type")]
    pub kind: RewardKind,
    /// Payload
    pub value: RewardValue,
    /// Display text
    #[serde(default)]
    pub description: String,
}

/// An achievement definition together with its computed state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Display icon
    #[serde(default)]
    pub icon: String,
    /// Category
    pub category: Category,
    /// Rarity tier
    #[serde(rename = "rarity")]
    pub tier: AchievementTier,
    /// Points awarded on unlock
    pub points: u32,
    /// Unlocked flag (never cleared once set)
    #[serde(default)]
    pub unlocked: bool,
    /// First time the unlock was detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
    /// Current progress
    #[serde(default)]
    pub progress: u64,
    /// Progress needed to unlock
    pub target: u64,
    /// Requirements; only the first one drives progress
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    /// Display-only rewards
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl Achievement {
    /// The requirement that drives progress
    #[must_use]
    pub fn primary_requirement(&self) -> Option<&Requirement> {
        self.requirements.first()
    }

    /// Progress as a fraction of the target, capped at 1.0
    #[must_use]
    pub fn completion(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.progress as f64 / self.target as f64;
        ratio.min(1.0)
    }
}

// =========================================================================
// Engine
// =========================================================================

/// Progress of a single achievement for the current state
///
/// `rarity_count` only checks whether any catalog figure is owned at all,
/// not the rarity named by the requirement. Records that do not resolve to
/// the catalog never count.
#[must_use]
pub fn calculate_progress(
    achievement: &Achievement,
    _records: &[CollectionRecord],
    analytics: &CollectionAnalytics,
) -> u64 {
    let Some(requirement) = achievement.primary_requirement() else {
        return 0;
    };

    match requirement.kind {
        RequirementKind::OwnedCount => analytics.owned_count as u64,
        RequirementKind::ValueThreshold => u64::try_from(analytics.owned_value.average).unwrap_or(0),
        RequirementKind::SeriesComplete => analytics.completed_series() as u64,
        RequirementKind::RarityCount => u64::from(analytics.owned_count > 0),
        RequirementKind::ConsecutiveDays | RequirementKind::SocialShare => 0,
    }
}

/// Recompute progress for every definition
///
/// No timestamps are assigned here; a definition that is already unlocked
/// stays unlocked with its timestamp.
#[must_use]
pub fn compute_progress(
    definitions: &[Achievement],
    records: &[CollectionRecord],
    analytics: &CollectionAnalytics,
) -> Vec<Achievement> {
    definitions
        .iter()
        .map(|definition| {
            let mut achievement = definition.clone();
            achievement.progress = calculate_progress(definition, records, analytics);
            achievement.unlocked = definition.unlocked || achievement.progress >= achievement.target;
            achievement
        })
        .collect()
}

/// Result of an achievement check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementCheck {
    /// Every achievement with current progress and unlock state
    pub achievements: Vec<Achievement>,
    /// Achievements unlocked now that were not unlocked in the prior snapshot
    pub newly_unlocked: Vec<Achievement>,
}

impl AchievementCheck {
    /// Summarize into the persisted snapshot shape
    #[must_use]
    pub fn progress(&self) -> UserAchievementProgress {
        UserAchievementProgress::from_achievements(&self.achievements)
    }
}

/// Recompute achievements and diff them against the prior snapshot
///
/// Without a prior snapshot every achievement unlocked now is reported as
/// newly unlocked. Newly unlocked achievements are stamped with `now`.
#[must_use]
pub fn check_achievements(
    definitions: &[Achievement],
    records: &[CollectionRecord],
    analytics: &CollectionAnalytics,
    prior: Option<&[Achievement]>,
    now: DateTime<Utc>,
) -> AchievementCheck {
    let prior_unlocks: HashMap<&str, Option<DateTime<Utc>>> = prior
        .unwrap_or_default()
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| (a.id.as_str(), a.unlocked_at))
        .collect();

    let mut check = AchievementCheck::default();

    for mut achievement in compute_progress(definitions, records, analytics) {
        if let Some(&unlocked_at) = prior_unlocks.get(achievement.id.as_str()) {
            achievement.unlocked = true;
            achievement.unlocked_at = unlocked_at.or(achievement.unlocked_at);
        } else if achievement.unlocked {
            achievement.unlocked_at.get_or_insert(now);
            info!("Achievement unlocked: {} ({} pts)", achievement.title, achievement.points);
            check.newly_unlocked.push(achievement.clone());
        } else {
            debug!(
                "Achievement {} at {}/{}",
                achievement.id, achievement.progress, achievement.target
            );
        }
        check.achievements.push(achievement);
    }

    check
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SeriesStats, SeriesValue, ValueSummary};
    use chrono::TimeZone;

    fn analytics(owned: usize, average: i64, complete_series: usize) -> CollectionAnalytics {
        let series_stats = (0..complete_series)
            .map(|i| SeriesStats {
                series_name: format!("S{i}"),
                total_in_series: 2,
                owned_in_series: 2,
                wishlist_in_series: 0,
                completion_percentage: 100,
                series_value: SeriesValue::default(),
            })
            .collect();
        CollectionAnalytics {
            owned_count: owned,
            owned_value: ValueSummary { min: average, max: average, average },
            series_stats,
            ..CollectionAnalytics::default()
        }
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0).unwrap()
    }

    fn find<'a>(list: &'a [Achievement], id: &str) -> &'a Achievement {
        list.iter().find(|a| a.id == id).unwrap()
    }

    #[test]
    fn test_progress_dispatch() {
        let defs = default_definitions();
        let records = vec![CollectionRecord::owned("1")];
        let a = analytics(12, 640, 1);
        let list = compute_progress(&defs, &records, &a);

        assert_eq!(find(&list, "collector_10").progress, 12);
        assert!(find(&list, "collector_10").unlocked);
        assert!(!find(&list, "collector_25").unlocked);
        assert_eq!(find(&list, "value_500").progress, 640);
        assert!(find(&list, "value_500").unlocked);
        assert!(!find(&list, "value_1000").unlocked);
        assert_eq!(find(&list, "series_master").progress, 1);
        assert!(!find(&list, "series_expert").unlocked);
        // any owned figure at all satisfies rarity_count
        assert_eq!(find(&list, "ultra_rare_master").progress, 1);
    }

    #[test]
    fn test_unresolved_records_do_not_unlock_rarity() {
        let defs = default_definitions();
        let records = vec![CollectionRecord::owned("ghost-999")];
        let check = check_achievements(&defs, &records, &analytics(0, 0, 0), None, at(1));

        assert_eq!(find(&check.achievements, "rare_hunter").progress, 0);
        assert!(!find(&check.achievements, "ultra_rare_master").unlocked);
        assert!(check.newly_unlocked.is_empty());
        assert_eq!(check.progress().total_points, 0);
    }

    #[test]
    fn test_untracked_requirements_stay_at_zero() {
        let mut streak = default_definitions().remove(0);
        streak.id = "streak_7".into();
        streak.requirements[0].kind = RequirementKind::ConsecutiveDays;
        streak.target = 7;

        let list = compute_progress(&[streak], &[], &analytics(50, 5000, 3));
        assert_eq!(list[0].progress, 0);
        assert!(!list[0].unlocked);
    }

    #[test]
    fn test_first_run_reports_all_unlocked() {
        let defs = default_definitions();
        let check = check_achievements(&defs, &[], &analytics(5, 0, 0), None, at(1));

        let ids: Vec<_> = check.newly_unlocked.iter().map(|a| a.id.as_str()).collect();
        assert!(ids.contains(&"first_collector"));
        assert!(ids.contains(&"collector_5"));
        assert!(check.newly_unlocked.iter().all(|a| a.unlocked_at == Some(at(1))));
        assert_eq!(check.achievements.len(), defs.len());
    }

    #[test]
    fn test_unlock_is_monotonic_and_timestamp_sticks() {
        let defs = default_definitions();

        let first = check_achievements(&defs, &[], &analytics(4, 0, 0), None, at(1));
        assert!(!find(&first.achievements, "collector_5").unlocked);

        let second =
            check_achievements(&defs, &[], &analytics(5, 0, 0), Some(&first.achievements), at(2));
        let c5 = find(&second.achievements, "collector_5");
        assert!(c5.unlocked);
        assert_eq!(c5.unlocked_at, Some(at(2)));
        // photo_enthusiast shares the owned_count >= 5 requirement
        let newly: Vec<_> = second.newly_unlocked.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(newly, vec!["collector_5", "photo_enthusiast"]);

        let third =
            check_achievements(&defs, &[], &analytics(3, 0, 0), Some(&second.achievements), at(3));
        let c5 = find(&third.achievements, "collector_5");
        assert!(c5.unlocked);
        assert_eq!(c5.unlocked_at, Some(at(2)));
        assert_eq!(c5.progress, 3);
        assert!(third.newly_unlocked.is_empty());
    }

    #[test]
    fn test_prior_from_unknown_definition_is_ignored() {
        let defs = default_definitions();
        let mut ghost = defs[0].clone();
        ghost.id = "retired".into();
        ghost.unlocked = true;

        let check = check_achievements(&defs, &[], &analytics(0, 0, 0), Some(&[ghost]), at(4));
        assert!(check.achievements.iter().all(|a| a.id != "retired"));
        assert!(check.newly_unlocked.is_empty());
    }

    #[test]
    fn test_tier_colors() {
        assert_eq!(AchievementTier::Common.color(), "#95A5A6");
        assert_eq!(AchievementTier::Legendary.color(), "#F39C12");
    }
}
