// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Milestone generation
//!
//! Owned-count and value milestones are emitted for every configured
//! threshold, reached or not. Series and rarity milestones only appear once
//! earned.

use crate::types::{Milestone, MilestoneKind, RarityStats, SeriesStats};
use serde::{Deserialize, Serialize};

/// A reward label that applies from `threshold` upwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTier {
    /// Smallest target that earns this label
    pub threshold: i64,
    /// Label shown with the milestone
    pub label: String,
}

/// Three-bucket reward lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTiers {
    /// Highest bucket
    pub top: RewardTier,
    /// Middle bucket
    pub mid: RewardTier,
    /// Label for everything below `mid`
    pub base: String,
}

impl RewardTiers {
    fn new(top: (i64, &str), mid: (i64, &str), base: &str) -> Self {
        Self {
            top: RewardTier { threshold: top.0, label: top.1.into() },
            mid: RewardTier { threshold: mid.0, label: mid.1.into() },
            base: base.into(),
        }
    }

    /// Reward label for a milestone target
    #[must_use]
    pub fn label_for(&self, target: i64) -> &str {
        if target >= self.top.threshold {
            &self.top.label
        } else if target >= self.mid.threshold {
            &self.mid.label
        } else {
            &self.base
        }
    }
}

/// Threshold tables and reward buckets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneSettings {
    /// Owned-count thresholds
    pub owned_thresholds: Vec<i64>,
    /// Owned-value thresholds
    pub value_thresholds: Vec<i64>,
    /// Reward buckets for owned-count milestones
    pub owned_rewards: RewardTiers,
    /// Reward buckets for value milestones
    pub value_rewards: RewardTiers,
    /// Reward for a completed series
    pub series_reward: String,
    /// Reward for owning top-tier figures
    pub rarity_reward: String,
}

impl Default for MilestoneSettings {
    fn default() -> Self {
        Self {
            owned_thresholds: vec![5, 10, 25, 50, 75, 100],
            value_thresholds: vec![100, 500, 1000, 2500, 5000],
            owned_rewards: RewardTiers::new(
                (50, "🏆 Master Collector"),
                (25, "🥇 Expert Collector"),
                "🥉 Collector",
            ),
            value_rewards: RewardTiers::new(
                (2500, "💰 High Roller"),
                (1000, "💎 Premium Collector"),
                "💵 Value Collector",
            ),
            series_reward: "🎯 Series Master".into(),
            rarity_reward: "✨ Rare Hunter".into(),
        }
    }
}

/// Generate the ranked milestone list
///
/// Completed milestones come first; within each group higher `current`
/// sorts earlier and equal values keep generation order.
#[must_use]
pub fn generate_milestones(
    owned_count: usize,
    owned_value_average: i64,
    series_stats: &[SeriesStats],
    rarity_stats: &[RarityStats],
    settings: &MilestoneSettings,
) -> Vec<Milestone> {
    let owned = i64::try_from(owned_count).unwrap_or(i64::MAX);
    let mut milestones = Vec::with_capacity(
        settings.owned_thresholds.len() + settings.value_thresholds.len() + series_stats.len() + 1,
    );

    for &target in &settings.owned_thresholds {
        milestones.push(Milestone {
            id: format!("owned_{target}"),
            title: format!("Collector Level {target}"),
            description: format!("Own {target} figures"),
            target,
            current: owned,
            completed: owned >= target,
            kind: MilestoneKind::Owned,
            reward: Some(settings.owned_rewards.label_for(target).to_string()),
        });
    }

    for &target in &settings.value_thresholds {
        milestones.push(Milestone {
            id: format!("value_{target}"),
            title: format!("${target} Collection"),
            description: format!("Collection worth ${target}+"),
            target,
            current: owned_value_average,
            completed: owned_value_average >= target,
            kind: MilestoneKind::Value,
            reward: Some(settings.value_rewards.label_for(target).to_string()),
        });
    }

    for series in series_stats.iter().filter(|s| s.completion_percentage == 100) {
        milestones.push(Milestone {
            id: format!("series_{}", underscored(&series.series_name)),
            title: format!("Series Master: {}", series.series_name),
            description: format!("Complete {} series", series.series_name),
            target: to_i64(series.total_in_series),
            current: to_i64(series.owned_in_series),
            completed: true,
            kind: MilestoneKind::Series,
            reward: Some(settings.series_reward.clone()),
        });
    }

    for rarity in rarity_stats.iter().filter(|r| r.rarity.is_top() && r.owned_count > 0) {
        let count = to_i64(rarity.owned_count);
        let plural = if rarity.owned_count > 1 { "s" } else { "" };
        milestones.push(Milestone {
            id: format!("rarity_{}", underscored(rarity.rarity.label())),
            title: format!("{} Hunter", rarity.rarity),
            description: format!("Own {count} {} figure{plural}", rarity.rarity),
            target: count,
            current: count,
            completed: true,
            kind: MilestoneKind::Rarity,
            reward: Some(settings.rarity_reward.clone()),
        });
    }

    milestones.sort_by(|a, b| b.completed.cmp(&a.completed).then(b.current.cmp(&a.current)));
    milestones
}

/// Replace each run of whitespace with a single underscore
fn underscored(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
