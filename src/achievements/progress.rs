// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Achievement progress snapshot - points, level and category grouping

use super::{Achievement, Category};
use serde::{Deserialize, Serialize};

/// Points per level
pub const POINTS_PER_LEVEL: u32 = 100;

/// Maximum number of recent unlocks kept in a snapshot
pub const RECENT_UNLOCKS: usize = 5;

/// Achievements of one category with display metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Category
    pub id: Category,
    /// Display name
    pub name: String,
    /// Display icon
    pub icon: String,
    /// Display description
    pub description: String,
    /// Achievements in this category, in definition order
    pub achievements: Vec<Achievement>,
}

/// The persisted achievement snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievementProgress {
    /// Points of all unlocked achievements
    pub total_points: u32,
    /// `total_points / 100 + 1`
    pub level: u32,
    /// Points at which the next level starts
    pub next_level_points: u32,
    /// Number of unlocked achievements
    pub unlocked_achievements: usize,
    /// Number of achievements
    pub total_achievements: usize,
    /// Achievements grouped by category
    #[serde(default)]
    pub categories: Vec<CategoryGroup>,
    /// Most recent unlocks, newest first
    #[serde(default)]
    pub recent_unlocks: Vec<Achievement>,
}

/// Level for a point total
#[must_use]
pub fn level_for(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

impl UserAchievementProgress {
    /// Derive the snapshot from a full achievement list
    #[must_use]
    pub fn from_achievements(achievements: &[Achievement]) -> Self {
        let total_points = achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.points)
            .fold(0u32, u32::saturating_add);
        let level = level_for(total_points);

        let mut recent_unlocks: Vec<Achievement> = achievements
            .iter()
            .filter(|a| a.unlocked && a.unlocked_at.is_some())
            .cloned()
            .collect();
        recent_unlocks.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
        recent_unlocks.truncate(RECENT_UNLOCKS);

        Self {
            total_points,
            level,
            next_level_points: level.saturating_mul(POINTS_PER_LEVEL),
            unlocked_achievements: achievements.iter().filter(|a| a.unlocked).count(),
            total_achievements: achievements.len(),
            categories: group_by_category(achievements),
            recent_unlocks,
        }
    }

    /// All achievements in the snapshot, flattened back out of the categories
    ///
    /// Feed this back as the prior snapshot of the next check.
    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        self.categories
            .iter()
            .flat_map(|c| c.achievements.iter().cloned())
            .collect()
    }

    /// Fraction of achievements unlocked (0.0 to 1.0)
    #[must_use]
    pub fn unlock_ratio(&self) -> f64 {
        if self.total_achievements == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.unlocked_achievements as f64 / self.total_achievements as f64;
        ratio
    }
}

/// Group achievements by category in first-appearance order
fn group_by_category(achievements: &[Achievement]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for achievement in achievements {
        match groups.iter_mut().find(|g| g.id == achievement.category) {
            Some(group) => group.achievements.push(achievement.clone()),
            None => groups.push(CategoryGroup {
                id: achievement.category,
                name: achievement.category.name().into(),
                icon: achievement.category.icon().into(),
                description: achievement.category.description().into(),
                achievements: vec![achievement.clone()],
            }),
        }
    }
    groups
}
