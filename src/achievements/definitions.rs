// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Achievement definition tables

use super::{Achievement, AchievementTier, Category, Requirement, RequirementKind, Reward, RewardKind, RewardValue};
use crate::error::Result;
use crate::store::read_document;
use serde::Deserialize;
use std::path::Path;

/// Build a single-requirement achievement with a title and a points reward
#[allow(clippy::too_many_arguments)]
fn define(
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    category: Category,
    tier: AchievementTier,
    points: u32,
    requirement: (RequirementKind, u64, &str),
    reward_title: &str,
) -> Achievement {
    let (kind, value, requirement_text) = requirement;
    Achievement {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
        category,
        tier,
        points,
        unlocked: false,
        unlocked_at: None,
        progress: 0,
        target: value,
        requirements: vec![Requirement {
            kind,
            value,
            description: requirement_text.into(),
        }],
        rewards: vec![
            Reward {
                kind: RewardKind::Title,
                value: RewardValue::Text(reward_title.into()),
                description: format!("Unlock the \"{reward_title}\" title"),
            },
            Reward {
                kind: RewardKind::Points,
                value: RewardValue::Number(i64::from(points)),
                description: format!("Earn {points} achievement points"),
            },
        ],
    }
}

/// The built-in achievement table
///
/// `photo_enthusiast` and `wishlist_master` are driven by `owned_count`,
/// like every other collection-size achievement.
#[must_use]
pub fn default_definitions() -> Vec<Achievement> {
    use AchievementTier::{Common, Epic, Rare, Uncommon};
    use RequirementKind::{OwnedCount, RarityCount, SeriesComplete, ValueThreshold};

    vec![
        // Collection size
        define("first_collector", "First Steps", "Add your first figure to your collection", "🎯",
            Category::Collection, Common, 10, (OwnedCount, 1, "Own 1 figure"), "Novice Collector"),
        define("collector_5", "Getting Started", "Build a collection of 5 figures", "🌟",
            Category::Collection, Common, 25, (OwnedCount, 5, "Own 5 figures"), "Collector"),
        define("collector_10", "Serious Collector", "Reach 10 figures in your collection", "💎",
            Category::Collection, Uncommon, 50, (OwnedCount, 10, "Own 10 figures"), "Serious Collector"),
        define("collector_25", "Dedicated Collector", "Amass a collection of 25 figures", "👑",
            Category::Collection, Rare, 100, (OwnedCount, 25, "Own 25 figures"), "Dedicated Collector"),
        define("collector_50", "Master Collector", "Achieve the ultimate collection of 50+ figures", "🏆",
            Category::Collection, Epic, 250, (OwnedCount, 50, "Own 50 figures"), "Master Collector"),
        // Value
        define("value_100", "Hundred Dollar Club", "Your collection is worth $100+", "💰",
            Category::Value, Common, 20, (ValueThreshold, 100, "Collection worth $100+"), "Value Collector"),
        define("value_500", "Half Grand", "Your collection reaches $500 in value", "💎",
            Category::Value, Uncommon, 75, (ValueThreshold, 500, "Collection worth $500+"), "Premium Collector"),
        define("value_1000", "Grand Collector", "Your collection is worth over $1,000", "💸",
            Category::Value, Rare, 150, (ValueThreshold, 1000, "Collection worth $1,000+"), "Grand Collector"),
        // Series
        define("series_master", "Series Master", "Complete your first series", "📚",
            Category::Series, Uncommon, 100, (SeriesComplete, 1, "Complete 1 full series"), "Series Master"),
        define("series_expert", "Series Expert", "Complete 3 different series", "🎓",
            Category::Series, Rare, 200, (SeriesComplete, 3, "Complete 3 full series"), "Series Expert"),
        // Rarity
        define("rare_hunter", "Rare Hunter", "Own your first Rare figure", "🔍",
            Category::Rarity, Uncommon, 50, (RarityCount, 1, "Own 1 Rare figure"), "Rare Hunter"),
        define("ultra_rare_master", "Ultra Rare Master", "Own an Ultra Rare figure", "✨",
            Category::Rarity, Epic, 300, (RarityCount, 1, "Own 1 Ultra Rare figure"), "Ultra Rare Master"),
        // Special
        define("photo_enthusiast", "Photo Enthusiast", "Add photos to 5 of your figures", "📸",
            Category::Special, Uncommon, 75, (OwnedCount, 5, "Add photos to 5 figures"), "Photo Enthusiast"),
        define("wishlist_master", "Wishlist Master", "Add 20 figures to your wishlist", "💭",
            Category::Special, Common, 30, (OwnedCount, 20, "Add 20 figures to wishlist"), "Wishlist Master"),
    ]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionsDocument {
    List(Vec<Achievement>),
    Table { achievements: Vec<Achievement> },
}

/// Load a definition table from a `.json` or `.toml` file
///
/// Loaded definitions always start locked with zero progress.
pub fn load_definitions(path: &Path) -> Result<Vec<Achievement>> {
    let doc: DefinitionsDocument = read_document(path)?;
    let mut definitions = match doc {
        DefinitionsDocument::List(list) | DefinitionsDocument::Table { achievements: list } => list,
    };
    for definition in &mut definitions {
        definition.unlocked = false;
        definition.unlocked_at = None;
        definition.progress = 0;
    }
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_default_table_shape() {
        let defs = default_definitions();
        assert_eq!(defs.len(), 14);

        let ids: HashSet<_> = defs.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), defs.len(), "ids must be unique");

        for a in &defs {
            assert!(!a.unlocked);
            assert_eq!(a.target, a.primary_requirement().unwrap().value);
            assert_eq!(a.rewards.len(), 2);
        }
    }

    #[test]
    fn test_load_toml_definitions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("achievements.toml");
        std::fs::write(
            &path,
            r#"
[[achievements]]
id = "trio"
title = "Trio"
description = "Own three figures"
category = "collection"
rarity = "common"
points = 15
target = 3
unlocked = true
requirements = [{ type = "owned_count", value = 3, description = "Own 3" }]
rewards = [{ type = "badge", value = "trio-badge" }]
"#,
        )
        .unwrap();

        let defs = load_definitions(&path).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].requirements[0].kind, RequirementKind::OwnedCount);
        assert_eq!(defs[0].rewards[0].value, RewardValue::Text("trio-badge".into()));
        assert!(!defs[0].unlocked);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("achievements.yaml");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            load_definitions(&path),
            Err(crate::Error::UnsupportedFormat(_))
        ));
    }
}
