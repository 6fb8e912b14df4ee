// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Achievements command - recompute, report new unlocks, persist the snapshot

use super::Session;
use anyhow::{Context, Result};
use collectory::achievements::check_achievements;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    newly_unlocked: &'a [collectory::achievements::Achievement],
    progress: &'a collectory::achievements::UserAchievementProgress,
}

/// Run the achievements command
pub fn run(session: &Session, dry_run: bool) -> Result<()> {
    let store = session.open_store()?;
    let catalog = session.load_catalog(&store)?;
    let analytics = session.analytics(&store, &catalog);
    let definitions = session.definitions()?;

    let prior = store
        .load_achievement_snapshot()
        .with_context(|| format!("Failed to read achievement snapshot in {}", store.dir().display()))?
        .map(|snapshot| snapshot.achievements());

    let check = check_achievements(
        &definitions,
        store.records(),
        &analytics,
        prior.as_deref(),
        session.now,
    );
    let progress = check.progress();

    if dry_run {
        info!("Dry run, snapshot not written");
    } else {
        store
            .save_achievement_snapshot(&progress)
            .context("Failed to write achievement snapshot")?;
    }

    if session.json {
        return session.print_json(&Report {
            newly_unlocked: &check.newly_unlocked,
            progress: &progress,
        });
    }

    if check.newly_unlocked.is_empty() {
        println!("No new achievements.");
    } else {
        println!("{}", session.heading("Unlocked"));
        for achievement in &check.newly_unlocked {
            let title = if session.color {
                achievement.title.yellow().to_string()
            } else {
                achievement.title.clone()
            };
            println!(
                "  {} {} (+{} pts) {}",
                achievement.icon, title, achievement.points, achievement.description
            );
        }
    }

    println!();
    println!(
        "Level {} | {} pts (next level at {}) | {}/{} unlocked",
        progress.level,
        progress.total_points,
        progress.next_level_points,
        progress.unlocked_achievements,
        progress.total_achievements
    );
    for group in &progress.categories {
        println!();
        println!("{} {}", group.icon, session.heading(&group.name));
        for achievement in &group.achievements {
            println!(
                "  {} {:<24} {:>4}/{:<4} [{}]",
                session.mark(achievement.unlocked),
                achievement.title,
                achievement.progress,
                achievement.target,
                achievement.tier
            );
        }
    }

    Ok(())
}
