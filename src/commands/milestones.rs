// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Milestones command

use super::Session;
use anyhow::Result;

/// Run the milestones command
pub fn run(session: &Session) -> Result<()> {
    let store = session.open_store()?;
    let catalog = session.load_catalog(&store)?;
    let analytics = session.analytics(&store, &catalog);

    if session.json {
        return session.print_json(&analytics.milestones);
    }

    for milestone in &analytics.milestones {
        println!(
            "{} {:<32} {:>6}/{:<6} {}",
            session.mark(milestone.completed),
            milestone.title,
            milestone.current,
            milestone.target,
            milestone.reward.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
