// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use super::Session;
use anyhow::Result;
use collectory::insights::collection_insights;

pub fn run(session: &Session) -> Result<()> {
    let store = session.open_store()?;
    let catalog = session.load_catalog(&store)?;
    let insights = collection_insights(&session.analytics(&store, &catalog));

    if session.json {
        return session.print_json(&insights);
    }
    for line in insights {
        println!("{line}");
    }
    Ok(())
}
