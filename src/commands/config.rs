// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Config command - show the effective configuration

use super::Session;
use anyhow::{bail, Context, Result};

/// Print the whole configuration, or the value at a dotted key
pub fn run(session: &Session, key: Option<&str>) -> Result<()> {
    let value = serde_json::to_value(&session.config).context("Failed to serialize configuration")?;

    let selected = match key {
        Some(key) => {
            let pointer = format!("/{}", key.replace('.', "/"));
            match value.pointer(&pointer) {
                Some(v) => v.clone(),
                None => bail!("Unknown config key: {}", key),
            }
        }
        None => value,
    };

    if session.json {
        return session.print_json(&selected);
    }

    match (&selected, key) {
        (serde_json::Value::Object(_), _) | (_, None) => {
            let rendered =
                toml::to_string_pretty(&without_nulls(selected.clone())).context("Failed to render configuration")?;
            print!("{rendered}");
        }
        (serde_json::Value::String(s), Some(_)) => println!("{s}"),
        (other, Some(_)) => println!("{other}"),
    }
    Ok(())
}

/// TOML has no null; unset options are left out
fn without_nulls(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k, without_nulls(v)))
            .collect(),
        other => other,
    }
}
