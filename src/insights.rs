// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Human-readable insights derived from an analytics snapshot

use crate::types::{CollectionAnalytics, Rarity};

/// Summary lines for an analytics snapshot
///
/// The completion line is always present. The value, top-series, rarity and
/// recent-activity lines follow in that order, each only when it applies.
#[must_use]
pub fn collection_insights(analytics: &CollectionAnalytics) -> Vec<String> {
    let mut insights = Vec::new();

    let pct = analytics.completion_percentage;
    insights.push(if pct >= 50 {
        format!("🎉 Amazing! You've collected {pct}% of all figures!")
    } else if pct >= 25 {
        format!("📈 Great progress! You're {pct}% of the way to a complete collection!")
    } else {
        format!(
            "🚀 Just getting started! You have {} figures and many more to discover!",
            analytics.owned_count
        )
    });

    let value = analytics.owned_value.average;
    if value >= 1000 {
        insights.push(format!(
            "💰 Your collection is worth ${} - that's impressive!",
            thousands(value)
        ));
    } else if value >= 500 {
        insights.push(format!(
            "💎 Your collection has significant value at ${}!",
            thousands(value)
        ));
    }

    if let Some(top) = analytics.series_stats.first() {
        if top.completion_percentage >= 75 {
            insights.push(format!(
                "🎯 You're almost done with {} - just {} more!",
                top.series_name,
                top.total_in_series.saturating_sub(top.owned_in_series)
            ));
        }
    }

    if let Some(ultra) = analytics.rarity(Rarity::UltraRare).filter(|r| r.owned_count > 0) {
        insights.push(format!(
            "✨ You own {} Ultra Rare figure{} - that's incredible!",
            ultra.owned_count,
            plural(ultra.owned_count)
        ));
    }

    let recent = analytics.recent_additions.len();
    if recent > 0 {
        insights.push(format!(
            "📅 You've added {recent} figure{} in the last 30 days!",
            plural(recent)
        ));
    }

    insights
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Format an integer with comma thousands separators
#[must_use]
pub fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
