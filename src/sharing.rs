// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Sharing and export - packages already-computed analytics for display

use crate::achievements::Achievement;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::types::{CollectionAnalytics, CollectionRecord};
use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Export format version
pub const EXPORT_VERSION: &str = "1.0";

const CSV_HEADER: [&str; 8] = [
    "Figure ID",
    "Name",
    "Series",
    "Rarity",
    "Owned",
    "Wishlist",
    "Added Date",
    "User Photo",
];

/// Number of recent additions included in shareable content
const SHARED_RECENT: usize = 5;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Full JSON document
    Json,
    /// One CSV row per collection record
    Csv,
    /// Plain-text share summary
    Txt,
}

impl ExportFormat {
    /// Parse format from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "txt" | "text" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

/// Headline numbers of a shared collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    /// Figures in the catalog
    pub total_figures: usize,
    /// Owned figures
    pub owned_count: usize,
    /// Wishlisted figures
    pub wishlist_count: usize,
    /// Completion percentage
    pub completion_percentage: u32,
    /// Owned value average
    pub total_value: i64,
}

/// Everything a share sheet needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareableContent {
    /// Title line
    pub title: String,
    /// One-sentence description
    pub description: String,
    /// Headline numbers
    pub collection_stats: CollectionStats,
    /// Latest owned additions, newest first
    pub recent_additions: Vec<CollectionRecord>,
    /// Unlocked achievements
    pub achievements: Vec<Achievement>,
    /// Photo references of owned figures
    pub photos: Vec<String>,
}

/// Package analytics and achievements for sharing
#[must_use]
pub fn generate_shareable_content(
    records: &[CollectionRecord],
    analytics: &CollectionAnalytics,
    achievements: &[Achievement],
) -> ShareableContent {
    let owned: Vec<&CollectionRecord> = records.iter().filter(|r| r.owned).collect();

    let mut dated: Vec<_> = owned
        .iter()
        .filter_map(|r| r.added_at().map(|at| (at, *r)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    let recent_additions = dated
        .into_iter()
        .take(SHARED_RECENT)
        .map(|(_, r)| r.clone())
        .collect();

    ShareableContent {
        title: "My Figure Collection".into(),
        description: format!(
            "Check out my amazing collection! I have {} figures and {} on my wishlist.",
            analytics.owned_count, analytics.wishlist_count
        ),
        collection_stats: CollectionStats {
            total_figures: analytics.total_figures,
            owned_count: analytics.owned_count,
            wishlist_count: analytics.wishlist_count,
            completion_percentage: analytics.completion_percentage,
            total_value: analytics.owned_value.average,
        },
        recent_additions,
        achievements: achievements.iter().filter(|a| a.unlocked).cloned().collect(),
        photos: owned.iter().filter_map(|r| r.user_photo_ref.clone()).collect(),
    }
}

/// Plain-text share summary
#[must_use]
pub fn text_summary(content: &ShareableContent) -> String {
    let stats = &content.collection_stats;
    let mut text = String::from("🏆 My Figure Collection 🏆\n\n");
    text.push_str("📦 Collection Stats:\n");
    let _ = writeln!(text, "• Owned: {} figures", stats.owned_count);
    let _ = writeln!(text, "• Wishlist: {} figures", stats.wishlist_count);
    let _ = writeln!(text, "• Completion: {}%", stats.completion_percentage);
    let _ = writeln!(text, "• Total Value: ${}\n", stats.total_value);

    if !content.achievements.is_empty() {
        text.push_str("🏆 Recent Achievements:\n");
        for achievement in content.achievements.iter().take(3) {
            let _ = writeln!(text, "• {} {}", achievement.icon, achievement.title);
        }
        text.push('\n');
    }

    text.push_str("#Collection #Collectibles #DesignerToys");
    text
}

/// Prompts suggesting what to share
#[must_use]
pub fn sharing_suggestions(content: &ShareableContent) -> Vec<String> {
    let stats = &content.collection_stats;
    let checks = [
        (stats.owned_count >= 10, "Share your impressive collection size!"),
        (stats.completion_percentage >= 50, "Show off your collection completion progress!"),
        (content.achievements.len() >= 3, "Celebrate your recent achievements!"),
        (stats.total_value >= 500, "Share your valuable collection!"),
        (content.photos.len() >= 5, "Showcase your collection photos!"),
    ];

    let suggestions: Vec<String> = checks
        .iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| (*text).to_string())
        .collect();

    if suggestions.is_empty() {
        vec!["Share your collection journey!".to_string()]
    } else {
        suggestions
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    export_date: DateTime<Utc>,
    version: &'static str,
    collection: JsonCollection<'a>,
    metadata: JsonMetadata,
}

#[derive(Serialize)]
struct JsonCollection<'a> {
    items: &'a [CollectionRecord],
    analytics: &'a CollectionAnalytics,
    achievements: Vec<&'a Achievement>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMetadata {
    total_items: usize,
    owned_count: usize,
    wishlist_count: usize,
    completion_percentage: u32,
}

/// Full JSON export of the collection, analytics and unlocked achievements
pub fn json_export(
    records: &[CollectionRecord],
    analytics: &CollectionAnalytics,
    achievements: &[Achievement],
    now: DateTime<Utc>,
) -> serde_json::Result<String> {
    let export = JsonExport {
        export_date: now,
        version: EXPORT_VERSION,
        collection: JsonCollection {
            items: records,
            analytics,
            achievements: achievements.iter().filter(|a| a.unlocked).collect(),
        },
        metadata: JsonMetadata {
            total_items: records.len(),
            owned_count: analytics.owned_count,
            wishlist_count: analytics.wishlist_count,
            completion_percentage: analytics.completion_percentage,
        },
    };
    serde_json::to_string_pretty(&export)
}

/// CSV export, names and series resolved through the catalog
///
/// Fields are quoted only when they contain a delimiter, a quote or a line
/// break.
pub fn csv_export(records: &[CollectionRecord], catalog: &Catalog) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        let figure = catalog.get(&record.figure_id);
        let name = figure.map(|f| f.name.as_str()).filter(|n| !n.is_empty()).unwrap_or("Unknown");
        let series = figure.map_or("Unknown", |f| f.series.as_str());
        let rarity = figure.map_or("Unknown", |f| f.rarity.label());
        writer.write_record([
            record.figure_id.as_str(),
            name,
            series,
            rarity,
            yes_no(record.owned),
            yes_no(record.wishlist),
            record.date_added.as_deref().unwrap_or(""),
            yes_no(record.user_photo_ref.is_some()),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.strip_suffix('\n').unwrap_or(&text).to_string())
}

/// Render in the requested format
pub fn export(
    format: ExportFormat,
    records: &[CollectionRecord],
    catalog: &Catalog,
    analytics: &CollectionAnalytics,
    achievements: &[Achievement],
    now: DateTime<Utc>,
) -> Result<String> {
    Ok(match format {
        ExportFormat::Json => json_export(records, analytics, achievements, now)?,
        ExportFormat::Csv => csv_export(records, catalog)?,
        ExportFormat::Txt => text_summary(&generate_shareable_content(records, analytics, achievements)),
    })
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
