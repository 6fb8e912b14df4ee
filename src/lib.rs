// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Collectory library - analytics, milestones and achievements for figure collectors
//!
//! This crate derives collection statistics from a snapshot of collection
//! records and a fixed figure catalog. Every derivation is a pure function:
//! callers hand in the records, the catalog, the current time and (for
//! achievements) the previously persisted snapshot, and get fresh values back.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod achievements;
pub mod analytics;
pub mod catalog;
pub mod config;
pub mod error;
pub mod insights;
pub mod milestones;
pub mod sharing;
pub mod store;

pub use error::{Error, Result};

/// Core data types shared by the catalog, the collection and the derived analytics
pub mod types {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize};
    use std::fmt;

    // =========================================================================
    // Catalog Reference
    // =========================================================================

    /// Figure rarity tiers, ordered from most common to rarest
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub enum Rarity {
        /// Common
        Common,
        /// Uncommon
        Uncommon,
        /// Rare
        Rare,
        /// Very Rare
        #[serde(rename = "Very Rare")]
        VeryRare,
        /// Ultra Rare (the top tier)
        #[serde(rename = "Ultra Rare")]
        UltraRare,
    }

    impl Rarity {
        /// All tiers in importance order (rarest first)
        pub const BY_IMPORTANCE: [Self; 5] = [
            Self::UltraRare,
            Self::VeryRare,
            Self::Rare,
            Self::Uncommon,
            Self::Common,
        ];

        /// Display label, identical to the serialized form
        #[must_use]
        pub fn label(&self) -> &'static str {
            match self {
                Self::Common => "Common",
                Self::Uncommon => "Uncommon",
                Self::Rare => "Rare",
                Self::VeryRare => "Very Rare",
                Self::UltraRare => "Ultra Rare",
            }
        }

        /// Position in [`Rarity::BY_IMPORTANCE`]; 0 is the rarest tier
        #[must_use]
        pub fn importance(&self) -> usize {
            match self {
                Self::UltraRare => 0,
                Self::VeryRare => 1,
                Self::Rare => 2,
                Self::Uncommon => 3,
                Self::Common => 4,
            }
        }

        /// Whether this is the top tier
        #[must_use]
        pub fn is_top(&self) -> bool {
            matches!(self, Self::UltraRare)
        }
    }

    impl fmt::Display for Rarity {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.label())
        }
    }

    /// Estimated market value bounds for a single figure
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct EstimatedValue {
        /// Lower bound
        pub min: f64,
        /// Upper bound
        pub max: f64,
    }

    impl EstimatedValue {
        /// Bounds with non-finite values replaced by zero
        #[must_use]
        pub fn sanitized(&self) -> (f64, f64) {
            let clean = |v: f64| if v.is_finite() { v } else { 0.0 };
            (clean(self.min), clean(self.max))
        }
    }

    /// A catalog entry
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Figure {
        /// Stable identifier (numbers are normalized to their decimal string)
        #[serde(deserialize_with = "deserialize_id")]
        pub id: String,
        /// Display name
        #[serde(default)]
        pub name: String,
        /// Series the figure was released in
        pub series: String,
        /// Rarity tier
        pub rarity: Rarity,
        /// Estimated value range
        pub estimated_value: EstimatedValue,
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// A single entry in a user's collection
    ///
    /// `owned` and `wishlist` may both be true; the record then counts
    /// towards both subsets.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CollectionRecord {
        /// Catalog figure this record refers to (may be unknown to the catalog)
        #[serde(deserialize_with = "deserialize_id")]
        pub figure_id: String,
        /// Marked as owned
        #[serde(default)]
        pub owned: bool,
        /// Marked as wished for
        #[serde(default)]
        pub wishlist: bool,
        /// When the record was added, as an ISO-8601 string
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date_added: Option<String>,
        /// Opaque reference to a user photo
        #[serde(default, alias = "userPhoto", skip_serializing_if = "Option::is_none")]
        pub user_photo_ref: Option<String>,
        /// Free-form notes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub notes: Option<String>,
    }

    impl CollectionRecord {
        /// Create an owned record
        #[must_use]
        pub fn owned(figure_id: impl Into<String>) -> Self {
            Self {
                figure_id: figure_id.into(),
                owned: true,
                ..Self::default()
            }
        }

        /// Create a wishlist record
        #[must_use]
        pub fn wished(figure_id: impl Into<String>) -> Self {
            Self {
                figure_id: figure_id.into(),
                wishlist: true,
                ..Self::default()
            }
        }

        /// Set the added date
        #[must_use]
        pub fn added_on(mut self, date: impl Into<String>) -> Self {
            self.date_added = Some(date.into());
            self
        }

        /// Parsed `date_added`, `None` when absent or malformed
        #[must_use]
        pub fn added_at(&self) -> Option<DateTime<Utc>> {
            self.date_added.as_deref().and_then(parse_timestamp)
        }
    }

    /// A persisted collection document
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserCollection {
        /// Owner of the collection
        #[serde(default)]
        pub user_id: String,
        /// Collection records
        #[serde(default)]
        pub items: Vec<CollectionRecord>,
        /// Last time the document was written
        #[serde(default)]
        pub last_updated: Option<DateTime<Utc>>,
    }

    /// Parse an ISO-8601 timestamp
    ///
    /// Accepts RFC 3339, a naive date-time (taken as UTC) or a bare date
    /// (midnight UTC).
    #[must_use]
    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }

    /// Accept identifiers written either as strings or as integers
    fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        })
    }

    // =========================================================================
    // Derived Analytics
    // =========================================================================

    /// Summed value of a set of figures, rounded to whole units
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ValueSummary {
        /// Sum of lower bounds
        pub min: i64,
        /// Sum of upper bounds
        pub max: i64,
        /// Midpoint of the two sums
        pub average: i64,
    }

    /// Value bounds of the owned figures in a series
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct SeriesValue {
        /// Sum of lower bounds
        pub min: i64,
        /// Sum of upper bounds
        pub max: i64,
    }

    /// Per-series breakdown
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SeriesStats {
        /// Series name
        pub series_name: String,
        /// Catalog figures in the series
        pub total_in_series: usize,
        /// Owned figures in the series
        pub owned_in_series: usize,
        /// Wishlisted figures in the series
        pub wishlist_in_series: usize,
        /// Rounded owned / total percentage
        pub completion_percentage: u32,
        /// Value of the owned figures in the series
        pub series_value: SeriesValue,
    }

    /// Per-rarity breakdown
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RarityStats {
        /// Rarity tier
        pub rarity: Rarity,
        /// Catalog figures of this tier
        pub total_count: usize,
        /// Owned figures of this tier
        pub owned_count: usize,
        /// Wishlisted figures of this tier
        pub wishlist_count: usize,
        /// Rounded owned / total percentage
        pub completion_percentage: u32,
        /// Average value of the owned figures, 0 when none are owned
        pub average_value: i64,
    }

    /// Milestone classification
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum MilestoneKind {
        /// Number of owned figures
        Owned,
        /// Owned collection value
        Value,
        /// A fully completed series
        Series,
        /// Top-tier rarity ownership
        Rarity,
    }

    /// A goal-completion marker
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Milestone {
        /// Stable identifier, e.g. `owned_25`
        pub id: String,
        /// Display title
        pub title: String,
        /// Display description
        pub description: String,
        /// Threshold to reach
        pub target: i64,
        /// Current progress
        pub current: i64,
        /// `current >= target`
        pub completed: bool,
        /// Milestone classification
        #[serde(rename = "type")]
        pub kind: MilestoneKind,
        /// Reward label
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub reward: Option<String>,
    }

    /// The full analytics snapshot, recomputed from scratch on every call
    ///
    /// `CollectionAnalytics::default()` is the all-zero snapshot callers fall
    /// back to when they cannot produce analytics at all.
    #[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CollectionAnalytics {
        /// Number of figures in the catalog
        pub total_figures: usize,
        /// Distinct owned figures that resolve to the catalog
        pub owned_count: usize,
        /// Distinct wishlisted figures that resolve to the catalog
        pub wishlist_count: usize,
        /// Rounded owned / total percentage
        pub completion_percentage: u32,
        /// Value of the whole catalog
        pub total_value: ValueSummary,
        /// Value of the owned figures
        pub owned_value: ValueSummary,
        /// Value of the wishlisted figures
        pub wishlist_value: ValueSummary,
        /// Per-series breakdown, most complete first
        pub series_stats: Vec<SeriesStats>,
        /// Per-rarity breakdown, rarest first
        pub rarity_stats: Vec<RarityStats>,
        /// Records added inside the recent window, newest first
        pub recent_additions: Vec<CollectionRecord>,
        /// Milestones, completed first
        pub milestones: Vec<Milestone>,
    }

    impl CollectionAnalytics {
        /// Stats for the given rarity tier, if the catalog has any
        #[must_use]
        pub fn rarity(&self, rarity: Rarity) -> Option<&RarityStats> {
            self.rarity_stats.iter().find(|r| r.rarity == rarity)
        }

        /// Stats for the named series
        #[must_use]
        pub fn series(&self, name: &str) -> Option<&SeriesStats> {
            self.series_stats.iter().find(|s| s.series_name == name)
        }

        /// Number of series that are fully owned
        #[must_use]
        pub fn completed_series(&self) -> usize {
            self.series_stats
                .iter()
                .filter(|s| s.completion_percentage == 100)
                .count()
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::achievements::{check_achievements, compute_progress, Achievement, AchievementCheck};
    pub use crate::analytics::{generate_analytics, generate_analytics_with, AnalyticsSettings};
    pub use crate::catalog::Catalog;
    pub use crate::error::{Error, Result};
    pub use crate::insights::collection_insights;
    pub use crate::types::*;
}
