//! Data models for coded message records and derived aggregates
//!
//! This module contains all data structures used throughout the crate,
//! including message records, the category taxonomy, precomputed analysis
//! summaries, and the result types returned by the aggregation core.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Top-level categories of the DMCA Thematic Coding Guide (v1.0)
///
/// The taxonomy is fixed at seven categories; records carrying any other
/// category label fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// LGBTQ+ Hate Speech & Anti-Rights Rhetoric
    #[serde(rename = "LGBTQ+ Hate Speech & Anti-Rights Rhetoric")]
    LgbtqHateSpeech,
    /// Masculinity & Gender Backlash
    #[serde(rename = "Masculinity & Gender Backlash")]
    MasculinityBacklash,
    /// Digital Disinformation & Anti-Gender Narratives
    #[serde(rename = "Digital Disinformation & Anti-Gender Narratives")]
    DigitalDisinformation,
    /// SRHR & Moral Panic
    #[serde(rename = "SRHR & Moral Panic")]
    SrhrMoralPanic,
    /// Traditional Family & Gender Roles
    #[serde(rename = "Traditional Family & Gender Roles")]
    TraditionalFamily,
    /// Anti-Feminist Rhetoric
    #[serde(rename = "Anti-Feminist Rhetoric")]
    AntiFeministRhetoric,
    /// Gender Ideology Conspiracy Narratives
    #[serde(rename = "Gender Ideology Conspiracy Narratives")]
    ConspiracyNarratives,
}

impl Category {
    /// All seven taxonomy categories, in canonical order
    pub const ALL: [Self; 7] = [
        Self::LgbtqHateSpeech,
        Self::MasculinityBacklash,
        Self::DigitalDisinformation,
        Self::SrhrMoralPanic,
        Self::TraditionalFamily,
        Self::AntiFeministRhetoric,
        Self::ConspiracyNarratives,
    ];

    /// Get the display name for this category as it appears in source files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LgbtqHateSpeech => "LGBTQ+ Hate Speech & Anti-Rights Rhetoric",
            Self::MasculinityBacklash => "Masculinity & Gender Backlash",
            Self::DigitalDisinformation => "Digital Disinformation & Anti-Gender Narratives",
            Self::SrhrMoralPanic => "SRHR & Moral Panic",
            Self::TraditionalFamily => "Traditional Family & Gender Roles",
            Self::AntiFeministRhetoric => "Anti-Feminist Rhetoric",
            Self::ConspiracyNarratives => "Gender Ideology Conspiracy Narratives",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|category| category.as_str() == s.trim())
            .copied()
            .ok_or_else(|| format!("Unknown category: {s}"))
    }
}

/// A single coded message record, one row of the analysis CSV
///
/// Records are produced by the upstream coding process and are read-only
/// here; the dashboard only derives aggregates from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Unique message identifier
    pub id: String,
    /// Timestamp of the original posting
    pub timestamp: NaiveDateTime,
    /// Top-level categories assigned by the coder
    pub categories: Vec<Category>,
    /// Subcategories nested under the assigned categories
    pub subcategories: Vec<String>,
    /// Ordinal intensity score (1-5), if coded
    pub intensity: Option<u8>,
    /// True if the message was coded as on-topic
    pub relevant: bool,
    /// View count at collection time
    pub views: u64,
    /// Forward count at collection time
    pub forwards: u64,
    /// True if the message carried a photo
    pub has_photo: bool,
    /// True if the message carried a document attachment
    pub has_document: bool,
    /// Keyword/phrase markers matched in the message text
    pub markers: Vec<String>,
    /// Truncated preview of the message text
    pub text_preview: String,
}

impl MessageRecord {
    /// True if the record carries any media attachment
    #[must_use]
    pub const fn has_media(&self) -> bool {
        self.has_photo || self.has_document
    }
}

/// A loaded dataset: validated records plus the optional precomputed summary
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Validated message records
    pub records: Vec<MessageRecord>,
    /// Number of malformed rows skipped during loading
    pub skipped: usize,
    /// Precomputed analysis summary, when the source provided one
    pub summary: Option<AnalysisSummary>,
}

/// Headline statistics block of the precomputed summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryHeader {
    /// Total number of messages processed upstream
    pub total_messages_analyzed: u64,
    /// Messages coded as relevant
    pub relevant_messages_found: u64,
    /// Relevant share of total, as a percentage
    pub relevance_rate: f64,
}

/// Engagement block of the precomputed summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementAnalysis {
    /// Messages forwarded at least once
    #[serde(default)]
    pub viral_messages: u64,
    /// Mean views per relevant message
    #[serde(default)]
    pub average_views: f64,
    /// Mean forwards per relevant message
    #[serde(default)]
    pub average_forwards: f64,
    /// Highest single-message view count
    #[serde(default)]
    pub max_views: u64,
}

/// Precomputed analysis summary, parsed from `analysis_summary.json`
///
/// Redundant with what the aggregation core can recompute from the record
/// table; used as a fast-path when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Headline totals
    #[serde(rename = "analysis_summary")]
    pub header: SummaryHeader,
    /// Message counts per top-level category
    #[serde(default)]
    pub category_distribution: BTreeMap<String, u64>,
    /// Message counts per subcategory
    #[serde(default)]
    pub subcategory_distribution: BTreeMap<String, u64>,
    /// Message counts per intensity level (keys "1".."5")
    #[serde(default)]
    pub intensity_distribution: BTreeMap<String, u64>,
    /// Engagement statistics
    #[serde(default)]
    pub engagement_analysis: Option<EngagementAnalysis>,
    /// Occurrence counts of matched linguistic markers
    #[serde(default)]
    pub top_linguistic_markers: BTreeMap<String, u64>,
    /// Relevant messages carrying any media
    #[serde(default)]
    pub content_with_media: Option<u64>,
    /// Media counts by type ("photo", "document")
    #[serde(default)]
    pub media_distribution: Option<BTreeMap<String, u64>>,
}

/// Time bucket granularity for temporal trend aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar-day buckets
    Day,
    /// ISO-week buckets, keyed by the Monday of the week
    Week,
}

/// Count and percentage share for one category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    /// Number of relevant records tagged with the category
    pub count: u64,
    /// Share of relevant records, rounded to one decimal
    pub percentage: f64,
}

/// Summary statistics over engagement metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementSummary {
    /// Mean view count across the input records
    pub mean_views: f64,
    /// Mean forward count across the input records
    pub mean_forwards: f64,
    /// Fraction of records with at least one forward
    pub forward_rate: f64,
    /// Highest single-record view count
    pub max_views: u64,
    /// Number of records with at least one forward
    pub viral_messages: u64,
}

/// Per-category counts for one time bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalBucket {
    /// First day covered by the bucket
    pub start: NaiveDate,
    /// Message counts per category within the bucket
    pub counts: BTreeMap<Category, u64>,
}

/// Media usage breakdown over relevant records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaBreakdown {
    /// Records carrying any media attachment
    pub with_media: u64,
    /// Records with no media attachment
    pub text_only: u64,
    /// Records carrying a photo
    pub photos: u64,
    /// Records carrying a document
    pub documents: u64,
}

/// One bin of the views histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewsBin {
    /// Inclusive lower bound of the bin
    pub lower: u64,
    /// Exclusive upper bound of the bin (inclusive for the last bin)
    pub upper: u64,
    /// Number of records whose view count falls in the bin
    pub count: u64,
}

/// Headline overview metrics for the dashboard's executive summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Total messages analyzed upstream
    pub total_messages: u64,
    /// Messages coded as relevant
    pub relevant_messages: u64,
    /// Relevant share of total, as a percentage
    pub relevance_rate: f64,
    /// Messages forwarded at least once
    pub viral_messages: u64,
}
