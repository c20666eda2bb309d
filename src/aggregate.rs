//! The aggregation core: pure transforms from record tables to chart-ready
//! statistics
//!
//! Every view the dashboard renders is backed by one of these functions.
//! All of them are stateless, operate on an in-memory record slice, and
//! degrade to empty/zero results on empty input instead of failing.
//!
//! Denominator convention: `category_distribution` percentages are computed
//! against *relevant* records only. `engagement_summary` and the other
//! aggregates use every record they are given; callers wanting relevant-only
//! figures pre-filter the slice.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{
    AnalysisSummary, Category, CategoryShare, EngagementSummary, Granularity, MediaBreakdown,
    MessageRecord, Overview, TemporalBucket, ViewsBin,
};

/// Round a percentage to one decimal place for display
fn round_pct(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-category counts and percentage shares across relevant records
///
/// The percentage base is the number of relevant records; a record tagged
/// with several categories counts once per category, so shares can sum past
/// 100% for multi-coded datasets. Categories absent from the data are
/// omitted; see [`zero_filled`] when the full taxonomy is needed.
#[must_use]
pub fn category_distribution(records: &[MessageRecord]) -> BTreeMap<Category, CategoryShare> {
    let mut counts: BTreeMap<Category, u64> = BTreeMap::new();
    let mut relevant_total = 0u64;

    for record in records.iter().filter(|record| record.relevant) {
        relevant_total += 1;
        for category in &record.categories {
            *counts.entry(*category).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(category, count)| {
            let percentage = if relevant_total == 0 {
                0.0
            } else {
                round_pct(count as f64 / relevant_total as f64 * 100.0)
            };
            (category, CategoryShare { count, percentage })
        })
        .collect()
}

/// Extend a category distribution with zero entries for absent categories
///
/// Consumers that chart the complete taxonomy (stacked areas, legends) need
/// every category present even when its count is zero.
#[must_use]
pub fn zero_filled(
    distribution: &BTreeMap<Category, CategoryShare>,
) -> BTreeMap<Category, CategoryShare> {
    let mut filled = distribution.clone();
    for category in Category::ALL {
        filled.entry(category).or_insert(CategoryShare {
            count: 0,
            percentage: 0.0,
        });
    }
    filled
}

/// The `n` most frequent subcategories, count descending
///
/// Ties are broken by subcategory name ascending so output order is
/// deterministic. Subcategories with zero occurrences never appear.
#[must_use]
pub fn top_subcategories(records: &[MessageRecord], n: usize) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        for subcategory in &record.subcategories {
            *counts.entry(subcategory.as_str()).or_insert(0) += 1;
        }
    }

    rank_descending(counts, n)
}

/// Occurrence counts of linguistic markers across all records' marker sets,
/// truncated to the top `n` (count descending, alphabetical tiebreak)
#[must_use]
pub fn linguistic_marker_frequency(records: &[MessageRecord], n: usize) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        for marker in &record.markers {
            *counts.entry(marker.as_str()).or_insert(0) += 1;
        }
    }

    rank_descending(counts, n)
}

/// Sort a label/count map count-descending with name-ascending tiebreak and
/// keep the first `n` entries
fn rank_descending(counts: BTreeMap<&str, u64>, n: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();

    // BTreeMap iteration is already name-ascending, and the sort is stable,
    // so equal counts keep alphabetical order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Histogram of intensity scores over levels 1-5
///
/// All five levels are always present in the output (index 0 is level 1).
/// Records without a coded intensity are not counted, so the histogram sum
/// equals the number of records with a valid intensity field.
#[must_use]
pub fn intensity_histogram(records: &[MessageRecord]) -> [u64; 5] {
    let mut histogram = [0u64; 5];
    for record in records {
        if let Some(level @ 1..=5) = record.intensity {
            histogram[usize::from(level) - 1] += 1;
        }
    }
    histogram
}

/// Mean views/forwards, forward rate, and viral-message count
///
/// `forward_rate` is the fraction of input records with at least one
/// forward. Empty input yields an all-zero summary.
#[must_use]
pub fn engagement_summary(records: &[MessageRecord]) -> EngagementSummary {
    if records.is_empty() {
        return EngagementSummary::default();
    }

    let total = records.len() as f64;
    let mut views_sum = 0u64;
    let mut forwards_sum = 0u64;
    let mut max_views = 0u64;
    let mut viral = 0u64;

    for record in records {
        views_sum += record.views;
        forwards_sum += record.forwards;
        max_views = max_views.max(record.views);
        if record.forwards > 0 {
            viral += 1;
        }
    }

    EngagementSummary {
        mean_views: views_sum as f64 / total,
        mean_forwards: forwards_sum as f64 / total,
        forward_rate: viral as f64 / total,
        max_views,
        viral_messages: viral,
    }
}

/// Per-category message counts bucketed by day or ISO week
///
/// Buckets are returned in chronological order; spans with no records are
/// omitted (see [`fill_range`] for continuous output). A record tagged with
/// several categories contributes to each of them within its bucket.
#[must_use]
pub fn temporal_buckets(records: &[MessageRecord], granularity: Granularity) -> Vec<TemporalBucket> {
    let mut buckets: BTreeMap<NaiveDate, BTreeMap<Category, u64>> = BTreeMap::new();

    for record in records {
        let start = bucket_start(record.timestamp.date(), granularity);
        let counts = buckets.entry(start).or_default();
        for category in &record.categories {
            *counts.entry(*category).or_insert(0) += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(start, counts)| TemporalBucket { start, counts })
        .collect()
}

/// Insert empty buckets so the sequence covers every span between the first
/// and last bucket with no gaps
#[must_use]
pub fn fill_range(buckets: &[TemporalBucket], granularity: Granularity) -> Vec<TemporalBucket> {
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return Vec::new();
    };

    let step = match granularity {
        Granularity::Day => Duration::days(1),
        Granularity::Week => Duration::weeks(1),
    };

    let mut by_start: BTreeMap<NaiveDate, &TemporalBucket> =
        buckets.iter().map(|bucket| (bucket.start, bucket)).collect();

    let mut filled = Vec::new();
    let mut cursor = first.start;
    while cursor <= last.start {
        filled.push(by_start.remove(&cursor).cloned().unwrap_or_else(|| {
            TemporalBucket {
                start: cursor,
                counts: BTreeMap::new(),
            }
        }));
        cursor += step;
    }

    filled
}

/// Map a date onto its bucket start for the given granularity
fn bucket_start(date: NaiveDate, granularity: Granularity) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => {
            let days_from_monday = i64::from(date.weekday().num_days_from_monday());
            date - Duration::days(days_from_monday)
        }
    }
}

/// Media usage breakdown over the input records
#[must_use]
pub fn media_breakdown(records: &[MessageRecord]) -> MediaBreakdown {
    let mut breakdown = MediaBreakdown::default();
    for record in records {
        if record.has_media() {
            breakdown.with_media += 1;
        } else {
            breakdown.text_only += 1;
        }
        if record.has_photo {
            breakdown.photos += 1;
        }
        if record.has_document {
            breakdown.documents += 1;
        }
    }
    breakdown
}

/// Equal-width histogram of view counts across `bins` bins
///
/// Bin edges span from zero to the maximum observed view count; the last
/// bin is closed on both ends so the maximum always lands in it. Empty
/// input yields an empty vector.
#[must_use]
pub fn views_histogram(records: &[MessageRecord], bins: usize) -> Vec<ViewsBin> {
    if records.is_empty() || bins == 0 {
        return Vec::new();
    }

    let max_views = records.iter().map(|record| record.views).max().unwrap_or(0);
    let width = (max_views / bins as u64 + 1).max(1);

    let mut histogram: Vec<ViewsBin> = (0..bins)
        .map(|i| ViewsBin {
            lower: i as u64 * width,
            upper: (i as u64 + 1) * width,
            count: 0,
        })
        .collect();

    for record in records {
        let index = ((record.views / width) as usize).min(bins - 1);
        histogram[index].count += 1;
    }

    histogram
}

/// Headline overview metrics, preferring the precomputed summary when present
///
/// With a summary the totals come straight from the upstream pipeline (the
/// fast-path); without one everything is recomputed from the record table,
/// in which case `total_messages` can only reflect the rows actually
/// delivered.
#[must_use]
pub fn overview(records: &[MessageRecord], summary: Option<&AnalysisSummary>) -> Overview {
    if let Some(summary) = summary {
        let viral = summary
            .engagement_analysis
            .as_ref()
            .map_or_else(|| engagement_summary(records).viral_messages, |e| e.viral_messages);
        return Overview {
            total_messages: summary.header.total_messages_analyzed,
            relevant_messages: summary.header.relevant_messages_found,
            relevance_rate: summary.header.relevance_rate,
            viral_messages: viral,
        };
    }

    let total = records.len() as u64;
    let relevant = records.iter().filter(|record| record.relevant).count() as u64;
    let relevance_rate = if total == 0 {
        0.0
    } else {
        round_pct(relevant as f64 / total as f64 * 100.0)
    };

    Overview {
        total_messages: total,
        relevant_messages: relevant,
        relevance_rate,
        viral_messages: engagement_summary(records).viral_messages,
    }
}
