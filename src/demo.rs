//! Synthetic sample dataset for demo mode
//!
//! Shaped after the real analysis output this dashboard was built around:
//! religious-opposition-dominated content, almost everything at intensity
//! level 1, a high forward rate, and roughly half the messages carrying
//! media. Generation is deterministic for a given seed so demo screenshots
//! and tests are reproducible.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{
    AnalysisSummary, Category, Dataset, EngagementAnalysis, MessageRecord, SummaryHeader,
};
use crate::source::DataSource;

/// Number of relevant records in the demo dataset
pub const DEMO_RECORD_COUNT: usize = 1_315;

/// Total message count the demo summary claims was analyzed upstream
pub const DEMO_TOTAL_ANALYZED: u64 = 12_000;

/// Fraction of demo records forwarded at least once
const DEMO_FORWARD_RATE: f64 = 0.859;

/// Demo-mode provider; always serves data, so it terminates any chain
#[derive(Debug, Clone)]
pub struct DemoSource {
    seed: u64,
    record_count: usize,
}

impl DemoSource {
    /// Create a demo source with an explicit seed
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            record_count: DEMO_RECORD_COUNT,
        }
    }

    /// Create a demo source with an explicit seed and record count
    #[must_use]
    pub const fn with_seed_and_count(seed: u64, record_count: usize) -> Self {
        Self { seed, record_count }
    }

    /// Generate the synthetic record table
    #[must_use]
    pub fn generate_records(&self) -> Vec<MessageRecord> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();

        (0..self.record_count)
            .map(|i| {
                let category = demo_category(i, self.record_count);
                let forwards = if rng.gen_bool(DEMO_FORWARD_RATE) {
                    rng.gen_range(1..=10)
                } else {
                    0
                };

                let date = base_date + Duration::days((i % 365) as i64);

                MessageRecord {
                    id: format!("msg_{}", i + 1),
                    timestamp: date.and_hms_opt(12, 0, 0).unwrap_or_default(),
                    categories: vec![category],
                    subcategories: vec![demo_subcategory(category).to_string()],
                    // Almost everything sits at level 1; the real corpus had
                    // only a handful of level-2 messages.
                    intensity: Some(if i % 438 == 437 { 2 } else { 1 }),
                    relevant: true,
                    views: rng.gen_range(100..50_000),
                    forwards,
                    has_photo: i % 3 == 0,
                    has_document: i % 5 == 1,
                    markers: demo_markers(i),
                    text_preview: format!("Sample message content {}...", i + 1),
                }
            })
            .collect()
    }

    /// The canned summary matching the original sample data constants
    #[must_use]
    pub fn generate_summary(&self) -> AnalysisSummary {
        let count = self.record_count as u64;
        AnalysisSummary {
            header: SummaryHeader {
                total_messages_analyzed: DEMO_TOTAL_ANALYZED,
                relevant_messages_found: count,
                relevance_rate: 10.96,
            },
            category_distribution: BTreeMap::from([
                (Category::LgbtqHateSpeech.as_str().to_string(), 1_245),
                (Category::MasculinityBacklash.as_str().to_string(), 35),
                (Category::DigitalDisinformation.as_str().to_string(), 30),
                (Category::SrhrMoralPanic.as_str().to_string(), 5),
            ]),
            subcategory_distribution: BTreeMap::from([
                ("3.religious_opposition".to_string(), 1_280),
                ("2.emasculation".to_string(), 35),
                ("1.cultural_authenticity".to_string(), 30),
                ("4.traditional_family".to_string(), 25),
            ]),
            intensity_distribution: BTreeMap::from([
                ("1".to_string(), 1_312),
                ("2".to_string(), 3),
            ]),
            engagement_analysis: Some(EngagementAnalysis {
                viral_messages: 1_129,
                average_views: 8_547.0,
                average_forwards: 2.1,
                max_views: 89_000,
            }),
            top_linguistic_markers: BTreeMap::from([
                ("sin".to_string(), 977),
                ("immoral".to_string(), 156),
                ("abomination".to_string(), 89),
                ("against God".to_string(), 67),
                ("imported".to_string(), 45),
                ("our culture".to_string(), 34),
                ("beta male".to_string(), 23),
                ("emasculation".to_string(), 12),
            ]),
            content_with_media: Some(700),
            media_distribution: Some(BTreeMap::from([
                ("photo".to_string(), 450),
                ("document".to_string(), 250),
            ])),
        }
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::with_seed(42)
    }
}

impl DataSource for DemoSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn fetch(&self) -> Result<Option<Dataset>> {
        Ok(Some(Dataset {
            records: self.generate_records(),
            skipped: 0,
            summary: Some(self.generate_summary()),
        }))
    }
}

/// Category assignment mirroring the sample distribution (religious
/// opposition dominates at roughly 95%)
fn demo_category(index: usize, total: usize) -> Category {
    // Proportions from the sample summary: 1245/35/30/5 of 1315.
    let scaled = index * 1_315 / total.max(1);
    match scaled {
        0..=1_244 => Category::LgbtqHateSpeech,
        1_245..=1_279 => Category::MasculinityBacklash,
        1_280..=1_309 => Category::DigitalDisinformation,
        _ => Category::SrhrMoralPanic,
    }
}

const fn demo_subcategory(category: Category) -> &'static str {
    match category {
        Category::MasculinityBacklash => "2.emasculation",
        Category::DigitalDisinformation => "1.cultural_authenticity",
        Category::SrhrMoralPanic | Category::TraditionalFamily => "4.traditional_family",
        _ => "3.religious_opposition",
    }
}

/// Marker assignment: "sin" dominates, the rest tail off
fn demo_markers(index: usize) -> Vec<String> {
    let primary = match index % 20 {
        0..=14 => "sin",
        15 | 16 => "immoral",
        17 => "abomination",
        18 => "against God",
        _ => "imported",
    };

    let mut markers = vec![primary.to_string()];
    if index % 40 == 0 {
        markers.push("our culture".to_string());
    }
    markers
}
