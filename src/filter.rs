//! Record filtering for the message explorer view

use serde::{Deserialize, Serialize};

use crate::models::{Category, MessageRecord};

/// Filter criteria for the explorer: all set fields must match
///
/// An empty filter matches everything. Zero matches is an ordinary empty
/// result, never an error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Keep only records tagged with this category
    pub category: Option<Category>,
    /// Keep only records with exactly this intensity score
    pub intensity: Option<u8>,
    /// Keep only records with at least this many views
    pub min_views: Option<u64>,
}

impl RecordFilter {
    /// True if the record satisfies every set criterion
    #[must_use]
    pub fn matches(&self, record: &MessageRecord) -> bool {
        if let Some(category) = self.category {
            if !record.categories.contains(&category) {
                return false;
            }
        }

        if let Some(intensity) = self.intensity {
            if record.intensity != Some(intensity) {
                return false;
            }
        }

        if let Some(min_views) = self.min_views {
            if record.views < min_views {
                return false;
            }
        }

        true
    }

    /// Apply the filter, returning matches sorted by views descending
    ///
    /// The explorer shows the highest-reach messages first; `limit` caps the
    /// sample size the way the original view samples its top ten.
    #[must_use]
    pub fn apply<'a>(
        &self,
        records: &'a [MessageRecord],
        limit: Option<usize>,
    ) -> Vec<&'a MessageRecord> {
        let mut matched: Vec<&MessageRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .collect();

        matched.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.id.cmp(&b.id)));

        if let Some(limit) = limit {
            matched.truncate(limit);
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: &str, views: u64, intensity: u8) -> MessageRecord {
        MessageRecord {
            id: id.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            categories: vec![Category::LgbtqHateSpeech],
            subcategories: vec![],
            intensity: Some(intensity),
            relevant: true,
            views,
            forwards: 0,
            has_photo: false,
            has_document: false,
            markers: vec![],
            text_preview: String::new(),
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let records = vec![record("a", 10, 1), record("b", 20, 2)];
        let filter = RecordFilter::default();
        assert_eq!(filter.apply(&records, None).len(), 2);
    }

    #[test]
    fn test_filter_sorts_by_views_descending() {
        let records = vec![record("a", 10, 1), record("b", 500, 1), record("c", 50, 1)];
        let filter = RecordFilter::default();
        let matched = filter.apply(&records, Some(2));
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, "b");
        assert_eq!(matched[1].id, "c");
    }

    #[test]
    fn test_filter_by_intensity_and_views() {
        let records = vec![record("a", 10, 1), record("b", 500, 2), record("c", 50, 2)];
        let filter = RecordFilter {
            category: None,
            intensity: Some(2),
            min_views: Some(100),
        };
        let matched = filter.apply(&records, None);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "b");
    }

    #[test]
    fn test_filter_category_mismatch_is_empty_not_error() {
        let records = vec![record("a", 10, 1)];
        let filter = RecordFilter {
            category: Some(Category::SrhrMoralPanic),
            intensity: None,
            min_views: None,
        };
        assert!(filter.apply(&records, None).is_empty());
    }
}
