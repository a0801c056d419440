// Aggregations over journal entries

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use super::JournalEntry;
use crate::emotion::EmotionCategory;

/// Headline numbers for the journal view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmotionSummary {
    pub total: usize,
    pub distinct_emotions: usize,
    pub happy_count: usize,
    pub active_days: usize,
}

impl EmotionSummary {
    pub fn from_entries(entries: &[JournalEntry]) -> Self {
        let counts = emotion_counts(entries);
        let days: BTreeSet<NaiveDate> = entries.iter().map(JournalEntry::date).collect();

        Self {
            total: entries.len(),
            distinct_emotions: counts.len(),
            happy_count: counts.get(&EmotionCategory::Happy).copied().unwrap_or(0),
            active_days: days.len(),
        }
    }
}

/// Entries for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTrend {
    pub date: NaiveDate,
    pub total: usize,
    pub counts: BTreeMap<EmotionCategory, usize>,
}

/// Number of entries per emotion (only emotions that occur)
pub fn emotion_counts(entries: &[JournalEntry]) -> BTreeMap<EmotionCategory, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.emotion).or_insert(0) += 1;
    }
    counts
}

/// Entries grouped by UTC calendar day, preserving input order within a day
pub fn group_by_date(entries: &[JournalEntry]) -> BTreeMap<NaiveDate, Vec<&JournalEntry>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&JournalEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.date()).or_default().push(entry);
    }
    groups
}

/// Per-day totals for the `days` days ending at `today`, oldest first
pub fn daily_trend(entries: &[JournalEntry], today: NaiveDate, days: u32) -> Vec<DayTrend> {
    let groups = group_by_date(entries);

    (0..i64::from(days))
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            let day_entries = groups.get(&date).map(Vec::as_slice).unwrap_or(&[]);

            let mut counts = BTreeMap::new();
            for entry in day_entries {
                *counts.entry(entry.emotion).or_insert(0) += 1;
            }

            DayTrend {
                date,
                total: day_entries.len(),
                counts,
            }
        })
        .collect()
}

/// Entries matching `emotion`, or all entries when None
pub fn filter_by_emotion(entries: &[JournalEntry], emotion: Option<EmotionCategory>) -> Vec<JournalEntry> {
    entries
        .iter()
        .filter(|entry| emotion.map_or(true, |e| entry.emotion == e))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(emotion: EmotionCategory, y: i32, m: u32, d: u32, h: u32) -> JournalEntry {
        let mut entry = JournalEntry::new("x", emotion, None);
        entry.created_at = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        entry
    }

    fn fixture() -> Vec<JournalEntry> {
        vec![
            entry(EmotionCategory::Happy, 2026, 10, 16, 9),
            entry(EmotionCategory::Tired, 2026, 10, 16, 8),
            entry(EmotionCategory::Happy, 2026, 10, 14, 20),
            entry(EmotionCategory::Sad, 2026, 10, 1, 12),
        ]
    }

    #[test]
    fn test_summary() {
        let summary = EmotionSummary::from_entries(&fixture());
        assert_eq!(
            summary,
            EmotionSummary {
                total: 4,
                distinct_emotions: 3,
                happy_count: 2,
                active_days: 3,
            }
        );
        assert_eq!(EmotionSummary::from_entries(&[]), EmotionSummary::default());
    }

    #[test]
    fn test_counts_and_groups() {
        let entries = fixture();
        let counts = emotion_counts(&entries);
        assert_eq!(counts[&EmotionCategory::Happy], 2);
        assert!(!counts.contains_key(&EmotionCategory::Calm));

        let groups = group_by_date(&entries);
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(groups[&day].len(), 2);
        assert_eq!(groups[&day][0].emotion, EmotionCategory::Happy);
    }

    #[test]
    fn test_daily_trend_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let trend = daily_trend(&fixture(), today, 7);

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2026, 10, 10).unwrap());
        assert_eq!(trend[6].date, today);
        assert_eq!(trend[6].total, 2);
        assert_eq!(trend[4].total, 1);
        assert_eq!(trend[4].counts[&EmotionCategory::Happy], 1);
        assert_eq!(trend.iter().map(|d| d.total).sum::<usize>(), 3);

        assert!(daily_trend(&fixture(), today, 0).is_empty());
    }

    #[test]
    fn test_filter() {
        let entries = fixture();
        assert_eq!(filter_by_emotion(&entries, None).len(), 4);

        let happy = filter_by_emotion(&entries, Some(EmotionCategory::Happy));
        assert_eq!(happy.len(), 2);
        assert!(happy.iter().all(|e| e.emotion == EmotionCategory::Happy));
        assert!(filter_by_emotion(&entries, Some(EmotionCategory::Love)).is_empty());
    }
}
