//! Demo dataset used to seed an empty store.
//!
//! Generates a trailing window of plausible records for every registered
//! site: daily misspelling and review-word rows over the last 30 days,
//! pages with issues, and 90 days of history with weekday/seasonal shape.
//!
//! Unlike real ingestions, seed ids embed the report date rather than an
//! ingestion stamp (`{tag}-{site}-{date}-{i}`), and generation is fully
//! deterministic for a given `today` so tests can assert on the output.

use crate::data::keys::{ReportType, UnixMillis};
use crate::data::records::{
    HistoryRecord, MisspellingRecord, PageIssueRecord, ReportRecord, ReviewWordRecord,
    UploadManifestEntry,
};
use crate::data::sites::SITES;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

const LANGUAGES: [&str; 4] = ["en-US", "en-CA", "en-GB", "fr-CA"];

const COMMON_MISSPELLINGS: [(&str, &str); 15] = [
    ("recieve", "receive"),
    ("seperate", "separate"),
    ("occured", "occurred"),
    ("accomodate", "accommodate"),
    ("definately", "definitely"),
    ("neccessary", "necessary"),
    ("begining", "beginning"),
    ("existance", "existence"),
    ("maintainance", "maintenance"),
    ("independant", "independent"),
    ("priviledge", "privilege"),
    ("embarass", "embarrass"),
    ("recomend", "recommend"),
    ("beleive", "believe"),
    ("acheive", "achieve"),
];

const REVIEW_WORDS: [(&str, &str); 10] = [
    ("colour", "color"),
    ("centre", "center"),
    ("realise", "realize"),
    ("analyse", "analyze"),
    ("organisation", "organization"),
    ("behaviour", "behavior"),
    ("favour", "favor"),
    ("honour", "honor"),
    ("labour", "labor"),
    ("neighbour", "neighbor"),
];

const SAMPLE_PAGES: [(&str, &str); 10] = [
    ("Tax Planning Guide 2024", "/tax/planning-guide-2024"),
    ("Corporate Tax Updates", "/tax/corporate-updates"),
    ("Legal Research Tools", "/legal/research-tools"),
    ("Case Law Database", "/legal/case-law"),
    ("About Thomson Reuters", "/about"),
    ("Contact Us", "/contact"),
    ("Privacy Policy", "/privacy"),
    ("Terms of Service", "/terms"),
    ("Writer Guidelines", "/writers/guidelines"),
    ("Editorial Standards", "/writers/standards"),
];

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Dates for the trailing `days`-day window ending at `today`, oldest first.
fn trailing_dates(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days)
        .rev()
        .map(|offset| today - Duration::days(offset as i64))
        .collect()
}

fn date_millis(date: NaiveDate) -> UnixMillis {
    UnixMillis(
        date.and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0),
    )
}

fn misspelling_records(today: NaiveDate) -> Vec<ReportRecord> {
    let mut records = Vec::new();
    for (day_idx, date) in trailing_dates(today, 30).into_iter().enumerate() {
        for (site_idx, site) in SITES.iter().enumerate() {
            // 3-8 rows per site per day
            let count = 3 + (day_idx + site_idx) % 6;
            for i in 0..count {
                let (word, suggestion) =
                    COMMON_MISSPELLINGS[(day_idx * 7 + site_idx * 3 + i) % 15];
                let first_detected = date - Duration::days(((day_idx + i * 3) % 30) as i64);
                records.push(ReportRecord::Misspelling(MisspellingRecord {
                    id: format!("misspellings-{}-{}-{}", site.id, iso(date), i),
                    word: word.to_string(),
                    suggestion: suggestion.to_string(),
                    language: LANGUAGES[(day_idx + site_idx + i) % 4].to_string(),
                    first_detected: iso(first_detected),
                    page_count: (1 + (day_idx * 5 + i * 3) % 15) as u32,
                    site: site.id.to_string(),
                    report_date: iso(date),
                }));
            }
        }
    }
    records
}

fn review_word_records(today: NaiveDate) -> Vec<ReportRecord> {
    let mut records = Vec::new();
    for (day_idx, date) in trailing_dates(today, 30).into_iter().enumerate() {
        for (site_idx, site) in SITES.iter().enumerate() {
            // 2-5 rows per site per day
            let count = 2 + (day_idx + site_idx) % 4;
            for i in 0..count {
                let (word, suggestion) = REVIEW_WORDS[(day_idx * 3 + site_idx + i) % 10];
                let first_detected = date - Duration::days(((day_idx + i * 2) % 20) as i64);
                // 30-70% probability band
                let probability =
                    0.3 + 0.4 * ((day_idx * 13 + site_idx * 5 + i * 7) % 100) as f64 / 100.0;
                records.push(ReportRecord::ReviewWord(ReviewWordRecord {
                    id: format!("words-to-review-{}-{}-{}", site.id, iso(date), i),
                    word: word.to_string(),
                    suggestion: suggestion.to_string(),
                    language: LANGUAGES[(day_idx + site_idx + i) % 4].to_string(),
                    first_detected: iso(first_detected),
                    misspelling_probability: probability,
                    page_count: (1 + (day_idx * 3 + i * 5) % 8) as u32,
                    site: site.id.to_string(),
                    report_date: iso(date),
                }));
            }
        }
    }
    records
}

fn page_issue_records(today: NaiveDate) -> Vec<ReportRecord> {
    let mut records = Vec::new();
    for (day_idx, date) in trailing_dates(today, 30).into_iter().enumerate() {
        for (site_idx, site) in SITES.iter().enumerate() {
            // 1-4 pages per site per day
            let count = 1 + (day_idx + site_idx) % 4;
            for i in 0..count {
                let (title, url) = SAMPLE_PAGES[(day_idx * 3 + site_idx + i) % 10];
                records.push(ReportRecord::PageIssue(PageIssueRecord {
                    id: format!("pages-with-misspellings-{}-{}-{}", site.id, iso(date), i),
                    title: title.to_string(),
                    url: url.to_string(),
                    report_link: format!(
                        "https://my.siteimprove.com/page-report/{}{}",
                        site.id, url
                    ),
                    cms_link: format!("https://cms.{}.com/edit{}", site.id, url),
                    misspelling_count: (1 + (day_idx * 7 + i * 5) % 12) as u32,
                    review_word_count: (1 + (day_idx * 5 + i * 3) % 8) as u32,
                    page_level: ((1 + (day_idx + i) % 4) as u32).to_string(),
                    site: site.id.to_string(),
                    report_date: iso(date),
                }));
            }
        }
    }
    records
}

fn history_records(today: NaiveDate) -> Vec<ReportRecord> {
    let mut records = Vec::new();
    // 3 months of history
    for (day_idx, date) in trailing_dates(today, 90).into_iter().enumerate() {
        let weekday = date.weekday();
        let is_weekend = weekday == Weekday::Sat || weekday == Weekday::Sun;
        // Lower activity on weekends, mild seasonal swing over the year
        let base = if is_weekend { 0.3 } else { 1.0 };
        let seasonal =
            0.8 + 0.4 * (date.ordinal() as f64 / 365.0 * 2.0 * std::f64::consts::PI).sin();

        for (site_idx, site) in SITES.iter().enumerate() {
            let misspellings = (15 + (day_idx * 17 + site_idx * 11) % 25) as f64 * base * seasonal;
            let review_words = (8 + (day_idx * 13 + site_idx * 7) % 15) as f64 * base * seasonal;
            records.push(ReportRecord::History(HistoryRecord {
                id: format!("misspelling-history-{}-{}", site.id, iso(date)),
                report_date: iso(date),
                misspelling_count: misspellings as u32,
                review_word_count: review_words as u32,
                site: site.id.to_string(),
            }));
        }
    }
    records
}

fn manifest_entries(today: NaiveDate) -> Vec<UploadManifestEntry> {
    let seeds: [(&str, &str, &str, ReportType, i64, usize); 5] = [
        (
            "file-1",
            "tax-misspellings-2024-01.csv",
            "tax",
            ReportType::Misspellings,
            5,
            156,
        ),
        (
            "file-2",
            "main-words-to-review-2024-01.xlsx",
            "main",
            ReportType::WordsToReview,
            3,
            89,
        ),
        (
            "file-3",
            "legal-pages-misspellings-2024-01.csv",
            "legal",
            ReportType::PagesWithMisspellings,
            2,
            67,
        ),
        (
            "file-4",
            "writers-history-2024-q1.xlsx",
            "writers",
            ReportType::MisspellingHistory,
            1,
            90,
        ),
        (
            "file-5",
            "legal-uk-misspellings-2024-01.csv",
            "legal-uk",
            ReportType::Misspellings,
            0,
            134,
        ),
    ];

    seeds
        .into_iter()
        .map(
            |(id, file_name, site, report_type, days_ago, row_count)| UploadManifestEntry {
                id: id.to_string(),
                file_name: file_name.to_string(),
                site: site.to_string(),
                report_type,
                uploaded_at: date_millis(today - Duration::days(days_ago)),
                row_count,
            },
        )
        .collect()
}

/// The full demo dataset for the given "today".
pub fn demo_dataset(today: NaiveDate) -> (Vec<ReportRecord>, Vec<UploadManifestEntry>) {
    let mut records = misspelling_records(today);
    records.extend(review_word_records(today));
    records.extend(page_issue_records(today));
    records.extend(history_records(today));
    (records, manifest_entries(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_generation_is_deterministic() {
        let (records_a, manifest_a) = demo_dataset(today());
        let (records_b, manifest_b) = demo_dataset(today());
        assert_eq!(records_a, records_b);
        assert_eq!(manifest_a, manifest_b);
    }

    #[test]
    fn test_ids_are_unique() {
        let (records, manifest) = demo_dataset(today());
        let record_ids: HashSet<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(record_ids.len(), records.len());

        let manifest_ids: HashSet<&str> = manifest.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(manifest_ids.len(), manifest.len());
    }

    #[test]
    fn test_all_report_types_present() {
        let (records, _) = demo_dataset(today());
        let kinds: HashSet<&'static str> = records.iter().map(|r| r.report_type().tag()).collect();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn test_review_probabilities_stay_in_band() {
        let (records, _) = demo_dataset(today());
        for record in &records {
            if let ReportRecord::ReviewWord(r) = record {
                assert!(
                    (0.3..=0.7).contains(&r.misspelling_probability),
                    "probability {} out of band",
                    r.misspelling_probability
                );
            }
        }
    }

    #[test]
    fn test_report_dates_fall_in_trailing_window() {
        let (records, _) = demo_dataset(today());
        let oldest = iso(today() - Duration::days(89));
        let newest = iso(today());
        for record in &records {
            let date = record.report_date();
            assert!(date >= oldest.as_str() && date <= newest.as_str());
        }
    }
}
