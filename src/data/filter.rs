//! Pure filtering over the visible record collection.
//!
//! [`filter_records`] applies a multi-predicate filter (site membership,
//! report-type tag, inclusive calendar-date range, free-text search) with
//! AND semantics, preserving the records' relative order. It is pure and
//! re-entrant: identical inputs produce identical output on every call.
//!
//! [`summary_stats`] computes the dashboard's headline numbers from a
//! filtered slice; the export writer consumes the same mapping.

use crate::data::records::ReportRecord;
use chrono::NaiveDate;
use std::collections::HashSet;

/// An inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A multi-predicate record filter. All predicates are AND-combined.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    /// Site ids to include; empty matches all sites.
    pub sites: Vec<String>,
    /// Report-type tag matched as an id prefix; `None` matches all types.
    pub report_type: Option<String>,
    /// Inclusive report-date window, compared as calendar dates.
    pub date_range: DateRange,
    /// Case-insensitive substring matched against every field value;
    /// `None` always matches.
    pub search_term: Option<String>,
}

impl RecordFilter {
    /// A filter matching everything within `date_range`.
    pub fn for_range(date_range: DateRange) -> Self {
        Self {
            sites: Vec::new(),
            report_type: None,
            date_range,
            search_term: None,
        }
    }
}

/// Applies `filter` over `records`, preserving relative order.
pub fn filter_records<'a>(
    records: &'a [ReportRecord],
    filter: &RecordFilter,
) -> Vec<&'a ReportRecord> {
    records
        .iter()
        .filter(|record| matches_filter(record, filter))
        .collect()
}

fn matches_filter(record: &ReportRecord, filter: &RecordFilter) -> bool {
    if !filter.sites.is_empty() && !filter.sites.iter().any(|site| site == record.site()) {
        return false;
    }

    if let Some(tag) = &filter.report_type {
        if !record.id().starts_with(tag.as_str()) {
            return false;
        }
    }

    // A record whose stored date string does not parse as a calendar date
    // can never fall inside the window, mirroring the source tool's
    // Invalid-Date comparisons.
    match NaiveDate::parse_from_str(record.report_date(), "%Y-%m-%d") {
        Ok(date) if filter.date_range.contains(date) => {}
        _ => return false,
    }

    if let Some(term) = &filter.search_term {
        if !term.is_empty() {
            let needle = term.to_lowercase();
            if !record.searchable_text().to_lowercase().contains(&needle) {
                return false;
            }
        }
    }

    true
}

/// Dashboard summary statistics over a (typically filtered) record set.
///
/// Returned as ordered label/value pairs, ready for the export writer's
/// summary sheet. Misspelling totals include history rows.
pub fn summary_stats<'a, I>(records: I) -> Vec<(&'static str, usize)>
where
    I: IntoIterator<Item = &'a ReportRecord>,
{
    let mut misspellings = 0;
    let mut review_words = 0;
    let mut pages = 0;
    let mut sites = HashSet::new();

    for record in records {
        match record {
            ReportRecord::Misspelling(_) | ReportRecord::History(_) => misspellings += 1,
            ReportRecord::ReviewWord(_) => review_words += 1,
            ReportRecord::PageIssue(_) => pages += 1,
        }
        sites.insert(record.site());
    }

    vec![
        ("Total Misspellings", misspellings),
        ("Words to Review", review_words),
        ("Pages with Issues", pages),
        ("Unique Websites", sites.len()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::{HistoryRecord, MisspellingRecord};

    fn record(id: &str, site: &str, report_date: &str) -> ReportRecord {
        ReportRecord::Misspelling(MisspellingRecord {
            id: id.to_string(),
            word: "recieve".to_string(),
            suggestion: "receive".to_string(),
            language: "en-US".to_string(),
            first_detected: "2024-01-01".to_string(),
            page_count: 2,
            site: site.to_string(),
            report_date: report_date.to_string(),
        })
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn january() -> DateRange {
        DateRange::new(date("2024-01-01"), date("2024-01-31"))
    }

    /// Records for two sites, one per day of January 2024.
    fn two_site_month() -> Vec<ReportRecord> {
        let mut records = Vec::new();
        for day in 1..=31 {
            let report_date = format!("2024-01-{:02}", day);
            for site in ["tax", "legal"] {
                records.push(record(
                    &format!("misspellings-{}-{}-0", site, report_date),
                    site,
                    &report_date,
                ));
            }
        }
        records
    }

    #[test]
    fn test_site_and_date_window_compose() {
        let records = two_site_month();
        let filter = RecordFilter {
            sites: vec!["legal".to_string()],
            report_type: None,
            date_range: DateRange::new(date("2024-01-10"), date("2024-01-20")),
            search_term: None,
        };

        let matched = filter_records(&records, &filter);
        // Inclusive 11-day window, legal site only.
        assert_eq!(matched.len(), 11);
        for record in &matched {
            assert_eq!(record.site(), "legal");
            let day: u32 = record.report_date()[8..].parse().unwrap();
            assert!((10..=20).contains(&day));
        }
    }

    #[test]
    fn test_empty_sites_matches_all() {
        let records = two_site_month();
        let matched = filter_records(&records, &RecordFilter::for_range(january()));
        assert_eq!(matched.len(), records.len());
    }

    #[test]
    fn test_report_type_matches_by_id_prefix() {
        let records = vec![
            record("misspellings-tax-2024-01-05-0", "tax", "2024-01-05"),
            ReportRecord::History(HistoryRecord {
                id: "misspelling-history-tax-2024-01-05".to_string(),
                report_date: "2024-01-05".to_string(),
                misspelling_count: 4,
                review_word_count: 2,
                site: "tax".to_string(),
            }),
        ];

        let mut filter = RecordFilter::for_range(january());
        filter.report_type = Some("misspelling-history".to_string());

        let matched = filter_records(&records, &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].report_type().tag(), "misspelling-history");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = two_site_month();
        let mut filter = RecordFilter::for_range(january());
        filter.search_term = Some("RECIEVE".to_string());
        assert_eq!(filter_records(&records, &filter).len(), records.len());

        filter.search_term = Some("no-such-text".to_string());
        assert!(filter_records(&records, &filter).is_empty());
    }

    #[test]
    fn test_unparsable_report_date_never_matches() {
        let records = vec![record("misspellings-tax-x-0", "tax", "not-a-date")];
        let matched = filter_records(&records, &RecordFilter::for_range(january()));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_filtering_is_pure_and_order_preserving() {
        let records = two_site_month();
        let filter = RecordFilter::for_range(january());

        let first = filter_records(&records, &filter);
        let second = filter_records(&records, &filter);
        assert_eq!(first, second);

        let ids: Vec<&str> = first.iter().map(|r| r.id()).collect();
        let mut sorted_by_input_order: Vec<&str> = records.iter().map(|r| r.id()).collect();
        sorted_by_input_order.retain(|id| ids.contains(id));
        assert_eq!(ids, sorted_by_input_order);
    }

    #[test]
    fn test_summary_stats_counts_history_as_misspellings() {
        let records = vec![
            record("misspellings-tax-2024-01-05-0", "tax", "2024-01-05"),
            ReportRecord::History(HistoryRecord {
                id: "misspelling-history-legal-2024-01-05".to_string(),
                report_date: "2024-01-05".to_string(),
                misspelling_count: 4,
                review_word_count: 2,
                site: "legal".to_string(),
            }),
        ];

        let stats = summary_stats(records.iter());
        assert_eq!(stats[0], ("Total Misspellings", 2));
        assert_eq!(stats[1], ("Words to Review", 0));
        assert_eq!(stats[2], ("Pages with Issues", 0));
        assert_eq!(stats[3], ("Unique Websites", 2));
    }
}
