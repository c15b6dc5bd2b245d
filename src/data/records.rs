//! Typed report records and upload manifest entries.
//!
//! The source tool exports four spreadsheet shapes; each normalizes into one
//! variant of [`ReportRecord`]. The union is internally tagged with a `kind`
//! field (the report-type tag), so persisted JSON stays self-describing and
//! matching over variants is exhaustive at compile time instead of being
//! inferred from id prefixes.
//!
//! Records are immutable once created: the ingestion pipeline is the only
//! producer, nothing updates them in place, and deletion is logical via the
//! store's deleted-id ledgers.
//!
//! Date fields are carried as ISO-8601 `YYYY-MM-DD` strings exactly as they
//! appeared in the source cells; calendar interpretation happens in the
//! filter evaluator. This keeps ingestion lenient: a malformed date cell
//! round-trips through persistence unchanged rather than failing the upload.

use crate::data::keys::{ReportType, UnixMillis};
use serde::{Deserialize, Serialize};

/// One row of a "Misspellings" report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MisspellingRecord {
    pub id: String,
    pub word: String,
    pub suggestion: String,
    pub language: String,
    /// Date the word was first detected, as exported (`YYYY-MM-DD`).
    pub first_detected: String,
    /// Number of pages the misspelling appears on.
    pub page_count: u32,
    pub site: String,
    pub report_date: String,
}

/// One row of a "Words to Review" report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewWordRecord {
    pub id: String,
    pub word: String,
    pub suggestion: String,
    pub language: String,
    pub first_detected: String,
    /// Estimated probability this is a genuine misspelling. Nominally in
    /// [0, 1], but not clamped at parse time; out-of-range values from
    /// malformed cells persist as-is.
    pub misspelling_probability: f64,
    pub page_count: u32,
    pub site: String,
    pub report_date: String,
}

/// One row of a "Pages with Misspellings" report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageIssueRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub report_link: String,
    pub cms_link: String,
    pub misspelling_count: u32,
    pub review_word_count: u32,
    pub page_level: String,
    pub site: String,
    pub report_date: String,
}

/// One row of a "Misspelling History" report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub report_date: String,
    pub misspelling_count: u32,
    pub review_word_count: u32,
    pub site: String,
}

/// A normalized report record, one of the four report shapes.
///
/// The `kind` tag values are the report-type wire tags, matching the prefix
/// embedded in each record's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ReportRecord {
    #[serde(rename = "misspellings")]
    Misspelling(MisspellingRecord),
    #[serde(rename = "words-to-review")]
    ReviewWord(ReviewWordRecord),
    #[serde(rename = "pages-with-misspellings")]
    PageIssue(PageIssueRecord),
    #[serde(rename = "misspelling-history")]
    History(HistoryRecord),
}

impl ReportRecord {
    /// Globally unique identifier, unique within the persisted collection.
    pub fn id(&self) -> &str {
        match self {
            ReportRecord::Misspelling(r) => &r.id,
            ReportRecord::ReviewWord(r) => &r.id,
            ReportRecord::PageIssue(r) => &r.id,
            ReportRecord::History(r) => &r.id,
        }
    }

    /// The site this record belongs to (opaque registry key).
    pub fn site(&self) -> &str {
        match self {
            ReportRecord::Misspelling(r) => &r.site,
            ReportRecord::ReviewWord(r) => &r.site,
            ReportRecord::PageIssue(r) => &r.site,
            ReportRecord::History(r) => &r.site,
        }
    }

    /// The report's nominal date string (`YYYY-MM-DD` as ingested).
    pub fn report_date(&self) -> &str {
        match self {
            ReportRecord::Misspelling(r) => &r.report_date,
            ReportRecord::ReviewWord(r) => &r.report_date,
            ReportRecord::PageIssue(r) => &r.report_date,
            ReportRecord::History(r) => &r.report_date,
        }
    }

    /// The report type this record was normalized from.
    pub fn report_type(&self) -> ReportType {
        match self {
            ReportRecord::Misspelling(_) => ReportType::Misspellings,
            ReportRecord::ReviewWord(_) => ReportType::WordsToReview,
            ReportRecord::PageIssue(_) => ReportType::PagesWithMisspellings,
            ReportRecord::History(_) => ReportType::MisspellingHistory,
        }
    }

    /// All field values stringified and space-joined, for free-text search.
    pub fn searchable_text(&self) -> String {
        let fields: Vec<String> = match self {
            ReportRecord::Misspelling(r) => vec![
                r.id.clone(),
                r.word.clone(),
                r.suggestion.clone(),
                r.language.clone(),
                r.first_detected.clone(),
                r.page_count.to_string(),
                r.site.clone(),
                r.report_date.clone(),
            ],
            ReportRecord::ReviewWord(r) => vec![
                r.id.clone(),
                r.word.clone(),
                r.suggestion.clone(),
                r.language.clone(),
                r.first_detected.clone(),
                r.misspelling_probability.to_string(),
                r.page_count.to_string(),
                r.site.clone(),
                r.report_date.clone(),
            ],
            ReportRecord::PageIssue(r) => vec![
                r.id.clone(),
                r.title.clone(),
                r.url.clone(),
                r.report_link.clone(),
                r.cms_link.clone(),
                r.misspelling_count.to_string(),
                r.review_word_count.to_string(),
                r.page_level.clone(),
                r.site.clone(),
                r.report_date.clone(),
            ],
            ReportRecord::History(r) => vec![
                r.id.clone(),
                r.report_date.clone(),
                r.misspelling_count.to_string(),
                r.review_word_count.to_string(),
                r.site.clone(),
            ],
        };
        fields.join(" ")
    }
}

/// Manifest entry recorded for each successful ingestion.
///
/// Entries are never mutated; removal is a soft-delete through the store's
/// deleted-manifest-id ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadManifestEntry {
    pub id: String,
    /// Original filename as uploaded.
    pub file_name: String,
    pub site: String,
    pub report_type: ReportType,
    pub uploaded_at: UnixMillis,
    pub row_count: usize,
}
