//! Core key types for report storage.
//!
//! These types provide strongly-typed identifiers for the ingestion and
//! storage layers:
//! - `ReportType`: Which of the four spreadsheet report shapes a row maps to
//! - `UnixMillis`: Timestamp in milliseconds since Unix epoch
//! - `IngestStamp`: Per-ingestion timestamp + monotonic sequence number
//!
//! ## Record ID Derivation
//!
//! Record ids are synthesized as `{tag}-{site}-{millis}-{seq}-{index}`:
//! the report-type tag, the site id, the ingestion timestamp, a process-wide
//! sequence number, and the row's position within the upload. The sequence
//! number disambiguates repeated ingestions that land on the same
//! millisecond, so ids stay unique without semantic dedup across re-uploads
//! of the same data. The tag prefix is load-bearing: the filter evaluator
//! discriminates report types by it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use web_time::{SystemTime, UNIX_EPOCH};

/// The four report shapes exported by the analytics tool.
///
/// Tags are case-sensitive and appear verbatim as record id prefixes and in
/// persisted manifest entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportType {
    Misspellings,
    WordsToReview,
    PagesWithMisspellings,
    MisspellingHistory,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Misspellings,
        ReportType::WordsToReview,
        ReportType::PagesWithMisspellings,
        ReportType::MisspellingHistory,
    ];

    /// The wire tag for this report type.
    pub fn tag(&self) -> &'static str {
        match self {
            ReportType::Misspellings => "misspellings",
            ReportType::WordsToReview => "words-to-review",
            ReportType::PagesWithMisspellings => "pages-with-misspellings",
            ReportType::MisspellingHistory => "misspelling-history",
        }
    }

    /// Parses a wire tag. Case-sensitive; unknown tags return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "misspellings" => Some(ReportType::Misspellings),
            "words-to-review" => Some(ReportType::WordsToReview),
            "pages-with-misspellings" => Some(ReportType::PagesWithMisspellings),
            "misspelling-history" => Some(ReportType::MisspellingHistory),
            _ => None,
        }
    }

    /// Human-readable name for upload forms and table headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportType::Misspellings => "Misspellings",
            ReportType::WordsToReview => "Words to Review",
            ReportType::PagesWithMisspellings => "Pages with Misspellings",
            ReportType::MisspellingHistory => "Misspelling History",
        }
    }

    /// Column labels of the source spreadsheet, in positional order.
    ///
    /// The normalizer maps cells to fields by these positions; the labels
    /// themselves are only used for display and export headers.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ReportType::Misspellings => &[
                "Word",
                "Spelling Suggestion",
                "Language",
                "First Detected",
                "Pages",
            ],
            ReportType::WordsToReview => &[
                "Word",
                "Spelling Suggestion",
                "Language",
                "First Detected",
                "Misspelling Probability",
                "Pages",
            ],
            ReportType::PagesWithMisspellings => &[
                "Title",
                "URL",
                "Page Report Link",
                "CMS Link",
                "Misspellings",
                "Words to Review",
                "Page Level",
            ],
            ReportType::MisspellingHistory => &["Report Date", "Misspellings", "Words to Review"],
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Unix timestamp in milliseconds.
///
/// Using milliseconds provides sub-second precision for ingestion stamps
/// while maintaining compatibility with JavaScript Date.now().
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnixMillis(pub i64);

impl UnixMillis {
    /// Current wall-clock time. Works on both WASM and native via `web-time`.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(duration.as_millis() as i64)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// The UTC calendar date of this instant.
    pub fn to_naive_date(&self) -> chrono::NaiveDate {
        chrono::DateTime::from_timestamp_millis(self.0)
            .map(|dt| dt.date_naive())
            .unwrap_or_default()
    }

    /// The ISO-8601 calendar date (`YYYY-MM-DD`, UTC) of this instant.
    pub fn to_iso_date(&self) -> String {
        self.to_naive_date().format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for UnixMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide sequence counter for ingest stamps.
static INGEST_SEQ: AtomicU64 = AtomicU64::new(0);

/// Identifies one ingestion call.
///
/// Captured once per upload: every record id and the manifest id of that
/// upload embed the same stamp. The sequence number makes stamps unique
/// even when two ingestions share a wall-clock millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestStamp {
    pub millis: UnixMillis,
    pub seq: u64,
}

impl IngestStamp {
    /// Captures the current time and claims the next sequence number.
    pub fn next() -> Self {
        Self {
            millis: UnixMillis::now(),
            seq: INGEST_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Synthesizes the id for the record at `index` within this ingestion.
    pub fn record_id(&self, report_type: ReportType, site: &str, index: usize) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            report_type.tag(),
            site,
            self.millis,
            self.seq,
            index
        )
    }

    /// Synthesizes the manifest entry id for this ingestion.
    pub fn manifest_id(&self) -> String {
        format!("file-{}-{}", self.millis, self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for report_type in ReportType::ALL {
            assert_eq!(ReportType::from_tag(report_type.tag()), Some(report_type));
        }
    }

    #[test]
    fn test_from_tag_is_case_sensitive() {
        assert_eq!(ReportType::from_tag("Misspellings"), None);
        assert_eq!(ReportType::from_tag("WORDS-TO-REVIEW"), None);
        assert_eq!(ReportType::from_tag("history"), None);
    }

    #[test]
    fn test_record_id_embeds_tag_prefix() {
        let stamp = IngestStamp {
            millis: UnixMillis(1700000000000),
            seq: 7,
        };
        let id = stamp.record_id(ReportType::WordsToReview, "legal", 3);
        assert_eq!(id, "words-to-review-legal-1700000000000-7-3");
        assert!(id.starts_with(ReportType::WordsToReview.tag()));
    }

    #[test]
    fn test_stamps_sharing_a_millisecond_yield_distinct_ids() {
        let millis = UnixMillis(1700000000000);
        let first = IngestStamp { millis, seq: 1 };
        let second = IngestStamp { millis, seq: 2 };

        assert_ne!(
            first.record_id(ReportType::Misspellings, "tax", 0),
            second.record_id(ReportType::Misspellings, "tax", 0)
        );
        assert_ne!(first.manifest_id(), second.manifest_id());
    }

    #[test]
    fn test_sequence_advances() {
        let a = IngestStamp::next();
        let b = IngestStamp::next();
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_to_iso_date() {
        // 2024-02-01T00:00:00Z
        assert_eq!(UnixMillis(1706745600000).to_iso_date(), "2024-02-01");
    }
}
