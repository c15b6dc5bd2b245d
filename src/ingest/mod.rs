//! File ingestion pipeline.
//!
//! Turns raw spreadsheet uploads into typed report records:
//!
//! ```text
//! file bytes ──reader──▶ string grid ──metadata──▶ (date, site)
//!                              │
//!                              └──normalize──▶ Vec<ReportRecord>
//! ```
//!
//! The pipeline either returns a complete record set or fails as a whole;
//! there is no partial ingestion. Per-cell data quality issues are
//! defaulted, never raised (see `normalize`).

pub mod metadata;
pub mod normalize;
pub mod reader;

pub use metadata::{extract_metadata, ReportMetadata, UNKNOWN_SITE};
pub use normalize::normalize_rows;
pub use reader::{read_grid, Grid, UploadedFile};

use crate::data::keys::{IngestStamp, ReportType};
use crate::data::records::{ReportRecord, UploadManifestEntry};
use log::{debug, info};

/// Errors that can occur while ingesting an upload.
///
/// All three are fatal to the upload and leave prior state untouched; the
/// caller surfaces the message to the end user.
#[derive(Debug, Clone)]
pub enum IngestError {
    /// The file extension is not one of `.csv`, `.xlsx`, `.xls`.
    UnsupportedFormat(String),
    /// The file could not be decoded in its declared encoding.
    Read(String),
    /// The caller passed a report-type tag outside the four known types.
    /// A programming error on the intended UI paths, but reported rather
    /// than silently ignored.
    UnsupportedReportType(String),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::UnsupportedFormat(name) => write!(
                f,
                "Unsupported file format: {}. Please upload CSV or Excel files.",
                name
            ),
            IngestError::Read(msg) => write!(f, "Failed to read file: {}", msg),
            IngestError::UnsupportedReportType(tag) => {
                write!(f, "Unknown report type: {}", tag)
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// The outcome of a successful ingestion: normalized records plus the
/// metadata recovered from the grid header region.
pub struct ProcessedFile {
    pub records: Vec<ReportRecord>,
    pub metadata: ReportMetadata,
    pub report_type: ReportType,
    stamp: IngestStamp,
}

impl ProcessedFile {
    /// Builds the manifest entry recording this ingestion.
    ///
    /// Shares the ingestion stamp embedded in the record ids, so the entry
    /// and its records are traceable to one another.
    pub fn manifest_entry(&self, file_name: &str) -> UploadManifestEntry {
        UploadManifestEntry {
            id: self.stamp.manifest_id(),
            file_name: file_name.to_string(),
            site: self.metadata.site.clone(),
            report_type: self.report_type,
            uploaded_at: self.stamp.millis,
            row_count: self.records.len(),
        }
    }
}

/// Ingestion entry point: decodes `file`, extracts metadata, and
/// normalizes rows into records of the tagged report type.
///
/// The tag is matched case-sensitively against the four known report
/// types; anything else fails with `UnsupportedReportType`. Reader
/// failures propagate unchanged.
pub async fn process_file(
    file: &UploadedFile,
    report_type_tag: &str,
) -> Result<ProcessedFile, IngestError> {
    debug!(
        "processing {} ({} bytes) as {}",
        file.file_name,
        file.file_size(),
        report_type_tag
    );

    let report_type = ReportType::from_tag(report_type_tag)
        .ok_or_else(|| IngestError::UnsupportedReportType(report_type_tag.to_string()))?;

    let grid = reader::read_grid(file).await?;
    let metadata = metadata::extract_metadata(&grid);

    let stamp = IngestStamp::next();
    let records = normalize::normalize_rows(
        &grid,
        report_type,
        &metadata.site,
        &metadata.report_date,
        stamp,
    );

    info!(
        "processed {}: {} records for site {}",
        file.file_name,
        records.len(),
        metadata.site
    );

    Ok(ProcessedFile {
        records,
        metadata,
        report_type,
        stamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_csv_upload() {
        pollster::block_on(async {
            let file = UploadedFile::new(
                "legal-misspellings.csv",
                b"Report,2024-02-01\nSite,legal\nhdr\nrecieve,receive,en-US,2024-01-15,3\n"
                    .to_vec(),
            );

            let processed = process_file(&file, "misspellings").await.unwrap();
            assert_eq!(processed.metadata.report_date, "2024-02-01");
            assert_eq!(processed.metadata.site, "legal");
            assert_eq!(processed.records.len(), 1);

            match &processed.records[0] {
                ReportRecord::Misspelling(r) => {
                    assert_eq!(r.word, "recieve");
                    assert_eq!(r.suggestion, "receive");
                    assert_eq!(r.language, "en-US");
                    assert_eq!(r.first_detected, "2024-01-15");
                    assert_eq!(r.page_count, 3);
                    assert_eq!(r.site, "legal");
                    assert_eq!(r.report_date, "2024-02-01");
                }
                other => panic!("wrong variant: {:?}", other),
            }
        });
    }

    #[test]
    fn test_unknown_report_type_names_the_tag() {
        pollster::block_on(async {
            let file = UploadedFile::new("report.csv", b"a,b\nc,d\n".to_vec());
            match process_file(&file, "broken-links").await {
                Err(IngestError::UnsupportedReportType(tag)) => assert_eq!(tag, "broken-links"),
                other => panic!("expected UnsupportedReportType, got {:?}", other.err()),
            }
        });
    }

    #[test]
    fn test_unsupported_extension_propagates() {
        pollster::block_on(async {
            let file = UploadedFile::new("report.txt", b"a,b\n".to_vec());
            assert!(matches!(
                process_file(&file, "misspellings").await,
                Err(IngestError::UnsupportedFormat(_))
            ));
        });
    }

    #[test]
    fn test_manifest_entry_reflects_ingestion() {
        pollster::block_on(async {
            let file = UploadedFile::new(
                "history.csv",
                b"Report,2024-02-01\nSite,tax\nhdr\n2024-01-10,12,5\n2024-01-11,9,4\n".to_vec(),
            );

            let processed = process_file(&file, "misspelling-history").await.unwrap();
            let entry = processed.manifest_entry(&file.file_name);

            assert_eq!(entry.file_name, "history.csv");
            assert_eq!(entry.site, "tax");
            assert_eq!(entry.report_type, ReportType::MisspellingHistory);
            assert_eq!(entry.row_count, 2);
            assert!(entry.id.starts_with("file-"));
        });
    }

    #[test]
    fn test_repeated_uploads_get_distinct_ids() {
        pollster::block_on(async {
            let file = UploadedFile::new(
                "report.csv",
                b"Report,2024-02-01\nSite,legal\nhdr\nrecieve,receive,en-US,2024-01-15,3\n"
                    .to_vec(),
            );

            let first = process_file(&file, "misspellings").await.unwrap();
            let second = process_file(&file, "misspellings").await.unwrap();
            assert_ne!(first.records[0].id(), second.records[0].id());
        });
    }
}
