//! Row normalization: string grids into typed report records.
//!
//! The grid's first three rows are a metadata + header banner and are
//! discarded unconditionally; remaining rows that are entirely blank are
//! dropped. Surviving rows map positionally into the record shape of the
//! caller's report type.
//!
//! Per-cell defects never fail an upload: missing cells default to empty
//! strings or zero, and numeric cells use a parse-or-zero policy. Dirty
//! real-world exports are the norm, so best-effort ingestion beats strict
//! validation here.

use crate::data::keys::{IngestStamp, ReportType};
use crate::data::records::{
    HistoryRecord, MisspellingRecord, PageIssueRecord, ReportRecord, ReviewWordRecord,
};
use log::debug;

/// Metadata + header banner rows discarded from every report export.
const HEADER_ROWS: usize = 3;

/// Maps grid rows into typed records for `report_type`.
///
/// Record ids embed `stamp` and the row's zero-based position within the
/// surviving (non-blank) sequence. A grid with fewer than four rows yields
/// an empty collection, never an error.
pub fn normalize_rows(
    grid: &[Vec<String>],
    report_type: ReportType,
    site: &str,
    report_date: &str,
    stamp: IngestStamp,
) -> Vec<ReportRecord> {
    let data_rows = grid
        .iter()
        .skip(HEADER_ROWS)
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));

    let mut records = Vec::new();
    for (index, row) in data_rows.enumerate() {
        let id = stamp.record_id(report_type, site, index);
        let record = match report_type {
            ReportType::Misspellings => ReportRecord::Misspelling(MisspellingRecord {
                id,
                word: text_cell(row, 0),
                suggestion: text_cell(row, 1),
                language: text_cell(row, 2),
                first_detected: text_cell(row, 3),
                page_count: int_cell(row, 4),
                site: site.to_string(),
                report_date: report_date.to_string(),
            }),
            ReportType::WordsToReview => ReportRecord::ReviewWord(ReviewWordRecord {
                id,
                word: text_cell(row, 0),
                suggestion: text_cell(row, 1),
                language: text_cell(row, 2),
                first_detected: text_cell(row, 3),
                misspelling_probability: float_cell(row, 4),
                page_count: int_cell(row, 5),
                site: site.to_string(),
                report_date: report_date.to_string(),
            }),
            ReportType::PagesWithMisspellings => ReportRecord::PageIssue(PageIssueRecord {
                id,
                title: text_cell(row, 0),
                url: text_cell(row, 1),
                report_link: text_cell(row, 2),
                cms_link: text_cell(row, 3),
                misspelling_count: int_cell(row, 4),
                review_word_count: int_cell(row, 5),
                page_level: text_cell(row, 6),
                site: site.to_string(),
                report_date: report_date.to_string(),
            }),
            ReportType::MisspellingHistory => {
                // Rows carry their own date in column 0; the export's
                // trailing "total words" column, when present, is ignored.
                let row_date = text_cell(row, 0);
                ReportRecord::History(HistoryRecord {
                    id,
                    report_date: if row_date.is_empty() {
                        report_date.to_string()
                    } else {
                        row_date
                    },
                    misspelling_count: int_cell(row, 1),
                    review_word_count: int_cell(row, 2),
                    site: site.to_string(),
                })
            }
        };
        records.push(record);
    }

    debug!(
        "normalized {} rows into {} {} records",
        grid.len().saturating_sub(HEADER_ROWS),
        records.len(),
        report_type
    );
    records
}

fn text_cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// Parse-or-zero integer cell. Fractional text truncates toward zero, like
/// the source tool's parser.
fn int_cell(row: &[String], index: usize) -> u32 {
    let Some(cell) = row.get(index) else {
        return 0;
    };
    let cell = cell.trim();
    cell.parse::<u32>()
        .ok()
        .or_else(|| cell.parse::<f64>().ok().map(|f| f as u32))
        .unwrap_or(0)
}

/// Parse-or-zero float cell. No range clamp is applied.
fn float_cell(row: &[String], index: usize) -> f64 {
    row.get(index)
        .and_then(|cell| cell.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}
