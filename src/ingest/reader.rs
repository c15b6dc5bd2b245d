//! Spreadsheet readers decoding uploaded files into string grids.
//!
//! Two encodings are supported, selected by the file's declared extension:
//! delimited text (`.csv`, with quoting for embedded delimiters and
//! newlines) and binary workbook containers (`.xlsx`/`.xls`, first sheet
//! only, cells coerced to strings). Decoding is a pure step with no
//! semantic interpretation of columns, and is deterministic for
//! identical bytes.

use crate::ingest::IngestError;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// A decoded spreadsheet: rows of string cells.
///
/// Rows may be ragged; the normalizer defaults missing cells.
pub type Grid = Vec<Vec<String>>;

/// An uploaded file's name and contents.
///
/// The bytes are assumed to fit in memory (no streaming); reading them out
/// of the browser's file object is the caller's concern.
#[derive(Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub file_data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, file_data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            file_data,
        }
    }

    pub fn file_size(&self) -> u64 {
        self.file_data.len() as u64
    }
}

/// Decodes an uploaded file into a grid based on its extension.
///
/// Extensions are matched case-sensitively against the lowercase forms the
/// source tool exports. Anything else fails with `UnsupportedFormat`.
pub async fn read_grid(file: &UploadedFile) -> Result<Grid, IngestError> {
    if file.file_name.ends_with(".csv") {
        decode_delimited(&file.file_data).await
    } else if file.file_name.ends_with(".xlsx") || file.file_name.ends_with(".xls") {
        decode_workbook(&file.file_data).await
    } else {
        Err(IngestError::UnsupportedFormat(file.file_name.clone()))
    }
}

/// Decodes comma-separated text. Blank physical lines are dropped before
/// they reach the grid; quoting and embedded newlines follow RFC 4180.
async fn decode_delimited(bytes: &[u8]) -> Result<Grid, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut grid = Grid::new();
    for result in reader.records() {
        let record = result.map_err(|e| IngestError::Read(e.to_string()))?;
        grid.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(grid)
}

/// Decodes the first sheet of a binary workbook container.
async fn decode_workbook(bytes: &[u8]) -> Result<Grid, IngestError> {
    let cursor = Cursor::new(bytes);
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| IngestError::Read(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::Read("workbook contains no sheets".to_string()))?
        .map_err(|e| IngestError::Read(e.to_string()))?;

    let mut grid = Grid::with_capacity(range.height());
    for row in range.rows() {
        grid.push(row.iter().map(cell_to_string).collect());
    }
    Ok(grid)
}

/// Coerces a workbook cell to its string form.
///
/// Error cells become empty strings rather than failing the upload, in
/// line with the pipeline's per-cell leniency.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_file(bytes: &[u8]) -> UploadedFile {
        UploadedFile::new("report.csv", bytes.to_vec())
    }

    #[test]
    fn test_csv_quoting_and_embedded_newlines() {
        pollster::block_on(async {
            let file = csv_file(b"a,\"b,c\"\nd,\"e\nf\"\n");
            let grid = read_grid(&file).await.unwrap();
            assert_eq!(
                grid,
                vec![
                    vec!["a".to_string(), "b,c".to_string()],
                    vec!["d".to_string(), "e\nf".to_string()],
                ]
            );
        });
    }

    #[test]
    fn test_csv_blank_lines_dropped() {
        pollster::block_on(async {
            let file = csv_file(b"a,b\n\n\nc,d\n");
            let grid = read_grid(&file).await.unwrap();
            assert_eq!(grid.len(), 2);
        });
    }

    #[test]
    fn test_csv_row_of_empty_cells_is_kept() {
        pollster::block_on(async {
            // ",," is a physical line with three empty cells, not a blank
            // line; dropping it is the normalizer's job, not the reader's.
            let file = csv_file(b"a,b,c\n,,\n");
            let grid = read_grid(&file).await.unwrap();
            assert_eq!(grid.len(), 2);
            assert_eq!(grid[1], vec!["", "", ""]);
        });
    }

    #[test]
    fn test_decode_is_deterministic() {
        pollster::block_on(async {
            let file = csv_file(b"w,x\ny,z\n");
            let first = read_grid(&file).await.unwrap();
            let second = read_grid(&file).await.unwrap();
            assert_eq!(first, second);
        });
    }

    #[test]
    fn test_unsupported_extension() {
        pollster::block_on(async {
            let file = UploadedFile::new("report.pdf", b"%PDF-1.4".to_vec());
            match read_grid(&file).await {
                Err(IngestError::UnsupportedFormat(name)) => assert_eq!(name, "report.pdf"),
                other => panic!("expected UnsupportedFormat, got {:?}", other),
            }
        });
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        pollster::block_on(async {
            let file = UploadedFile::new("REPORT.CSV", b"a,b\n".to_vec());
            assert!(matches!(
                read_grid(&file).await,
                Err(IngestError::UnsupportedFormat(_))
            ));
        });
    }

    #[test]
    fn test_corrupt_workbook_fails_with_read_error() {
        pollster::block_on(async {
            let file = UploadedFile::new("report.xlsx", b"definitely not a zip".to_vec());
            assert!(matches!(read_grid(&file).await, Err(IngestError::Read(_))));
        });
    }
}
