//! Best-effort extraction of report metadata from fixed grid positions.
//!
//! The source tool writes the report date into the second cell of the
//! first row and the site label into the second cell of the second row.
//! This is a fixed-position convention of the export format, brittle by
//! design: when either cell is absent or empty we fall back to defaults
//! instead of failing, so this step always succeeds.

use crate::data::keys::UnixMillis;
use log::debug;

/// Sentinel site label used when the grid carries none.
pub const UNKNOWN_SITE: &str = "unknown";

/// Report-level metadata recovered from the grid header region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMetadata {
    /// Nominal report date (`YYYY-MM-DD`); today when absent.
    pub report_date: String,
    /// Source-site label; `"unknown"` when absent.
    pub site: String,
}

/// Reads `grid[0][1]` and `grid[1][1]`, applying defaults for missing or
/// empty cells. Never fails.
pub fn extract_metadata(grid: &[Vec<String>]) -> ReportMetadata {
    let report_date = cell_at(grid, 0, 1).unwrap_or_else(|| UnixMillis::now().to_iso_date());
    let site = cell_at(grid, 1, 1).unwrap_or_else(|| UNKNOWN_SITE.to_string());

    debug!("extracted metadata: date={}, site={}", report_date, site);
    ReportMetadata { report_date, site }
}

fn cell_at(grid: &[Vec<String>], row: usize, col: usize) -> Option<String> {
    grid.get(row)
        .and_then(|cells| cells.get(col))
        .filter(|cell| !cell.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_reads_fixed_positions() {
        let metadata = extract_metadata(&grid(&[
            &["Report", "2024-02-01"],
            &["Site", "legal"],
            &["Word", "Suggestion"],
        ]));
        assert_eq!(metadata.report_date, "2024-02-01");
        assert_eq!(metadata.site, "legal");
    }

    #[test]
    fn test_missing_site_row_falls_back_to_unknown() {
        let metadata = extract_metadata(&grid(&[&["Report", "2024-02-01"]]));
        assert_eq!(metadata.report_date, "2024-02-01");
        assert_eq!(metadata.site, UNKNOWN_SITE);
    }

    #[test]
    fn test_empty_cells_fall_back_like_missing_ones() {
        let metadata = extract_metadata(&grid(&[&["Report", ""], &["Site", ""]]));
        assert_eq!(metadata.report_date, UnixMillis::now().to_iso_date());
        assert_eq!(metadata.site, UNKNOWN_SITE);
    }

    #[test]
    fn test_empty_grid_never_fails() {
        let metadata = extract_metadata(&[]);
        assert_eq!(metadata.report_date, UnixMillis::now().to_iso_date());
        assert_eq!(metadata.site, UNKNOWN_SITE);
    }
}
