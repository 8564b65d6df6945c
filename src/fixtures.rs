//! Tabular fixture loading.
//!
//! Reads a spreadsheet sheet into one column-name-to-cell-text map per
//! data row, the first row supplying the column names. A broken or
//! missing fixture degrades to an error log and no rows; the suite
//! decides what an empty fixture means.

use std::{collections::HashMap, path::Path};

use calamine::{Reader, open_workbook_auto};
use tracing::error;

pub fn rows(path: impl AsRef<Path>, sheet: &str) -> Vec<HashMap<String, String>> {
    let path = path.as_ref();

    let mut workbook = match open_workbook_auto(path) {
        Ok(workbook) => workbook,
        Err(e) => {
            error!("failed to open fixture {}: {e}", path.display());
            return Vec::new();
        }
    };

    let range = match workbook.worksheet_range(sheet) {
        Ok(range) => range,
        Err(e) => {
            error!(
                "failed to read sheet '{sheet}' from {}: {e}",
                path.display()
            );
            return Vec::new();
        }
    };

    let mut data_rows = range.rows();
    let Some(header_row) = data_rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

    data_rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(column, header)| {
                    let value = row.get(column).map(|cell| cell.to_string()).unwrap_or_default();
                    (header.clone(), value)
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fixture_yields_no_rows() {
        let loaded = rows("/nonexistent/fixtures.xlsx", "LoginData");
        assert!(loaded.is_empty());
    }

    #[test]
    fn non_spreadsheet_file_yields_no_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fixtures.xlsx");
        std::fs::write(&path, "not a workbook").expect("write");

        let loaded = rows(&path, "LoginData");
        assert!(loaded.is_empty());
    }
}
