//! Excel読み込み
//!
//! ファイルパスまたはバイト列から先頭シートを読み込み、`Table` に変換する。
//! 形式は内容から自動判定（xlsx / xlsm / xlsb / xls / ods）。

use crate::error::{CareGapError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use care_gap_common::{Cell, Table};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 読み込み元
#[derive(Debug, Clone)]
pub enum WorkbookSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl WorkbookSource {
    /// ログ表示用の説明
    pub fn describe(&self) -> String {
        match self {
            WorkbookSource::Path(path) => path.display().to_string(),
            WorkbookSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

/// 読み込み元から表を作成
pub fn load_table(source: &WorkbookSource) -> Result<Table> {
    match source {
        WorkbookSource::Path(path) => load_table_from_path(path),
        WorkbookSource::Bytes(bytes) => load_table_from_bytes(bytes),
    }
}

/// ファイルパスから表を作成
pub fn load_table_from_path(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), size = bytes.len(), "read workbook file");
    load_table_from_bytes(&bytes)
}

/// バイト列から表を作成
pub fn load_table_from_bytes(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(CareGapError::NoWorksheet)??;

    let mut rows = range.rows();

    // 先頭行をヘッダーとする
    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .enumerate()
            .map(|(i, data)| header_name(i, data))
            .collect(),
        None => Vec::new(),
    };

    warn_duplicate_columns(&columns);

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    tracing::debug!(
        sheet = %sheet_name,
        rows = rows.len(),
        columns = columns.len(),
        "loaded worksheet"
    );

    Ok(Table::new(columns, rows))
}

fn header_name(index: usize, data: &Data) -> String {
    match to_cell(data) {
        Cell::Empty => format!("Unnamed: {}", index),
        cell => cell.to_text(),
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::String(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Error(e.to_string()),
        other => Cell::DateTime(other.to_string()),
    }
}

fn warn_duplicate_columns(columns: &[String]) {
    let mut seen = HashSet::new();
    for name in columns {
        if !seen.insert(name.as_str()) {
            tracing::warn!(column = %name, "duplicate column header, first occurrence is used");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cell_conversion() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::String("A1C".into())), Cell::String("A1C".into()));
        assert_eq!(to_cell(&Data::Int(3)), Cell::Int(3));
        assert_eq!(to_cell(&Data::Float(2.5)), Cell::Float(2.5));
        assert_eq!(to_cell(&Data::Bool(false)), Cell::Bool(false));
    }

    #[test]
    fn test_header_name_blank() {
        assert_eq!(header_name(2, &Data::Empty), "Unnamed: 2");
        assert_eq!(header_name(0, &Data::String("Care Gap".into())), "Care Gap");
    }

    #[test]
    fn test_load_invalid_bytes() {
        let result = load_table_from_bytes(b"not a spreadsheet");
        assert!(matches!(result, Err(CareGapError::Workbook(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_table_from_path(Path::new("/nonexistent/path/care_gaps.xlsx"));
        assert!(matches!(result, Err(CareGapError::Io(_))));
    }

    #[test]
    fn test_describe_bytes_source() {
        let source = WorkbookSource::Bytes(vec![0; 4]);
        assert_eq!(source.describe(), "<4 bytes>");
    }
}
