//! Care Gap列の分類・集計
//!
//! 1. 必須列の存在確認
//! 2. 各行のセルを文字列化
//! 3. カテゴリごとに独立して該当行を数える
//!
//! 1行が複数カテゴリに該当した場合は、それぞれのカテゴリで数える。

use crate::category::Category;
use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use crate::types::MetricCounts;

/// 分類対象の列名
pub const REQUIRED_COLUMN: &str = "Care Gap";

/// `Care Gap` 列を分類して件数を返す
pub fn classify(table: &Table) -> Result<MetricCounts> {
    classify_column(table, REQUIRED_COLUMN)
}

/// 指定列を分類して件数を返す
///
/// # Arguments
/// * `table` - 読み込んだ表
/// * `column` - 分類対象の列名
///
/// # Returns
/// * `Err(Error::MissingColumn)` - 列が存在しない場合
pub fn classify_column(table: &Table, column: &str) -> Result<MetricCounts> {
    let cells = table
        .column(column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;

    let texts: Vec<String> = cells.map(Cell::to_text).collect();

    let mut counts = MetricCounts::default();
    for category in Category::ALL {
        for text in &texts {
            if category.is_match(text) {
                counts.increment(category);
            }
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn care_gap_table(values: &[&str]) -> Table {
        let rows = values
            .iter()
            .map(|v| vec![Cell::String(format!("P{}", v.len())), Cell::String((*v).to_string())])
            .collect();
        Table::new(vec!["Patient".into(), REQUIRED_COLUMN.into()], rows)
    }

    #[test]
    fn test_classify_basic_scenario() {
        let table = care_gap_table(&[
            "Hemoglobin A1C due",
            "BP check",
            "unrelated",
            "Colorectal screening due",
        ]);
        let counts = classify(&table).unwrap();
        assert_eq!(
            counts,
            MetricCounts {
                diabetes: 1,
                blood_pressure: 1,
                breast_cancer: 0,
                colorectal_cancer: 1,
            }
        );
    }

    #[test]
    fn test_classify_overlapping_row() {
        let table = care_gap_table(&["A1C and Blood Pressure", "Breast Cancer"]);
        let counts = classify(&table).unwrap();
        assert_eq!(counts.diabetes, 1);
        assert_eq!(counts.blood_pressure, 1);
        assert_eq!(counts.breast_cancer, 1);
        assert_eq!(counts.colorectal_cancer, 0);
    }

    #[test]
    fn test_classify_misspelled_variant() {
        let table = care_gap_table(&["Controlling Blodd Pressure overdue"]);
        let counts = classify(&table).unwrap();
        assert_eq!(counts.blood_pressure, 1);
    }

    #[test]
    fn test_classify_missing_column() {
        let table = Table::new(
            vec!["Patient".into(), "Gap".into()],
            vec![vec![Cell::String("A".into()), Cell::String("A1C".into())]],
        );
        let err = classify(&table).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref c) if c == "Care Gap"));
        assert!(err.to_string().contains("Care Gap"));
    }

    #[test]
    fn test_classify_blank_and_numeric_cells() {
        let table = Table::new(
            vec![REQUIRED_COLUMN.into()],
            vec![
                vec![Cell::Empty],
                vec![Cell::Float(1.0)],
                vec![Cell::Bool(true)],
                vec![],
            ],
        );
        let counts = classify(&table).unwrap();
        assert_eq!(counts, MetricCounts::default());
    }

    #[test]
    fn test_classify_empty_table() {
        let table = Table::new(vec![REQUIRED_COLUMN.into()], vec![]);
        assert_eq!(classify(&table).unwrap(), MetricCounts::default());
    }

    #[test]
    fn test_counts_bounded_by_row_count() {
        let table = care_gap_table(&[
            "A1C BP Breast Cancer Colorectal",
            "a1c bp breast cancer colorectal",
            "Hemoglobin A1c",
        ]);
        let counts = classify(&table).unwrap();
        for category in Category::ALL {
            assert!(counts.get(category) <= table.row_count());
        }
        assert_eq!(counts.diabetes, 3);
        assert_eq!(counts.colorectal_cancer, 2);
    }

    #[test]
    fn test_classify_custom_column() {
        let table = Table::new(
            vec!["Notes".into()],
            vec![vec![Cell::String("Breast Cancer".into())]],
        );
        let counts = classify_column(&table, "Notes").unwrap();
        assert_eq!(counts.breast_cancer, 1);
    }
}
