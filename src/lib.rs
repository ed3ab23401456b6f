//! Care Gap Metrics
//!
//! Excelの `Care Gap` 列を4つの臨床指標に分類し、件数と日付を出力する。
//! CLIとハンドラの2つの入口は `read_metrics` を共有する。

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod loader;
pub mod logging;

pub use care_gap_common::{Category, ErrorKind, ErrorRecord, MetricCounts, MetricsResult};
pub use error::{CareGapError, Result};
pub use loader::WorkbookSource;

/// 読み込み → 分類 → 集計結果の作成
///
/// # Arguments
/// * `source` - Excelの読み込み元
/// * `date` - 結果にそのまま入れる日付文字列
pub fn read_metrics(source: &WorkbookSource, date: &str) -> Result<MetricsResult> {
    let table = loader::load_table(source)?;
    let counts = care_gap_common::classify(&table)?;

    tracing::debug!(
        source = %source.describe(),
        rows = table.row_count(),
        diabetes = counts.diabetes,
        blood_pressure = counts.blood_pressure,
        breast_cancer = counts.breast_cancer,
        colorectal_cancer = counts.colorectal_cancer,
        "classified care gaps"
    );

    Ok(MetricsResult::new(counts, date))
}

/// 失敗を出力用のレコードに変換
pub fn error_record(err: &CareGapError) -> ErrorRecord {
    ErrorRecord::new(err.to_string(), err.kind())
}
