//! 集計結果の型定義
//!
//! CLIとハンドラで共有される型:
//! - MetricCounts: カテゴリ別の該当行数
//! - MetricsResult: 最終出力（件数 + 日付）
//! - ErrorRecord: 失敗時の出力

use crate::category::Category;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// カテゴリ別の該当行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricCounts {
    pub diabetes: usize,
    pub blood_pressure: usize,
    pub breast_cancer: usize,
    pub colorectal_cancer: usize,
}

impl MetricCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Diabetes => self.diabetes,
            Category::BloodPressure => self.blood_pressure,
            Category::BreastCancer => self.breast_cancer,
            Category::ColorectalCancer => self.colorectal_cancer,
        }
    }

    pub fn increment(&mut self, category: Category) {
        let slot = match category {
            Category::Diabetes => &mut self.diabetes,
            Category::BloodPressure => &mut self.blood_pressure,
            Category::BreastCancer => &mut self.breast_cancer,
            Category::ColorectalCancer => &mut self.colorectal_cancer,
        };
        *slot += 1;
    }
}

/// 集計結果
///
/// JSONでは `diabetes`, `blood_pressure`, `breast_cancer`,
/// `colorectal_cancer`, `date` の5キーになる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsResult {
    #[serde(flatten)]
    pub counts: MetricCounts,

    /// 呼び出し元が渡した日付（検証・変換しない）
    pub date: String,
}

impl MetricsResult {
    pub fn new(counts: MetricCounts, date: impl Into<String>) -> Self {
        Self {
            counts,
            date: date.into(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// エラー分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 入力・スキーマ不正
    Validation,
    /// 読み込み失敗・想定外のエラー
    Processing,
}

impl ErrorKind {
    /// `message` フィールドに入るラベル
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation error",
            ErrorKind::Processing => "Processing error",
        }
    }

    /// ハンドラ応答のステータスコード
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Processing => 500,
        }
    }
}

/// 失敗時の出力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            error: error.into(),
            message: kind.label().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
