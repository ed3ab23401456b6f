//! 指標カテゴリと判定パターン
//!
//! カテゴリは4種類で固定。各カテゴリは語句の候補リストを持ち、
//! いずれかを大文字小文字を区別せず部分一致すれば該当とみなす。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 臨床指標カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Diabetes,
    BloodPressure,
    BreastCancer,
    ColorectalCancer,
}

const DIABETES_PHRASES: &[&str] = &["Hemoglobin A1C", "A1C", "Hemoglobin A1c"];

// "Blodd" は元データに実在する誤記
const BLOOD_PRESSURE_PHRASES: &[&str] = &[
    "Blood Pressure",
    "Controlling Blodd Pressure",
    "Controlling Blood Pressure",
    "BP",
];

const BREAST_CANCER_PHRASES: &[&str] = &["Breast Cancer"];

const COLORECTAL_CANCER_PHRASES: &[&str] = &["Colorectal Cancer", "Colorectal"];

impl Category {
    /// 出力順に並べた全カテゴリ
    pub const ALL: [Category; 4] = [
        Category::Diabetes,
        Category::BloodPressure,
        Category::BreastCancer,
        Category::ColorectalCancer,
    ];

    /// 出力キー名
    pub fn name(self) -> &'static str {
        match self {
            Category::Diabetes => "diabetes",
            Category::BloodPressure => "blood_pressure",
            Category::BreastCancer => "breast_cancer",
            Category::ColorectalCancer => "colorectal_cancer",
        }
    }

    /// 判定に使う語句の候補
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            Category::Diabetes => DIABETES_PHRASES,
            Category::BloodPressure => BLOOD_PRESSURE_PHRASES,
            Category::BreastCancer => BREAST_CANCER_PHRASES,
            Category::ColorectalCancer => COLORECTAL_CANCER_PHRASES,
        }
    }

    /// テキストがこのカテゴリに該当するか判定
    pub fn is_match(self, text: &str) -> bool {
        lazy_static::lazy_static! {
            static ref DIABETES_RE: Regex = build_pattern(DIABETES_PHRASES);
            static ref BLOOD_PRESSURE_RE: Regex = build_pattern(BLOOD_PRESSURE_PHRASES);
            static ref BREAST_CANCER_RE: Regex = build_pattern(BREAST_CANCER_PHRASES);
            static ref COLORECTAL_CANCER_RE: Regex = build_pattern(COLORECTAL_CANCER_PHRASES);
        }

        match self {
            Category::Diabetes => DIABETES_RE.is_match(text),
            Category::BloodPressure => BLOOD_PRESSURE_RE.is_match(text),
            Category::BreastCancer => BREAST_CANCER_RE.is_match(text),
            Category::ColorectalCancer => COLORECTAL_CANCER_RE.is_match(text),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 語句リストから大文字小文字無視の選択パターンを組み立てる
///
/// 語句はエスケープされ、リテラルとして扱われる。
fn build_pattern(phrases: &[&str]) -> Regex {
    let alternatives: Vec<String> = phrases.iter().map(|p| regex::escape(p)).collect();
    Regex::new(&format!("(?i){}", alternatives.join("|"))).unwrap()
}

/// テキストが該当するカテゴリをすべて返す
pub fn categories_for(text: &str) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| c.is_match(text))
        .collect()
}
