//! 表データの型定義
//!
//! シートの先頭行をヘッダーとし、以降の行をセルの並びとして保持する。
//! すべての行は列数と同じ長さに揃えられる。

use std::fmt;

/// 欠損セルの文字列表現
///
/// どの分類パターンにも一致しない固定文字列。
pub const MISSING_TEXT: &str = "nan";

/// セル値
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// 日時（表示用文字列）
    DateTime(String),
    /// セルエラー（#DIV/0! など）
    Error(String),
}

impl Cell {
    /// 分類に使う文字列表現へ変換
    ///
    /// 空セルは `nan` になり、空文字列として扱われることはない。
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => MISSING_TEXT.to_string(),
            Cell::String(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::DateTime(s) | Cell::Error(s) => s.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// 浮動小数点を小数部付きで表示（1 → "1.0"）
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return MISSING_TEXT.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    format!("{:?}", value)
}

/// ヘッダー付きの表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// 表を作成する
    ///
    /// 列数より短い行は `Cell::Empty` で埋め、長い行は切り詰める。
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 列名から列番号を取得（重複時は最初の列）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// 指定列のセルを行順に返す
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Cell> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }
}
