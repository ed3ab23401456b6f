//! リクエスト/レスポンス形式のハンドラ
//!
//! 入力イベント:
//! ```json
//! { "excel_file": "<base64>", "date_param": "2024-01", "is_base64": true }
//! ```
//!
//! 出力は `{ "statusCode": 200, "body": "<JSON文字列>" }` 形式。
//! - 200: 集計結果
//! - 400: 入力不正・必須列なし
//! - 500: 読み込み失敗・想定外のエラー

use crate::error::{CareGapError, Result};
use crate::loader::WorkbookSource;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use care_gap_common::MetricsResult;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

pub const MISSING_EXCEL_FILE: &str = "Missing excel_file parameter";

/// Excelファイルの中身
///
/// JSON文字列（base64またはパス）かバイト配列のどちらか。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExcelPayload {
    Text(String),
    Bytes(Vec<u8>),
}

impl ExcelPayload {
    pub fn is_empty(&self) -> bool {
        match self {
            ExcelPayload::Text(s) => s.is_empty(),
            ExcelPayload::Bytes(b) => b.is_empty(),
        }
    }
}

/// 入力イベント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerEvent {
    #[serde(default)]
    pub excel_file: Option<ExcelPayload>,

    #[serde(default)]
    pub date_param: Option<String>,

    /// 文字列の `excel_file` をbase64として扱うか（falseならパス）
    #[serde(default = "default_is_base64")]
    pub is_base64: bool,
}

fn default_is_base64() -> bool {
    true
}

impl Default for HandlerEvent {
    fn default() -> Self {
        Self {
            excel_file: None,
            date_param: None,
            is_base64: default_is_base64(),
        }
    }
}

impl HandlerEvent {
    /// base64エンコード済みのイベントを作成
    pub fn from_bytes(bytes: &[u8], date: impl Into<String>) -> Self {
        Self {
            excel_file: Some(ExcelPayload::Text(STANDARD.encode(bytes))),
            date_param: Some(date.into()),
            is_base64: true,
        }
    }

    pub fn date(&self) -> &str {
        self.date_param.as_deref().unwrap_or("")
    }
}

/// 応答エンベロープ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// JSON文字列のイベントを処理
pub fn handle_json(payload: &str) -> HandlerResponse {
    match serde_json::from_str::<HandlerEvent>(payload) {
        Ok(event) => handle(&event),
        Err(e) => error_response(&CareGapError::InvalidEvent(e)),
    }
}

/// イベントを処理して応答を返す
///
/// 失敗はすべてステータスコード付きの応答に変換される。
pub fn handle(event: &HandlerEvent) -> HandlerResponse {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| process_event(event)))
        .unwrap_or_else(|payload| Err(CareGapError::Unexpected(panic_message(payload.as_ref()))));

    let response = match outcome.and_then(|result| result.to_json().map_err(CareGapError::from)) {
        Ok(body) => HandlerResponse::new(200, body),
        Err(err) => error_response(&err),
    };

    tracing::debug!(status = response.status_code, "handler response");
    response
}

fn process_event(event: &HandlerEvent) -> Result<MetricsResult> {
    let source = resolve_source(event)?;
    crate::read_metrics(&source, event.date())
}

/// イベントから読み込み元を決定
///
/// - 文字列 + `is_base64` → base64デコードしたバイト列
/// - 文字列 + `!is_base64` → ファイルパス
/// - バイト配列 → そのまま
pub fn resolve_source(event: &HandlerEvent) -> Result<WorkbookSource> {
    match &event.excel_file {
        None => Err(CareGapError::MissingInput(MISSING_EXCEL_FILE.into())),
        Some(payload) if payload.is_empty() => {
            Err(CareGapError::MissingInput(MISSING_EXCEL_FILE.into()))
        }
        Some(ExcelPayload::Text(text)) if event.is_base64 => {
            // 改行などの空白は無視
            let compact: String = text.split_whitespace().collect();
            Ok(WorkbookSource::Bytes(STANDARD.decode(compact)?))
        }
        Some(ExcelPayload::Text(path)) => Ok(WorkbookSource::Path(PathBuf::from(path))),
        Some(ExcelPayload::Bytes(bytes)) => Ok(WorkbookSource::Bytes(bytes.clone())),
    }
}

fn error_response(err: &CareGapError) -> HandlerResponse {
    let status = err.kind().status_code();
    tracing::debug!(status, error = %err, "handler failed");

    let body = crate::error_record(err).to_json().unwrap_or_else(|_| {
        r#"{"error":"unknown error","message":"Processing error"}"#.to_string()
    });
    HandlerResponse::new(status, body)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic while processing request".to_string()
    }
}
