use care_gap_common::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareGapError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read Excel file: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Excel file contains no worksheet")]
    NoWorksheet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    MissingInput(String),

    #[error("Invalid base64 in excel_file: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid request payload: {0}")]
    InvalidEvent(serde_json::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error(transparent)]
    Common(#[from] care_gap_common::Error),
}

impl CareGapError {
    /// エラー分類（ハンドラのステータスコード決定に使用）
    pub fn kind(&self) -> ErrorKind {
        match self {
            CareGapError::MissingInput(_)
            | CareGapError::Base64(_)
            | CareGapError::InvalidEvent(_) => ErrorKind::Validation,
            CareGapError::Common(care_gap_common::Error::MissingColumn(_)) => ErrorKind::Validation,
            CareGapError::Common(care_gap_common::Error::Json(_)) => ErrorKind::Processing,
            CareGapError::Config(_)
            | CareGapError::Workbook(_)
            | CareGapError::NoWorksheet
            | CareGapError::Io(_)
            | CareGapError::Json(_)
            | CareGapError::Unexpected(_) => ErrorKind::Processing,
        }
    }
}

pub type Result<T> = std::result::Result<T, CareGapError>;
