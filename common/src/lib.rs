//! Care Gap Metrics Common Library
//!
//! CLIとハンドラで共有される型と分類ロジック（I/Oなし）

pub mod category;
pub mod classifier;
pub mod error;
pub mod table;
pub mod types;

pub use category::{categories_for, Category};
pub use classifier::{classify, classify_column, REQUIRED_COLUMN};
pub use error::{Error, Result};
pub use table::{Cell, Table, MISSING_TEXT};
pub use types::{ErrorKind, ErrorRecord, MetricCounts, MetricsResult};
