use crate::error::{CareGapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// ログレベルを上書きする環境変数
pub const LOG_ENV_VAR: &str = "CARE_GAP_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// tracingのフィルタ指定（例: "warn", "care_gap_metrics=debug"）
    pub log_level: String,
    /// CLI出力を整形JSONにする
    pub pretty_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            pretty_output: false,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む（存在しなければデフォルト）
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env_override())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CareGapError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn config_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".config").join("care-gap-metrics").join("config.json"))
    }

    /// 環境変数を優先
    fn with_env_override(mut self) -> Self {
        if let Ok(level) = std::env::var(LOG_ENV_VAR) {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
        self
    }
}
