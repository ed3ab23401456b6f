//! ログ初期化
//!
//! 出力先は標準エラー。標準出力は結果JSON専用。

use tracing_subscriber::EnvFilter;

/// 不正なフィルタ指定時のレベル
pub const DEFAULT_LEVEL: &str = "warn";

/// `-v` 指定時のレベル
pub const VERBOSE_LEVEL: &str = "debug";

/// tracingのサブスクライバを設定する
///
/// 2回目以降の呼び出しは何もしない。
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging("debug");
        init_logging("not a [valid filter");
    }
}
