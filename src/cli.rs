use crate::config::Config;
use crate::error::Result;
use crate::loader::WorkbookSource;
use crate::logging;
use care_gap_common::{ErrorKind, ErrorRecord};
use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "care-gap-metrics", version)]
#[command(about = "Care Gap列を分類して指標ごとの件数をJSONで出力", long_about = None)]
pub struct Cli {
    /// Excelファイルのパス
    #[arg(allow_hyphen_values = true)]
    pub file_path: PathBuf,

    /// 結果にそのまま入れる日付
    #[arg(allow_hyphen_values = true)]
    pub date: String,

    /// 詳細ログを出力
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 標準出力に書く結果JSON
    Success(String),
    /// 標準エラーに書くエラーJSON
    Failure(String),
    /// 標準出力に書くヘルプ・バージョン表示
    Info(String),
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success(_) | Outcome::Info(_) => 0,
            Outcome::Failure(_) => 1,
        }
    }
}

/// 引数を解析して実行する
///
/// `--help` / `--version` は表示内容を `Outcome::Info` で返す。
pub fn run<I, T>(args: I) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = escape_positionals(args.into_iter().map(Into::into).collect());

    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) => {
            return Outcome::Info(e.render().to_string())
        }
        Err(e) => return Outcome::Failure(failure_json(&e.to_string())),
    };

    match execute(&cli) {
        Ok(json) => Outcome::Success(json),
        Err(err) => {
            tracing::debug!(error = %err, "cli run failed");
            Outcome::Failure(failure_json(&err.to_string()))
        }
    }
}

fn execute(cli: &Cli) -> Result<String> {
    let config = Config::load()?;
    let level = if cli.verbose {
        logging::VERBOSE_LEVEL
    } else {
        config.log_level.as_str()
    };
    logging::init_logging(level);

    let source = WorkbookSource::Path(cli.file_path.clone());
    let result = crate::read_metrics(&source, &cli.date)?;

    let json = if config.pretty_output {
        result.to_json_pretty()?
    } else {
        result.to_json()?
    };
    Ok(json)
}

/// 引数がちょうど2つなら、`-v` や `--` も含めてパスと日付として扱う
///
/// 先頭が `-` で始まる場合は通常のオプション解析に任せる。
fn escape_positionals(mut args: Vec<OsString>) -> Vec<OsString> {
    let first_is_option = args
        .get(1)
        .map(|a| a.to_string_lossy().starts_with('-'))
        .unwrap_or(true);

    if args.len() == 3 && !first_is_option {
        args.insert(1, OsString::from("--"));
    }
    args
}

/// CLIでは失敗の種類を区別しない
fn failure_json(message: &str) -> String {
    let record = ErrorRecord::new(message.trim(), ErrorKind::Processing);
    record.to_json().unwrap_or_else(|_| {
        r#"{"error":"unknown error","message":"Processing error"}"#.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_args() {
        let cli = Cli::try_parse_from(["care-gap-metrics", "gaps.xlsx", "2024-01"]).unwrap();
        assert_eq!(cli.file_path, PathBuf::from("gaps.xlsx"));
        assert_eq!(cli.date, "2024-01");
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_empty_date() {
        let cli = Cli::try_parse_from(["care-gap-metrics", "gaps.xlsx", ""]).unwrap();
        assert_eq!(cli.date, "");
    }

    #[test]
    fn test_missing_args_is_failure() {
        let outcome = run(["care-gap-metrics", "gaps.xlsx"]);
        assert_eq!(outcome.exit_code(), 1);
        match outcome {
            Outcome::Failure(json) => {
                let record: ErrorRecord = serde_json::from_str(&json).unwrap();
                assert_eq!(record.message, "Processing error");
            }
            other => panic!("expected failure: {:?}", other),
        }
    }

    #[test]
    fn test_hyphen_dates_are_positional() {
        for date in ["-1", "--", "-v", "--verbose"] {
            let args = escape_positionals(vec!["care-gap-metrics".into(), "gaps.xlsx".into(), date.into()]);
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.date, date);
            assert!(!cli.verbose);
        }
    }

    #[test]
    fn test_verbose_with_hyphen_date() {
        let cli = Cli::try_parse_from(["care-gap-metrics", "-v", "gaps.xlsx", "-1"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.date, "-1");
    }

    #[test]
    fn test_help_is_info_outcome() {
        let outcome = run(["care-gap-metrics", "--help"]);
        assert_eq!(outcome.exit_code(), 0);
        match outcome {
            Outcome::Info(text) => assert!(text.contains("care-gap-metrics")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_failure() {
        let outcome = run(["care-gap-metrics", "/nonexistent/care_gaps.xlsx", "2024-01"]);
        assert_eq!(outcome.exit_code(), 1);
        assert!(matches!(outcome, Outcome::Failure(_)));
    }
}
