//! ハンドラのローカル実行
//!
//! 標準入力（または第1引数のファイル）からイベントJSONを読み、
//! 応答エンベロープを標準出力に書く。ステータスはエンベロープ側で返す。

use care_gap_metrics::config::Config;
use care_gap_metrics::{handler, logging, ErrorKind, ErrorRecord};
use std::ffi::OsString;
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    let level = Config::load()
        .map(|c| c.log_level)
        .unwrap_or_else(|_| logging::DEFAULT_LEVEL.to_string());
    logging::init_logging(&level);

    let payload = match read_payload(std::env::args_os().nth(1)) {
        Ok(payload) => payload,
        Err(e) => return fail(&e.to_string()),
    };

    let response = handler::handle_json(&payload);
    match response.to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e.to_string()),
    }
}

fn read_payload(path: Option<OsString>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn fail(message: &str) -> ExitCode {
    if let Ok(json) = ErrorRecord::new(message, ErrorKind::Processing).to_json() {
        eprintln!("{}", json);
    }
    ExitCode::from(1)
}
