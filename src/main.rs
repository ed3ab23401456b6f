use care_gap_metrics::cli::{self, Outcome};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let outcome = cli::run(std::env::args_os());

    match &outcome {
        Outcome::Success(text) | Outcome::Info(text) => {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", text.trim_end());
        }
        Outcome::Failure(json) => {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", json);
        }
    }

    ExitCode::from(outcome.exit_code())
}
