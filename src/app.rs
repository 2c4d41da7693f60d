//! Application orchestrator.
//! Initializes logging, builds the copy request, runs it and maps the result to an exit status.

use std::process::ExitCode;
use tracing::{debug, error, info};

use blockcp::cli::Args;
use blockcp::output as out;
use blockcp::{copy_entry, ConsoleReporter, CopyReport, LogLevel, Reporter};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    let mut level = args.effective_log_level().unwrap_or_default();
    if level == LogLevel::Quiet && args.log_file.is_some() {
        // An explicit log file with logging switched off would stay empty.
        level = LogLevel::Normal;
    }

    // Hold the guard until we return so the file appender flushes.
    let _guard = match init_tracing(&level, args.log_file.as_deref(), args.json) {
        Ok(guard) => guard,
        Err(e) => {
            out::print_warn(&format!("Failed to initialize logging: {e}"));
            None
        }
    };

    let request = args.to_request();
    let mut reporter = ConsoleReporter::from_env();
    debug!(?request, program = reporter.program(), "starting blockcp");

    match copy_entry(&request, &mut reporter) {
        Ok(CopyReport::File { destination, stats }) => {
            info!(
                source = %request.source().display(),
                dest = %destination.display(),
                bytes = stats.bytes_written,
                holes = stats.holes,
                write_errors = stats.write_errors,
                "Copy completed"
            );
            ExitCode::SUCCESS
        }
        Ok(CopyReport::Tree {
            destination,
            summary,
        }) => {
            info!(
                source = %request.source().display(),
                dest = %destination.display(),
                copied = summary.copied,
                failed = summary.failed,
                "Tree copy completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = e.code(), path = %e.path().display(), error = %e, "Copy failed");
            reporter.error(&e);
            ExitCode::from(1)
        }
    }
}
