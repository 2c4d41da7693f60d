use std::process::ExitCode;

use clap::error::ErrorKind;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = match blockcp::cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help/version go to stdout and succeed; every other parse failure exits 1.
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };
    app::run(args)
}
