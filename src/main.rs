//! qq-like CLI entrypoint: runs the like command once from the terminal.

mod cli;

use std::io;
use std::process::ExitCode;

use qq_like::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    if !telemetry::init_tracing() {
        tracing::debug!("tracing subscriber already installed");
    }

    let outcome = cli::run().await;
    cli::exit_code(&outcome, &mut io::stderr().lock())
}
