use chatwire::cli::Cli;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    chatwire::cli::run(Cli::parse()).await
}
