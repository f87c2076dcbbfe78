//! Binary crate for the `cep-weather` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading the env file and logging setup
//! - Binding the listener and serving the core router

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
