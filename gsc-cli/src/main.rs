//! GSC CLI - command line tool for exporting Search Console data.

use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(
    name = "gsc-cli",
    version,
    about = "Google Search Console export toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: gsc_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Progress lines go through log at info level; show them unless the
    // operator narrows RUST_LOG.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    gsc_cmd::run(cli.command).await
}
