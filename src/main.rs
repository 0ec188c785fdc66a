//! mr-sweep binary

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    cli::run(cli).await.context("mr-sweep task failed")
}
