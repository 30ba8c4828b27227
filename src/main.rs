use clap::Parser;
use imgpaste_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    imgpaste_lib::run(Cli::parse()).await
}
