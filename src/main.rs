use anyhow::Result;
use clap::Parser;
use rutils::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
