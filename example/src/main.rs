use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    example::run(example::Cli::parse())
}
