use anyhow::Result;
use clap::Parser;

mod platform;

fn main() -> Result<()> {
    let args = platform::cli::Args::parse();
    platform::run_app(args)
}
