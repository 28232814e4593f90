//! NDVIPRO CLI entrypoint.
//!
//! Thin wrapper over the `cli` module: parse args, run one acquisition, and
//! exit with appropriate status. For programmatic use, prefer `ndvipro::api`.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
