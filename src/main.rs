//! # pixi
//!
//! Command-line tool for inspecting and generating pixi files.
//!
//! ## Usage
//!
//! ```bash
//! # Show header, tags and layer geometry
//! pixi info terrain.pixi
//!
//! # Write a two-layer demo file
//! pixi demo demo.pixi --compression deflate --separated
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
