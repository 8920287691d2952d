use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pixi::compression::Compression;

mod config;
mod demo;
mod info;

/// pixi - Tiled multi-dimensional array files
#[derive(Parser)]
#[command(name = "pixi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Tile compression for generated layers.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CompressionArg {
    /// Store tiles uncompressed
    None,
    /// Deflate every tile
    #[default]
    Deflate,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => Compression::None,
            CompressionArg::Deflate => Compression::Deflate,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a small two-layer demo file
    Demo {
        /// Output pixi file path
        #[arg(value_name = "OUTPUT", default_value = "demo.pixi")]
        output: PathBuf,

        /// Tile compression (none, deflate)
        #[arg(short = 'c', long, default_value = "deflate", value_enum)]
        compression: CompressionArg,

        /// Store each field in its own run of tiles
        #[arg(long)]
        separated: bool,

        /// Load writer settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display information about a pixi file
    Info {
        /// Input pixi file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            output,
            compression,
            separated,
            config,
        } => demo::run(output, Compression::from(compression), separated, config),
        Commands::Info { file } => info::run(file),
    }
}
