//! Command-line surface for the `publog` binary.

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "publog",
    about = "Offline lookup of National Stock Numbers, part numbers and CAGE codes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the extracted PUB LOG files
    #[arg(long, global = true, env = "PUBLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to the global publog/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output on stdout for scripts and agents
    #[arg(long, global = true, env = "PUBLOG_ROBOT")]
    pub robot: bool,

    /// Tab-separated output without styling
    #[arg(long, global = true, conflicts_with = "robot")]
    pub plain: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.robot {
            OutputFormat::Json
        } else if self.plain {
            OutputFormat::Plain
        } else {
            OutputFormat::Human
        }
    }
}
