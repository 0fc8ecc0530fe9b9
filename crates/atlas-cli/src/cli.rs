//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use atlas_cli::config::Overrides;

#[derive(Parser)]
#[command(
    name = "pricing-atlas",
    version,
    about = "Align streaming prices with country economic indicators",
    long_about = "Clean a per-country streaming price export, reshape and merge \
                  World-Bank style indicator exports, and align country names \
                  so both tables join on an exact string match."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reshape, merge and normalize the indicator exports.
    Indicators(StageArgs),

    /// Clean the pricing export.
    Pricing(StageArgs),

    /// Rewrite cleaned indicator country names into the pricing convention.
    Align(StageArgs),

    /// Run pricing, indicators and align in sequence.
    Run(StageArgs),

    /// Print the built-in country-name tables.
    Aliases(AliasesArgs),
}

#[derive(Args, Clone)]
pub struct StageArgs {
    /// TOML file with paths, cutoff year and indicator list.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the source exports [env: PRICING_ATLAS_DATA_DIR].
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory for produced files (default: the data directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Drop indicator rows before this year.
    #[arg(long = "cutoff-year", value_name = "YEAR")]
    pub cutoff_year: Option<i32>,

    /// Transform and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl StageArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            output_dir: self.output_dir.clone(),
            cutoff_year: self.cutoff_year,
        }
    }
}

#[derive(Args)]
pub struct AliasesArgs {
    /// One `table<TAB>from<TAB>to` line per entry instead of a table.
    #[arg(long = "plain")]
    pub plain: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
