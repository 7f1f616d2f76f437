use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// SVG files, or folders to take every `.svg` file from
    #[arg(short, long, value_name = "FILE|FOLDER", num_args = 1.., required = true)]
    pub input: Vec<PathBuf>,
    #[arg(short, long, value_name = "FOLDER")]
    pub output_folder: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    /// Overrides the seed of the config file
    #[arg(long)]
    pub seed: Option<u64>,
}
