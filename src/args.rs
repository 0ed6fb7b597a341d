use clap::Parser;
use std::path::PathBuf;

/// Keep a ledger of sales, import quarterly sales files and report totals.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to a YAML config file
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the master file, the import log and the files to import.
    /// Overrides the directory from the config file.
    #[clap(short, long)]
    pub data_dir: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
