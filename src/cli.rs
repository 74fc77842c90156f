use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "simplesearch",
    about = "Interactive keyword search over a directory of text files"
)]
pub struct Cli {
    /// Directory whose .txt files are indexed (or SIMPLESEARCH_ROOT)
    pub root: Option<PathBuf>,

    /// Maximum number of files read concurrently while loading
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Number of results shown by :search
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,

    /// Print responses as JSON, one object per line
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
