use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "vobdiff",
    about = "Generate review-ready unified diffs from a branched view",
    version,
)]
pub struct Cli {
    /// Diff all versions committed on this branch instead of the local
    /// checkouts.
    #[arg(long, value_name = "BRANCH")]
    pub track_branch: Option<String>,

    /// Exclude files whose path matches this regular expression.
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Subtract merge-introduced content before diffing (branch mode).
    #[arg(short = 'x', long)]
    pub exclude_merge: bool,

    /// Write the diff to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}
