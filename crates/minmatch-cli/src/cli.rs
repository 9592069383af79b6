use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "MinMatch CLI - match conformer minima across quantum-chemistry result files and compare relative energies and optimization timings.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match every file's conformer minima against the reference file and
    /// report relative energies, RMS errors, and time ratios.
    Compare(CompareArgs),
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Input list file: one "level-of-theory, file.sdf" pair per line, the
    /// reference file first. Lines starting with '#' are comments.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory for the per-molecule report files and the summary table.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional TOML settings file (match threshold, automorphism cap).
    #[arg(short, long, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Override the RMSD match threshold in Angstroms.
    #[arg(short = 't', long, value_name = "ANGSTROMS")]
    pub threshold: Option<f64>,

    /// Reuse the match snapshot instead of re-running the matching stage.
    #[arg(long)]
    pub use_cache: bool,

    /// Location of the match snapshot.
    /// Defaults to 'match.bin' inside the output directory.
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// Print the summary table only; skip writing per-molecule report files.
    #[arg(long)]
    pub summary_only: bool,
}
