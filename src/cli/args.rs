use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "splice-plots",
    version,
    about = "Static plots for read-simulation and exon-skipping statistics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cumulative, summary-table and violin charts for the exon-skipping datasets
    ExonSkipping(ExonSkippingArgs),
    /// Histogram of simulated fragment lengths
    FragmentLengths(HistogramArgs),
    /// Histogram of mutation positions along the simulated reads
    MutationPositions(HistogramArgs),
    /// Histogram of mutation counts per read pair
    MutationCounts(HistogramArgs),
    /// Bar chart of read-type counts (six positional integers)
    ReadStats(ReadStatsArgs),
}

#[derive(Parser)]
pub struct ExonSkippingArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, default_value = "plots")]
    pub out: PathBuf,
}

#[derive(Parser)]
pub struct HistogramArgs {
    /// Input CSV; defaults to the fixed per-subcommand path under data/
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, default_value = "plots")]
    pub out: PathBuf,
}

#[derive(Parser)]
pub struct ReadStatsArgs {
    /// all / non-split / non-split no-mismatch / split / split no-mismatch /
    /// split no-mismatch >=5bp regions
    pub counts: Vec<String>,

    #[arg(long, default_value = "plots")]
    pub out: PathBuf,
}
