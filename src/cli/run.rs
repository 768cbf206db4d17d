use crate::cli::args::{Cli, Commands, ExonSkippingArgs, HistogramArgs, ReadStatsArgs};
use crate::core::series;
use crate::core::workflow::{self, WorkflowConfig};
use crate::plot;
use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::ExonSkipping(args) => exon_skipping(args),
        Commands::FragmentLengths(args) => histogram(
            args,
            "frLengths.csv",
            "fragment_distribution_plot.png",
            "Fragment Lengths Distribution",
            "Fragment lengths",
        ),
        Commands::MutationPositions(args) => histogram(
            args,
            "mutationPosition.csv",
            "mutation_position_plot.png",
            "Mutation Position Distribution",
            "Position in read",
        ),
        Commands::MutationCounts(args) => histogram(
            args,
            "mutations.csv",
            "mutation_distribution_plot.png",
            "Number of mutations per read pair",
            "Number of mutations",
        ),
        Commands::ReadStats(args) => read_stats(args),
    }
}

fn exon_skipping(args: ExonSkippingArgs) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output dir {}", args.out.display()))?;

    let config = WorkflowConfig::exon_skipping(&args.data_dir, &args.out);
    workflow::run(&config)?;

    if stats {
        eprintln!("SPLICE_PLOTS_STATS output_dir={}", args.out.display());
        eprintln!("SPLICE_PLOTS_STATS total={}", fmt_dur(t0.elapsed()));
    }
    Ok(())
}

fn histogram(
    args: HistogramArgs,
    default_name: &str,
    out_name: &str,
    title: &str,
    x_label: &str,
) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    let input = args
        .input
        .unwrap_or_else(|| PathBuf::from("data").join(default_name));
    let values = series::load_single_series(&input)?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output dir {}", args.out.display()))?;
    let out_path = args.out.join(out_name);
    plot::histogram::render(&values, title, x_label, &out_path)
        .with_context(|| format!("failed to render {}", out_path.display()))?;

    if stats {
        eprintln!(
            "SPLICE_PLOTS_STATS input={} values={}",
            input.display(),
            values.len()
        );
        eprintln!("SPLICE_PLOTS_STATS total={}", fmt_dur(t0.elapsed()));
    }
    Ok(())
}

fn read_stats(args: ReadStatsArgs) -> Result<()> {
    let counts = match parse_read_counts(&args.counts) {
        Ok(counts) => counts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!(
                "usage: splice-plots read-stats <all> <non-split> <non-split-no-mismatch> \
                 <split> <split-no-mismatch> <split-no-mismatch-5bp>"
            );
            std::process::exit(1);
        }
    };

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output dir {}", args.out.display()))?;
    let out_path = args.out.join("bar_plot_read_statistics.png");
    plot::bars::render(&counts, &out_path)
        .with_context(|| format!("failed to render {}", out_path.display()))?;
    Ok(())
}

/// Hand-rolled validation so wrong count and non-integer tokens share the same
/// usage-and-exit-1 path (clap's own error path exits with status 2).
fn parse_read_counts(raw: &[String]) -> std::result::Result<[u64; 6], String> {
    if raw.len() != 6 {
        return Err(format!("expected 6 read counts, got {}", raw.len()));
    }
    let mut counts = [0u64; 6];
    for (slot, token) in counts.iter_mut().zip(raw) {
        *slot = token
            .parse()
            .map_err(|_| format!("not an integer: {token:?}"))?;
    }
    Ok(counts)
}

fn stats_enabled() -> bool {
    matches!(env::var("SPLICE_PLOTS_STATS").as_deref(), Ok("1"))
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
