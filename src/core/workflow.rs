use crate::core::series::{self, MeasurementSeries};
use crate::core::stats::{self, SeriesSummary};
use crate::plot;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One dataset of the exon-skipping workflow: where to read it from, the
/// chart wording, and where each of its three images goes.
pub struct DatasetConfig {
    pub input: PathBuf,
    pub cumulative_title: String,
    pub cumulative_x_label: String,
    pub table_title: String,
    pub violin_title: String,
    pub cumulative_out: PathBuf,
    pub table_out: PathBuf,
    pub violin_out: PathBuf,
    /// Explicit y ticks for the violin chart; None auto-scales.
    pub violin_y_ticks: Option<Vec<f64>>,
}

/// Everything the workflow needs, passed in explicitly. The label list is
/// the single source of truth for experiment order; the loaders check the
/// CSV line counts against it.
pub struct WorkflowConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetConfig>,
}

impl WorkflowConfig {
    /// The fixed exon-skipping configuration: two annotation releases, two
    /// datasets (skipped exon counts, skipped base counts), six images.
    pub fn exon_skipping(data_dir: &Path, out_dir: &Path) -> Self {
        let labels = vec![
            "Homo_sapiens.GRCh37.67".to_string(),
            "Homo_sapiens.GRCh37.75".to_string(),
        ];
        let exon_ticks: Vec<f64> = (0..=10).map(|i| 0.25 + 0.1 * i as f64).collect();
        let datasets = vec![
            DatasetConfig {
                input: data_dir.join("exons.csv"),
                cumulative_title: "Cumulative Distribution of Skipped Exons per ES-SE Event"
                    .to_string(),
                cumulative_x_label: "Skipped Exons".to_string(),
                table_title: "Statistics Summary for max skipping exon".to_string(),
                violin_title: "Violin Plot of max skipped Exons per GTF file".to_string(),
                cumulative_out: out_dir.join("cumulative_plot_exons.png"),
                table_out: out_dir.join("statistics_summary_by_exon.png"),
                violin_out: out_dir.join("box_plot_exons.png"),
                violin_y_ticks: Some(exon_ticks),
            },
            DatasetConfig {
                input: data_dir.join("bases.csv"),
                cumulative_title: "Cumulative Distribution of Skipped Bases per ES-SE Event"
                    .to_string(),
                cumulative_x_label: "Skipped Bases".to_string(),
                table_title: "Statistics Summary for max skipping bases".to_string(),
                violin_title: "Violin Plot of max skipped Bases per GTF file".to_string(),
                cumulative_out: out_dir.join("cumulative_plot_bases.png"),
                table_out: out_dir.join("statistics_summary_by_bases.png"),
                violin_out: out_dir.join("box_plot_bases.png"),
                violin_y_ticks: None,
            },
        ];
        WorkflowConfig { labels, datasets }
    }
}

/// Linear, single-pass pipeline: per dataset, cumulative chart, summary
/// table, violin chart. Any failure aborts the remaining steps; images
/// already written stay on disk.
pub fn run(config: &WorkflowConfig) -> Result<()> {
    let stats = stats_enabled();
    for dataset in &config.datasets {
        let t_load = Instant::now();
        let series = series::load_series(&dataset.input, &config.labels)?;
        log_stage(stats, "workflow.load", &dataset.input, t_load);

        let t_cumulative = Instant::now();
        plot::cumulative::render(
            &series,
            &dataset.cumulative_x_label,
            "Cumulative Count",
            &dataset.cumulative_title,
            &dataset.cumulative_out,
        )
        .with_context(|| format!("failed to render {}", dataset.cumulative_out.display()))?;
        log_stage(stats, "workflow.cumulative", &dataset.cumulative_out, t_cumulative);

        let t_table = Instant::now();
        let summaries = summarize_all(&series)?;
        plot::table::render(
            &config.labels,
            &summaries,
            &dataset.table_title,
            &dataset.table_out,
        )
        .with_context(|| format!("failed to render {}", dataset.table_out.display()))?;
        log_stage(stats, "workflow.table", &dataset.table_out, t_table);

        let t_violin = Instant::now();
        plot::violin::render(
            &series,
            &dataset.violin_title,
            "GTF files",
            dataset.violin_y_ticks.as_deref(),
            &dataset.violin_out,
        )
        .with_context(|| format!("failed to render {}", dataset.violin_out.display()))?;
        log_stage(stats, "workflow.violin", &dataset.violin_out, t_violin);
    }
    Ok(())
}

fn summarize_all(series: &[MeasurementSeries]) -> Result<Vec<SeriesSummary>> {
    series
        .iter()
        .map(|s| {
            stats::summarize(&s.values)
                .with_context(|| format!("failed to summarize series {:?}", s.label))
        })
        .collect()
}

fn stats_enabled() -> bool {
    matches!(env::var("SPLICE_PLOTS_STATS").as_deref(), Ok("1"))
}

fn log_stage(stats: bool, name: &str, path: &Path, t: Instant) {
    if stats {
        eprintln!(
            "SPLICE_PLOTS_STATS stage={} path={} time={}ms",
            name,
            path.display(),
            t.elapsed().as_millis()
        );
    }
}
