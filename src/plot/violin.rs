//! Side-by-side violin charts of log-transformed series: every value v is
//! drawn as log10(v + 1), one mirrored kernel-density polygon per
//! experiment with quartile lines inside.

use crate::core::series::MeasurementSeries;
use crate::core::stats::percentile;
use crate::plot::{PlotError, Result, series_color, wrap_label};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const WIDTH: u32 = 1500;
const HEIGHT: u32 = 600;
const KDE_SAMPLES: usize = 120;
// half of the maximum violin width in x-axis units (violins sit 1.0 apart)
const MAX_HALF_WIDTH: f64 = 0.4;

pub(crate) fn log_transform(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| (v + 1.0).log10()).collect()
}

fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (variance.sqrt() * n.powf(-0.2)).max(1e-3)
}

fn gaussian_density(values: &[f64], bandwidth: f64, x: f64) -> f64 {
    let n = values.len() as f64;
    let norm = n * bandwidth * (2.0 * std::f64::consts::PI).sqrt();
    values
        .iter()
        .map(|&xi| {
            let u = (x - xi) / bandwidth;
            (-0.5 * u * u).exp()
        })
        .sum::<f64>()
        / norm
}

/// Sample the kernel density over the data range only (no tail past the
/// observed min/max, matching a "cut = 0" violin).
pub(crate) fn kde_curve(values: &[f64], bandwidth: f64) -> Vec<(f64, f64)> {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (0..KDE_SAMPLES)
        .map(|i| {
            let y = lo + (hi - lo) * i as f64 / (KDE_SAMPLES - 1) as f64;
            (y, gaussian_density(values, bandwidth, y))
        })
        .collect()
}

/// Y-axis limits: clamped to the first and last tick when an explicit tick
/// list is given, otherwise auto-scaled from the transformed data with a
/// small pad.
pub(crate) fn y_range(ticks: Option<&[f64]>, transformed: &[Vec<f64>]) -> (f64, f64) {
    if let Some(ticks) = ticks
        && ticks.len() >= 2
    {
        return (ticks[0], ticks[ticks.len() - 1]);
    }
    let lo = transformed
        .iter()
        .flat_map(|v| v.iter().copied())
        .fold(f64::INFINITY, f64::min);
    let hi = transformed
        .iter()
        .flat_map(|v| v.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);
    let pad = if hi - lo > 1e-9 {
        0.05 * (hi - lo)
    } else {
        0.1 * hi.abs().max(1.0)
    };
    (lo - pad, hi + pad)
}

pub fn render(
    series: &[MeasurementSeries],
    title: &str,
    x_desc: &str,
    y_ticks: Option<&[f64]>,
    output_path: &Path,
) -> Result<()> {
    if series.is_empty() {
        return Err(PlotError::InvalidData("no series to plot".to_string()));
    }
    for s in series {
        if s.values.is_empty() {
            return Err(PlotError::InvalidData(format!(
                "series {:?} is empty",
                s.label
            )));
        }
    }

    let transformed: Vec<Vec<f64>> = series.iter().map(|s| log_transform(&s.values)).collect();
    let (y_lo, y_hi) = y_range(y_ticks, &transformed);
    let n = series.len() as f64;

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n - 0.5), y_lo..y_hi)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(0)
        .x_desc(x_desc)
        .y_desc("log10(Values + 1)")
        .x_label_style(("sans-serif", 18))
        .y_label_style(("sans-serif", 18));
    if let Some(ticks) = y_ticks {
        mesh.y_labels(ticks.len());
    }
    mesh.draw().map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (i, values) in transformed.iter().enumerate() {
        let center = i as f64;
        let color = series_color(i);
        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let lo = sorted[0];
        let hi = sorted[sorted.len() - 1];

        if hi - lo < 1e-12 {
            // zero spread (e.g. all-zero input): a flat bar, not a failure
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(center - MAX_HALF_WIDTH, lo), (center + MAX_HALF_WIDTH, lo)],
                    color.stroke_width(4),
                )))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
            continue;
        }

        let bandwidth = scott_bandwidth(&sorted);
        let curve = kde_curve(&sorted, bandwidth);
        let max_density = curve.iter().map(|(_, d)| *d).fold(0.0, f64::max);
        let half = |d: f64| MAX_HALF_WIDTH * d / max_density;

        let mut outline: Vec<(f64, f64)> = Vec::with_capacity(curve.len() * 2 + 1);
        for &(y, d) in &curve {
            outline.push((center + half(d), y));
        }
        for &(y, d) in curve.iter().rev() {
            outline.push((center - half(d), y));
        }
        chart
            .draw_series(std::iter::once(Polygon::new(
                outline.clone(),
                color.mix(0.5).filled(),
            )))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        outline.push(outline[0]);
        chart
            .draw_series(std::iter::once(PathElement::new(outline, color)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;

        // inner quartile lines, clipped to the violin's local width
        for p in [25.0, 50.0, 75.0] {
            let q = percentile(&sorted, p);
            let w = half(gaussian_density(&sorted, bandwidth, q));
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(center - w, q), (center + w, q)],
                    BLACK.stroke_width(1),
                )))
                .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    // wrapped experiment labels under each violin, drawn line by line
    let label_style =
        TextStyle::from(("sans-serif", 16)).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, s) in series.iter().enumerate() {
        let (px, py) = chart.plotting_area().map_coordinate(&(i as f64, y_lo));
        for (j, line) in wrap_label(&s.label, 13).into_iter().enumerate() {
            root.draw(&Text::new(
                line,
                (px, py + 6 + j as i32 * 18),
                label_style.clone(),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_transform_is_defined_at_zero() {
        assert_eq!(log_transform(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn log_transform_maps_nine_to_one() {
        let t = log_transform(&[9.0, 99.0]);
        assert!((t[0] - 1.0).abs() < 1e-12);
        assert!((t[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn kde_spans_data_range_with_positive_density() {
        let values = vec![1.0, 2.0, 2.0, 3.0, 5.0];
        let curve = kde_curve(&values, scott_bandwidth(&values));
        assert_eq!(curve.len(), KDE_SAMPLES);
        assert_eq!(curve[0].0, 1.0);
        assert_eq!(curve[curve.len() - 1].0, 5.0);
        assert!(curve.iter().all(|(_, d)| *d > 0.0 && d.is_finite()));
    }

    #[test]
    fn explicit_ticks_clamp_y_limits() {
        let ticks = [0.25, 0.35, 0.45];
        let (lo, hi) = y_range(Some(&ticks), &[vec![10.0, 20.0]]);
        assert_eq!(lo, 0.25);
        assert_eq!(hi, 0.45);
    }

    #[test]
    fn auto_range_pads_degenerate_data() {
        let (lo, hi) = y_range(None, &[vec![0.0, 0.0, 0.0]]);
        assert!(lo < 0.0);
        assert!(hi > 0.0);
    }

    #[test]
    #[ignore = "font rendering not available in test environment"]
    fn all_zero_series_renders_flat_violin() {
        let out = std::env::temp_dir().join("splice_plots_violin_zero_test.png");
        let series = vec![MeasurementSeries {
            label: "A".to_string(),
            values: vec![0.0, 0.0, 0.0],
        }];
        render(&series, "Violin", "GTF files", None, &out).unwrap();
        assert!(out.exists());
        std::fs::remove_file(out).unwrap();
    }

    #[test]
    #[ignore = "font rendering not available in test environment"]
    fn render_writes_png() {
        let out = std::env::temp_dir().join("splice_plots_violin_test.png");
        let series = vec![
            MeasurementSeries {
                label: "Homo_sapiens.GRCh37.67".to_string(),
                values: vec![1.0, 2.0, 2.0, 3.0, 8.0],
            },
            MeasurementSeries {
                label: "Homo_sapiens.GRCh37.75".to_string(),
                values: vec![1.0, 1.0, 4.0, 9.0],
            },
        ];
        let ticks: Vec<f64> = (0..=10).map(|i| 0.25 + 0.1 * i as f64).collect();
        render(&series, "Violin", "GTF files", Some(&ticks), &out).unwrap();
        assert!(out.exists());
        std::fs::remove_file(out).unwrap();
    }
}
