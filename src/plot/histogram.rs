//! Frequency histogram of a single integer series. The bin count equals
//! the series length, matching the upstream pipeline's plots.

use crate::plot::{PlotError, Result};
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

const BAR_FILL: RGBColor = RGBColor(135, 206, 235);

/// Equal-width binning over [min, max]; the last bin is closed on both
/// ends so the maximum lands in it instead of overflowing.
pub fn bin_counts(values: &[u64], bins: usize) -> Vec<((f64, f64), u64)> {
    debug_assert!(!values.is_empty() && bins > 0);
    let min = *values.iter().min().unwrap() as f64;
    let max = *values.iter().max().unwrap() as f64;
    if max <= min {
        return vec![((min - 0.5, min + 0.5), values.len() as u64)];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &v in values {
        let idx = (((v as f64 - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let lo = min + i as f64 * width;
            ((lo, lo + width), c)
        })
        .collect()
}

pub fn render(values: &[u64], title: &str, x_label: &str, output_path: &Path) -> Result<()> {
    if values.is_empty() {
        return Err(PlotError::InvalidData("no values to plot".to_string()));
    }

    let bars = bin_counts(values, values.len());
    let x_min = bars[0].0.0;
    let x_max = bars[bars.len() - 1].0.1;
    let y_max = bars.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("Frequency")
        .x_label_style(("sans-serif", 18))
        .y_label_style(("sans-serif", 18))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for &((lo, hi), count) in &bars {
        if count == 0 {
            continue;
        }
        let corners = [(lo, 0.0), (hi, count as f64)];
        chart
            .draw_series(std::iter::once(Rectangle::new(
                corners,
                BAR_FILL.mix(0.7).filled(),
            )))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        chart
            .draw_series(std::iter::once(Rectangle::new(corners, BLACK)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
