//! Read-type comparison bar chart: six fixed categories, counts printed
//! above the bars with space-grouped thousands.

use crate::plot::{PlotError, Result, wrap_label};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

const BAR_FILL: RGBColor = RGBColor(135, 206, 235);

pub const READ_TYPE_LABELS: [&str; 6] = [
    "all reads",
    "non-split reads",
    "non-split reads, no mismatches",
    "split reads",
    "split reads, no mismatches",
    "split reads, no mismatches, regions at least 5bp",
];

/// 1234567 -> "1 234 567"
pub fn format_with_spaces(n: u64) -> String {
    let digits = n.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(*b as char);
    }
    out
}

pub fn render(counts: &[u64; 6], output_path: &Path) -> Result<()> {
    let max = *counts.iter().max().unwrap_or(&0);
    if max == 0 {
        return Err(PlotError::InvalidData("all counts are zero".to_string()));
    }
    let y_max = max as f64 * 1.1;

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Comparison of Read Types", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(100)
        .build_cartesian_2d(-0.5..5.5f64, 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_desc("Frequency")
        .y_label_style(("sans-serif", 18))
        .y_label_formatter(&|y| format_with_spaces(*y as u64))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let value_style =
        TextStyle::from(("sans-serif", 16)).pos(Pos::new(HPos::Center, VPos::Bottom));
    for (i, &count) in counts.iter().enumerate() {
        let center = i as f64;
        let corners = [(center - 0.35, 0.0), (center + 0.35, count as f64)];
        chart
            .draw_series(std::iter::once(Rectangle::new(
                corners,
                BAR_FILL.filled(),
            )))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        chart
            .draw_series(std::iter::once(Rectangle::new(corners, BLACK)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        chart
            .draw_series(std::iter::once(Text::new(
                format_with_spaces(count),
                (center, count as f64 + max as f64 * 0.02),
                value_style.clone(),
            )))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    // wrapped category labels under each bar, drawn line by line
    let label_style =
        TextStyle::from(("sans-serif", 15)).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, label) in READ_TYPE_LABELS.iter().enumerate() {
        let (px, py) = chart.plotting_area().map_coordinate(&(i as f64, 0.0));
        for (j, line) in wrap_label(label, 10).into_iter().enumerate() {
            root.draw(&Text::new(
                line,
                (px, py + 6 + j as i32 * 16),
                label_style.clone(),
            ))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        }
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
