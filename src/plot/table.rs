//! Summary-statistics table rendered as an image: one row per experiment,
//! columns Median / LQ / UQ / IQR, drawn as a rectangle-and-text grid.

use crate::core::stats::SeriesSummary;
use crate::plot::{PlotError, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 300;
const COLUMNS: [&str; 4] = ["Median", "LQ", "UQ", "IQR"];

pub fn render(
    labels: &[String],
    summaries: &[SeriesSummary],
    title: &str,
    output_path: &Path,
) -> Result<()> {
    if labels.is_empty() {
        return Err(PlotError::InvalidData("no rows to tabulate".to_string()));
    }
    if labels.len() != summaries.len() {
        return Err(PlotError::InvalidData(format!(
            "{} labels but {} summaries",
            labels.len(),
            summaries.len()
        )));
    }

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let title_style =
        TextStyle::from(("sans-serif", 24)).pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(title.to_string(), (WIDTH as i32 / 2, 12), title_style))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    // grid geometry: wide row-header column, four equal value columns
    let left = 20i32;
    let top = 55i32;
    let header_width = 300i32;
    let cell_width = (WIDTH as i32 - 2 * left - header_width) / COLUMNS.len() as i32;
    let row_height =
        ((HEIGHT as i32 - top - 20) / (labels.len() as i32 + 1)).min(50);

    let cell_style =
        TextStyle::from(("sans-serif", 16)).pos(Pos::new(HPos::Center, VPos::Center));

    let draw_cell = |col: i32, row: i32, width: i32, text: String| -> Result<()> {
        let x0 = left + if col == 0 { 0 } else { header_width + (col - 1) * cell_width };
        let y0 = top + row * row_height;
        root.draw(&Rectangle::new(
            [(x0, y0), (x0 + width, y0 + row_height)],
            BLACK,
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
        root.draw(&Text::new(
            text,
            (x0 + width / 2, y0 + row_height / 2),
            cell_style.clone(),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
        Ok(())
    };

    // header row: empty corner over the row labels, then the column names
    draw_cell(0, 0, header_width, String::new())?;
    for (c, name) in COLUMNS.iter().enumerate() {
        draw_cell(c as i32 + 1, 0, cell_width, name.to_string())?;
    }

    for (r, (label, summary)) in labels.iter().zip(summaries).enumerate() {
        let row = r as i32 + 1;
        draw_cell(0, row, header_width, label.clone())?;
        let cells = [
            summary.median,
            summary.lower_quartile,
            summary.upper_quartile,
            summary.iqr,
        ];
        for (c, value) in cells.iter().enumerate() {
            draw_cell(c as i32 + 1, row, cell_width, format!("{value}"))?;
        }
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}
