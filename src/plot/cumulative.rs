//! Empirical cumulative-distribution step charts in absolute-count form:
//! y at a value x is the number of observations at or below x, not a
//! probability.

use crate::core::series::MeasurementSeries;
use crate::plot::{PlotError, Result, series_color};
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 800;

/// Expand a series into a right-continuous "post" step polyline: the count
/// holds until the next distinct value, then jumps. The x at rank k
/// (1-indexed, ascending) is the k-th smallest value and the y is k;
/// duplicates collapse into a single vertical jump.
pub fn step_points(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut steps: Vec<(f64, f64)> = Vec::new();
    for (i, &v) in sorted.iter().enumerate() {
        let count = (i + 1) as f64;
        match steps.last_mut() {
            Some(last) if last.0 == v => last.1 = count,
            _ => steps.push((v, count)),
        }
    }

    let mut points = Vec::with_capacity(steps.len() * 2);
    for &(x, y) in &steps {
        if let Some(&(_, prev_y)) = points.last() {
            points.push((x, prev_y));
        }
        points.push((x, y));
    }
    points
}

fn legend_entry(label: &str) -> String {
    format!("GTF File {label}")
}

pub fn render(
    series: &[MeasurementSeries],
    x_label: &str,
    y_label: &str,
    title: &str,
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

    let x_min = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(f64::INFINITY, f64::min);
    let mut x_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    let y_max = series.iter().map(|s| s.values.len()).max().unwrap_or(1) as f64;

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_label_style(("sans-serif", 20))
        .y_label_style(("sans-serif", 20))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (i, s) in series.iter().enumerate() {
        let color = series_color(i);
        let points = step_points(&s.values);
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(legend_entry(&s.label))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Count at a value x according to the step polyline: the y of the last
    /// point whose x is at or below the probe.
    fn count_at(points: &[(f64, f64)], x: f64) -> f64 {
        points
            .iter()
            .filter(|(px, _)| *px <= x)
            .map(|(_, py)| *py)
            .fold(0.0, f64::max)
    }

    #[test]
    fn duplicates_collapse_into_one_jump() {
        let points = step_points(&[1.0, 1.0, 2.0, 5.0]);
        assert_eq!(count_at(&points, 1.0), 2.0);
        assert_eq!(count_at(&points, 2.0), 3.0);
        assert_eq!(count_at(&points, 5.0), 4.0);
    }

    #[test]
    fn plateau_holds_between_steps() {
        let points = step_points(&[1.0, 1.0, 2.0, 5.0]);
        // between x=2 and x=5 the polyline stays at 3
        assert_eq!(count_at(&points, 3.0), 3.0);
        assert_eq!(count_at(&points, 4.9), 3.0);
        // post-step polyline carries the plateau explicitly
        assert!(points.contains(&(5.0, 3.0)));
        assert!(points.contains(&(5.0, 4.0)));
    }

    #[test]
    fn unsorted_input_gives_same_polyline() {
        assert_eq!(
            step_points(&[5.0, 1.0, 2.0, 1.0]),
            step_points(&[1.0, 1.0, 2.0, 5.0])
        );
    }

    #[test]
    fn legend_entries_name_the_gtf_file() {
        assert_eq!(
            legend_entry("Homo_sapiens.GRCh37.67"),
            "GTF File Homo_sapiens.GRCh37.67"
        );
    }

    #[test]
    fn single_value_is_a_single_point() {
        assert_eq!(step_points(&[3.0]), vec![(3.0, 1.0)]);
    }

    #[test]
    #[ignore = "font rendering not available in test environment"]
    fn render_writes_png() {
        let out = std::env::temp_dir().join("splice_plots_cumulative_test.png");
        let series = vec![
            MeasurementSeries {
                label: "A".to_string(),
                values: vec![1.0, 1.0, 2.0, 5.0],
            },
            MeasurementSeries {
                label: "B".to_string(),
                values: vec![2.0, 3.0, 3.0],
            },
        ];
        render(&series, "Skipped Exons", "Cumulative Count", "ECDF", &out).unwrap();
        assert!(out.exists());
        std::fs::remove_file(out).unwrap();
    }
}
