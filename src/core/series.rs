use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// One experiment's measurements, paired with its label at load time.
/// The CSV files carry no label column; pairing is by line order, which is
/// why [`load_series`] takes the label list and checks the counts match.
#[derive(Clone, Debug)]
pub struct MeasurementSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Load a multi-experiment CSV: one comma-separated numeric line per
/// experiment, file order = label order.
pub fn load_series(path: &Path, labels: &[String]) -> Result<Vec<MeasurementSeries>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        bail!("{}: file is empty", path.display());
    }
    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() != labels.len() {
        bail!(
            "{}: expected {} series (one per experiment), found {} lines",
            path.display(),
            labels.len(),
            lines.len()
        );
    }

    lines
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(idx, (line, label))| {
            let values = parse_line(line)
                .with_context(|| format!("{} line {}", path.display(), idx + 1))?;
            Ok(MeasurementSeries {
                label: label.clone(),
                values,
            })
        })
        .collect()
}

/// Load a single-series CSV of integers (fragment lengths, mutation
/// positions, mutation counts).
pub fn load_single_series(path: &Path) -> Result<Vec<u64>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        bail!("{}: file is empty", path.display());
    }
    trimmed
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<u64>()
                .with_context(|| format!("{}: invalid integer {:?}", path.display(), token))
        })
        .collect()
}

fn parse_line(line: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for token in line.split(',') {
        let token = token.trim();
        let value: f64 = token
            .parse()
            .with_context(|| format!("invalid number {:?}", token))?;
        if !value.is_finite() {
            bail!("non-finite value {:?}", token);
        }
        // negative measurements would make log10(v + 1) undefined downstream
        if value < 0.0 {
            bail!("negative value {:?}", token);
        }
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("splice_plots_{name}_{}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    fn two_labels() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn round_trips_integer_values_exactly() {
        let path = write_temp("roundtrip", "1,2,3,100000\n7,7,7,7\n");
        let series = load_series(&path, &two_labels()).unwrap();
        assert_eq!(series[0].values, vec![1.0, 2.0, 3.0, 100000.0]);
        assert_eq!(series[1].values, vec![7.0; 4]);
        assert_eq!(series[0].label, "A");
        assert_eq!(series[1].label, "B");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn rejects_non_numeric_token() {
        let path = write_temp("badtoken", "1,2,x\n4,5,6\n");
        let err = load_series(&path, &two_labels()).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn rejects_negative_values() {
        let path = write_temp("negative", "-5,-2,3\n1,2,3\n");
        let err = load_series(&path, &two_labels()).unwrap_err();
        assert!(format!("{err:#}").contains("negative value"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn rejects_line_label_count_mismatch() {
        let path = write_temp("mismatch", "1,2,3\n");
        let err = load_series(&path, &two_labels()).unwrap_err();
        assert!(err.to_string().contains("expected 2 series"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn rejects_empty_file() {
        let path = write_temp("empty", "\n");
        assert!(load_series(&path, &two_labels()).is_err());
        assert!(load_single_series(&path).is_err());
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/splice-plots/exons.csv");
        assert!(load_series(&path, &two_labels()).is_err());
    }

    #[test]
    fn single_series_parses_integers() {
        let path = write_temp("single", "5,1,12,3\n");
        assert_eq!(load_single_series(&path).unwrap(), vec![5, 1, 12, 3]);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn single_series_rejects_float_token() {
        let path = write_temp("singlefloat", "5,1.5,12\n");
        assert!(load_single_series(&path).is_err());
        fs::remove_file(path).unwrap();
    }
}
