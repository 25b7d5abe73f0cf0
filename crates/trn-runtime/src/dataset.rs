//! Input pattern providers.
//!
//! Every provider returns a D×M pattern matrix: one column per input
//! pattern, one row per embedding dimension.

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trn_core::distribution;
use trn_core::error::{ConfigError, Result, TrnError};

/// Where the input patterns of a run come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DatasetSpec {
    /// Uniform samples from the square `[low, high)²`.
    Square { samples: usize, low: f64, high: f64 },
    /// Whitespace- or tab-separated numeric rows, one pattern per row.
    File {
        path: PathBuf,
        /// Drop the last column of every row (a class label).
        #[serde(default)]
        drop_last_column: bool,
    },
}

impl Default for DatasetSpec {
    fn default() -> Self {
        DatasetSpec::Square {
            samples: 200,
            low: 1.0,
            high: 3.0,
        }
    }
}

impl DatasetSpec {
    /// Produce the pattern matrix.
    pub fn load<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array2<f64>> {
        match self {
            DatasetSpec::Square { samples, low, high } => {
                square_manifold(*samples, *low, *high, rng)
            }
            DatasetSpec::File {
                path,
                drop_last_column,
            } => load_delimited(path, *drop_last_column),
        }
    }
}

/// `samples` patterns drawn uniformly from the square `[low, high)²`.
pub fn square_manifold<R: Rng + ?Sized>(
    samples: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if samples == 0 {
        return Err(ConfigError::EmptyPatterns.into());
    }
    distribution::bounded(2, samples, &[low, low], &[high, high], rng)
}

/// Read a delimited numeric file into a D×M matrix.
pub fn load_delimited(path: impl AsRef<Path>, drop_last_column: bool) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| TrnError::Io(format!("{}: {}", path.display(), e)))?;
    parse_delimited(&content, drop_last_column)
}

/// Parse whitespace-separated numeric rows into a D×M matrix.
///
/// Blank lines and lines starting with `#` are skipped. Every remaining row
/// must have the same number of columns.
pub fn parse_delimited(content: &str, drop_last_column: bool) -> Result<Array2<f64>> {
    let mut values = Vec::new();
    let mut columns: Option<usize> = None;
    let mut rows = 0;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields: Vec<&str> = line.split_whitespace().collect();
        if drop_last_column {
            fields.pop();
        }

        match columns {
            None => columns = Some(fields.len()),
            Some(expected) if expected != fields.len() => {
                return Err(TrnError::invalid_config(
                    format!("line {}", line_no + 1),
                    fields.len().to_string(),
                    format!("expected {} columns", expected),
                ));
            }
            Some(_) => {}
        }

        for field in fields {
            let value: f64 = field.parse().map_err(|_| {
                TrnError::Serialization(format!(
                    "line {}: '{}' is not a number",
                    line_no + 1,
                    field
                ))
            })?;
            values.push(value);
        }
        rows += 1;
    }

    let columns = columns.unwrap_or(0);
    if rows == 0 || columns == 0 {
        return Err(ConfigError::EmptyPatterns.into());
    }

    let by_row = Array2::from_shape_vec((rows, columns), values)
        .map_err(|e| TrnError::Serialization(e.to_string()))?;
    Ok(by_row.t().to_owned())
}
