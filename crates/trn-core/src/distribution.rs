//! Initial pointer distributions.
//!
//! A distribution produces the D×N pointer matrix a run starts from: one
//! column per pointer, one row per embedding dimension.

use crate::error::{ConfigError, Result};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How initial pointers are placed in the embedding space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Distribution {
    /// Every coordinate drawn independently from `[0, 1)`.
    #[default]
    Unconstrained,
    /// Row `i` drawn uniformly from `[lows[i], highs[i])`.
    Bounded { lows: Vec<f64>, highs: Vec<f64> },
}

impl Distribution {
    /// Generate a `dimension × pointers` matrix.
    pub fn distribute<R: Rng + ?Sized>(
        &self,
        dimension: usize,
        pointers: usize,
        rng: &mut R,
    ) -> Result<Array2<f64>> {
        match self {
            Distribution::Unconstrained => Ok(unconstrained(dimension, pointers, rng)),
            Distribution::Bounded { lows, highs } => {
                bounded(dimension, pointers, lows, highs, rng)
            }
        }
    }
}

/// Pointers with every coordinate drawn from `[0, 1)`.
pub fn unconstrained<R: Rng + ?Sized>(dimension: usize, pointers: usize, rng: &mut R) -> Array2<f64> {
    Array2::from_shape_fn((dimension, pointers), |_| rng.gen::<f64>())
}

/// Pointers drawn axis-wise from `[lows[i], highs[i])`.
///
/// Fails when either bounds slice does not have exactly `dimension` entries,
/// or when an interval is empty or not finite.
pub fn bounded<R: Rng + ?Sized>(
    dimension: usize,
    pointers: usize,
    lows: &[f64],
    highs: &[f64],
    rng: &mut R,
) -> Result<Array2<f64>> {
    if lows.len() != dimension {
        return Err(ConfigError::BoundsLength {
            which: "lows",
            expected: dimension,
            found: lows.len(),
        }
        .into());
    }
    if highs.len() != dimension {
        return Err(ConfigError::BoundsLength {
            which: "highs",
            expected: dimension,
            found: highs.len(),
        }
        .into());
    }
    for (dim, (&low, &high)) in lows.iter().zip(highs).enumerate() {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(ConfigError::InvalidBounds {
                dimension: dim,
                low,
                high,
            }
            .into());
        }
    }

    Ok(Array2::from_shape_fn((dimension, pointers), |(i, _)| {
        rng.gen_range(lows[i]..highs[i])
    }))
}
