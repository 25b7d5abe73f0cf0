//! Network metrics: how well the adapted pointers cover the sample and
//! what the learned graph looks like.

use ndarray::{ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use trn_core::topology::count_components;
use trn_core::types::Edge;

/// Summary statistics of an adapted network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    /// Number of pointers.
    pub units: usize,
    /// Embedding dimension.
    pub dimension: usize,
    /// Number of undirected edges.
    pub edges: usize,
    /// Connected components, isolated pointers included.
    pub components: usize,
    /// Pointers with no edge at all.
    pub isolated: usize,
    /// Average number of edges per pointer.
    pub mean_degree: f64,
    /// Average Euclidean length of an edge (0 without edges).
    pub mean_edge_length: f64,
    /// Mean distance from each pattern to its nearest pointer, if patterns
    /// were supplied.
    pub quantization_error: Option<f64>,
}

impl NetworkMetrics {
    /// Compute metrics for D×N `pointers` and their `edges`.
    pub fn compute(
        pointers: ArrayView2<'_, f64>,
        edges: &[Edge],
        patterns: Option<ArrayView2<'_, f64>>,
    ) -> Self {
        let units = pointers.ncols();

        let mut degree = vec![0usize; units];
        for edge in edges {
            degree[edge.a] += 1;
            degree[edge.b] += 1;
        }
        let isolated = degree.iter().filter(|&&d| d == 0).count();

        let mean_degree = if units > 0 {
            (2 * edges.len()) as f64 / units as f64
        } else {
            0.0
        };

        let mean_edge_length = if edges.is_empty() {
            0.0
        } else {
            edges
                .iter()
                .map(|e| edge_length(pointers, *e))
                .sum::<f64>()
                / edges.len() as f64
        };

        Self {
            units,
            dimension: pointers.nrows(),
            edges: edges.len(),
            components: count_components(units, edges),
            isolated,
            mean_degree,
            mean_edge_length,
            quantization_error: patterns.map(|v| quantization_error(pointers, v)),
        }
    }
}

/// Euclidean distance between the two endpoints of an edge.
pub fn edge_length(pointers: ArrayView2<'_, f64>, edge: Edge) -> f64 {
    distance(pointers.column(edge.a), pointers.column(edge.b))
}

/// Mean distance from every pattern to its nearest pointer.
///
/// Returns 0 when there are no patterns and infinity when there are no
/// pointers.
pub fn quantization_error(pointers: ArrayView2<'_, f64>, patterns: ArrayView2<'_, f64>) -> f64 {
    if patterns.ncols() == 0 {
        return 0.0;
    }
    let total: f64 = patterns
        .axis_iter(Axis(1))
        .map(|v| {
            pointers
                .axis_iter(Axis(1))
                .map(|w| distance(w, v))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / patterns.ncols() as f64
}

fn distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
