//! Network exporter: adapted pointers and learned edges as JSON.
//!
//! The export is what external renderers consume: pointer coordinates plus
//! each undirected edge once, with its length.

use crate::engine::Adaptation;
use crate::metrics::{edge_length, NetworkMetrics};
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;
use trn_core::error::{Result, TrnError};
use trn_core::types::Edge;

/// A pointer with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPointer {
    pub id: usize,
    pub position: Vec<f64>,
}

/// A learned edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedEdge {
    pub source: usize,
    pub target: usize,
    pub length: f64,
}

/// Metadata describing the run that produced the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub unit_count: usize,
    pub dimension: usize,
    pub edge_count: usize,
    pub steps: usize,
    pub seed: Option<u64>,
    pub exported_at: u64,
}

/// A complete serializable adapted network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkExport {
    pub pointers: Vec<ExportedPointer>,
    pub edges: Vec<ExportedEdge>,
    pub metrics: NetworkMetrics,
    pub metadata: ExportMetadata,
}

impl NetworkExport {
    /// Build an export from a finished run.
    pub fn from_adaptation(
        adaptation: &Adaptation,
        patterns: Option<ArrayView2<'_, f64>>,
        seed: Option<u64>,
    ) -> Self {
        let pointers = adaptation.pointers.view();
        let edges = adaptation.edges();

        let exported_pointers = pointers
            .axis_iter(Axis(1))
            .enumerate()
            .map(|(id, w)| ExportedPointer {
                id,
                position: w.to_vec(),
            })
            .collect();

        let exported_edges = edges
            .iter()
            .map(|&e| ExportedEdge {
                source: e.a,
                target: e.b,
                length: edge_length(pointers, e),
            })
            .collect();

        Self {
            pointers: exported_pointers,
            edges: exported_edges,
            metrics: NetworkMetrics::compute(pointers, &edges, patterns),
            metadata: ExportMetadata {
                unit_count: pointers.ncols(),
                dimension: pointers.nrows(),
                edge_count: edges.len(),
                steps: adaptation.steps,
                seed,
                exported_at: unix_now(),
            },
        }
    }

    /// Rebuild the D×N pointer matrix.
    pub fn pointer_matrix(&self) -> Result<Array2<f64>> {
        let units = self.pointers.len();
        let dimension = self.metadata.dimension;
        let mut matrix = Array2::zeros((dimension, units));
        for pointer in &self.pointers {
            if pointer.id >= units || pointer.position.len() != dimension {
                return Err(TrnError::Serialization(format!(
                    "pointer {} does not fit a {}x{} matrix",
                    pointer.id, dimension, units
                )));
            }
            for (d, &x) in pointer.position.iter().enumerate() {
                matrix[[d, pointer.id]] = x;
            }
        }
        Ok(matrix)
    }

    /// The edges as unit index pairs.
    pub fn edge_list(&self) -> Vec<Edge> {
        self.edges
            .iter()
            .map(|e| Edge::new(e.source, e.target))
            .collect()
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Read an export written by [`NetworkExport::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn adaptation() -> Adaptation {
        Adaptation {
            pointers: array![[0.0, 3.0, 3.0], [0.0, 0.0, 4.0]],
            connections: array![[0u8, 1, 0], [1, 0, 1], [0, 1, 0]],
            steps: 12,
        }
    }

    #[test]
    fn export_lists_each_edge_once() {
        let export = NetworkExport::from_adaptation(&adaptation(), None, Some(7));
        assert_eq!(export.pointers.len(), 3);
        assert_eq!(export.pointers[1].position, vec![3.0, 0.0]);
        assert_eq!(export.edges.len(), 2);
        assert_eq!((export.edges[0].source, export.edges[0].target), (0, 1));
        assert!((export.edges[0].length - 3.0).abs() < 1e-12);
        assert!((export.edges[1].length - 4.0).abs() < 1e-12);
        assert_eq!(export.metadata.steps, 12);
        assert_eq!(export.metadata.seed, Some(7));
        assert_eq!(export.metrics.components, 1);
    }

    #[test]
    fn save_and_load_preserve_network() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.json");
        let original = adaptation();
        let export = NetworkExport::from_adaptation(&original, None, None);
        export.save(&path).unwrap();

        let loaded = NetworkExport::load(&path).unwrap();
        assert_eq!(loaded.pointers, export.pointers);
        assert_eq!(loaded.edges, export.edges);
        assert_eq!(loaded.metadata, export.metadata);
        assert_eq!(loaded.pointer_matrix().unwrap(), original.pointers);
        assert_eq!(loaded.edge_list(), original.edges());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            NetworkExport::load(&path),
            Err(TrnError::Serialization(_))
        ));
    }
}
