//! Topology: the learned graph over pointers.
//!
//! Holds the connection matrix C (binary, symmetric, zero diagonal) and the
//! edge-age matrix A (non-negative, symmetric, zero diagonal). Every mutator
//! writes both `(i, j)` and `(j, i)` so the symmetry invariant holds after
//! each call, not only at construction.
//!
//! Ages are only meaningful where an edge exists: aging a unit's row also
//! clears the age of every pair that is not connected.

use crate::types::{Edge, UnitIndex};
use ndarray::Array2;
use petgraph::graph::UnGraph;

/// Connection and age matrices of a network with a fixed number of units.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    connections: Array2<u8>,
    ages: Array2<f64>,
}

impl Topology {
    /// Create an unconnected topology over `units` pointers.
    pub fn new(units: usize) -> Self {
        Self {
            connections: Array2::zeros((units, units)),
            ages: Array2::zeros((units, units)),
        }
    }

    /// Number of units (pointers).
    pub fn unit_count(&self) -> usize {
        self.connections.nrows()
    }

    /// Create or refresh the edge `(i, j)`, resetting its age to 0.
    ///
    /// Self-loops are ignored.
    pub fn connect(&mut self, i: UnitIndex, j: UnitIndex) {
        if i == j {
            return;
        }
        self.connections[[i, j]] = 1;
        self.connections[[j, i]] = 1;
        self.ages[[i, j]] = 0.0;
        self.ages[[j, i]] = 0.0;
    }

    /// Increment the age of every edge incident to `unit` by one.
    pub fn age_incident(&mut self, unit: UnitIndex) {
        for j in 0..self.unit_count() {
            let age = if self.connections[[unit, j]] == 1 {
                self.ages[[unit, j]] + 1.0
            } else {
                0.0
            };
            self.ages[[unit, j]] = age;
            self.ages[[j, unit]] = age;
        }
    }

    /// Remove every edge incident to `unit` whose age exceeds `lifetime`.
    ///
    /// Returns the former neighbors, in increasing index order.
    pub fn prune_incident(&mut self, unit: UnitIndex, lifetime: f64) -> Vec<UnitIndex> {
        let mut pruned = Vec::new();
        for j in 0..self.unit_count() {
            if self.connections[[unit, j]] == 1 && self.ages[[unit, j]] > lifetime {
                self.connections[[unit, j]] = 0;
                self.connections[[j, unit]] = 0;
                pruned.push(j);
            }
        }
        pruned
    }

    /// Whether `i` and `j` are connected.
    pub fn is_connected(&self, i: UnitIndex, j: UnitIndex) -> bool {
        self.connections[[i, j]] == 1
    }

    /// Age of the edge `(i, j)`, if it exists.
    pub fn age(&self, i: UnitIndex, j: UnitIndex) -> Option<f64> {
        self.is_connected(i, j).then(|| self.ages[[i, j]])
    }

    /// Neighbors of a unit, in increasing index order.
    pub fn neighbors(&self, unit: UnitIndex) -> Vec<UnitIndex> {
        self.connections
            .row(unit)
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 1)
            .map(|(j, _)| j)
            .collect()
    }

    /// Number of edges incident to a unit.
    pub fn degree(&self, unit: UnitIndex) -> usize {
        self.connections.row(unit).iter().filter(|&&c| c == 1).count()
    }

    /// Every edge once, with `a < b`, in row-major order.
    pub fn edges(&self) -> Vec<Edge> {
        edges_of(&self.connections)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// The connection matrix C.
    pub fn connections(&self) -> &Array2<u8> {
        &self.connections
    }

    /// The edge-age matrix A.
    pub fn ages(&self) -> &Array2<f64> {
        &self.ages
    }

    /// Consume the topology, keeping only the connection matrix.
    pub fn into_connections(self) -> Array2<u8> {
        self.connections
    }

    /// Build an undirected petgraph graph whose node weights are unit indices.
    pub fn to_graph(&self) -> UnGraph<UnitIndex, ()> {
        graph_of(self.unit_count(), &self.edges())
    }

    /// Number of connected components, counting isolated units.
    pub fn component_count(&self) -> usize {
        count_components(self.unit_count(), &self.edges())
    }

    /// Check the structural invariants: C binary, both matrices symmetric
    /// with zero diagonal, ages non-negative.
    pub fn is_consistent(&self) -> bool {
        let n = self.unit_count();
        if self.ages.dim() != (n, n) {
            return false;
        }
        for i in 0..n {
            if self.connections[[i, i]] != 0 || self.ages[[i, i]] != 0.0 {
                return false;
            }
            for j in 0..n {
                let c = self.connections[[i, j]];
                let a = self.ages[[i, j]];
                if c > 1 || c != self.connections[[j, i]] {
                    return false;
                }
                if !(a >= 0.0) || a != self.ages[[j, i]] {
                    return false;
                }
            }
        }
        true
    }
}

/// Every edge of a connection matrix once, with `a < b`, in row-major order.
pub fn edges_of(connections: &Array2<u8>) -> Vec<Edge> {
    let n = connections.nrows();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if connections[[i, j]] == 1 {
                edges.push(Edge { a: i, b: j });
            }
        }
    }
    edges
}

/// Undirected petgraph graph over `units` nodes; node weights are unit indices.
pub fn graph_of(units: usize, edges: &[Edge]) -> UnGraph<UnitIndex, ()> {
    let mut graph = UnGraph::with_capacity(units, edges.len());
    let nodes: Vec<_> = (0..units).map(|i| graph.add_node(i)).collect();
    for edge in edges {
        graph.add_edge(nodes[edge.a], nodes[edge.b], ());
    }
    graph
}

/// Number of connected components, counting isolated units.
pub fn count_components(units: usize, edges: &[Edge]) -> usize {
    petgraph::algo::connected_components(&graph_of(units, edges))
}
