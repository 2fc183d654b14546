//! Graph Index
//!
//! Undirected weighted adjacency built from the snapshot's edge list.

use std::collections::HashMap;

use cascade_events::{Edge, Unit};

/// One entry in a unit's neighbor list.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: String,
    pub weight: f64,
}

/// Adjacency lists keyed by unit id.
///
/// Self-loops and duplicate edges are kept as given, so a neighbor listed
/// twice contributes its weight twice.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    adjacency: HashMap<String, Vec<Neighbor>>,
}

impl GraphIndex {
    /// Builds the index, inserting every edge in both directions.
    pub fn build(edges: &[Edge]) -> Self {
        let mut adjacency: HashMap<String, Vec<Neighbor>> = HashMap::new();
        for edge in edges {
            adjacency
                .entry(edge.source.clone())
                .or_default()
                .push(Neighbor {
                    id: edge.target.clone(),
                    weight: edge.weight,
                });
            adjacency
                .entry(edge.target.clone())
                .or_default()
                .push(Neighbor {
                    id: edge.source.clone(),
                    weight: edge.weight,
                });
        }
        Self { adjacency }
    }

    /// Neighbors of `id`; empty for ids no edge mentions.
    pub fn neighbors(&self, id: &str) -> &[Neighbor] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sum of neighbor weights, or 1.0 when that sum is zero.
    pub fn total_weight(&self, id: &str) -> f64 {
        let total: f64 = self.neighbors(id).iter().map(|n| n.weight).sum();
        if total == 0.0 {
            1.0
        } else {
            total
        }
    }

    /// Weighted fraction of `id`'s neighbors that are collapsed in `units`.
    ///
    /// Neighbors missing from `units` count as not collapsed.
    pub fn collapsed_flux(&self, id: &str, units: &HashMap<&str, &Unit>) -> f64 {
        let collapsed: f64 = self
            .neighbors(id)
            .iter()
            .filter(|n| units.get(n.id.as_str()).is_some_and(|u| u.is_collapsed()))
            .map(|n| n.weight)
            .sum();
        collapsed / self.total_weight(id)
    }

    /// Number of ids with at least one neighbor entry.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

/// Read-only id lookup over a unit slice.
pub fn index_units(units: &[Unit]) -> HashMap<&str, &Unit> {
    units.iter().map(|u| (u.id.as_str(), u)).collect()
}
