//! Topology
//!
//! Immutable adjacency over dense node indices. Built once before a run and
//! shared read-only by every simulation that uses it.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::TopologyError;

/// Dense node index in `0..node_count`
pub type NodeId = usize;

/// Fixed neighbor lists for every node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    adjacency: Vec<Vec<NodeId>>,
}

impl Topology {
    /// Build from explicit neighbor lists. Neighbor order is kept as given.
    ///
    /// Lists must describe an undirected graph: every `b` in `a`'s list has `a`
    /// in its own list, and no neighbor appears twice.
    pub fn from_adjacency(adjacency: Vec<Vec<NodeId>>) -> Result<Self, TopologyError> {
        let node_count = adjacency.len();
        let mut sets: Vec<BTreeSet<NodeId>> = Vec::with_capacity(node_count);
        for (node, neighbors) in adjacency.iter().enumerate() {
            let mut seen = BTreeSet::new();
            for &neighbor in neighbors {
                if neighbor >= node_count {
                    return Err(TopologyError::NeighborOutOfRange {
                        node,
                        neighbor,
                        node_count,
                    });
                }
                if neighbor == node {
                    return Err(TopologyError::SelfLoop(node));
                }
                if !seen.insert(neighbor) {
                    return Err(TopologyError::DuplicateNeighbor { node, neighbor });
                }
            }
            sets.push(seen);
        }

        for (node, neighbors) in sets.iter().enumerate() {
            if let Some(&neighbor) = neighbors.iter().find(|&&n| !sets[n].contains(&node)) {
                return Err(TopologyError::Asymmetric { node, neighbor });
            }
        }
        Ok(Self { adjacency })
    }

    /// Build an undirected topology from an edge list. Duplicate edges collapse.
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self, TopologyError> {
        let mut sets: Vec<BTreeSet<NodeId>> = vec![BTreeSet::new(); node_count];
        for (a, b) in edges {
            for (node, neighbor) in [(a, b), (b, a)] {
                if node >= node_count || neighbor >= node_count {
                    return Err(TopologyError::NeighborOutOfRange {
                        node: node.min(neighbor),
                        neighbor: node.max(neighbor),
                        node_count,
                    });
                }
            }
            if a == b {
                return Err(TopologyError::SelfLoop(a));
            }
            sets[a].insert(b);
            sets[b].insert(a);
        }
        Ok(Self {
            adjacency: sets.into_iter().map(|s| s.into_iter().collect()).collect(),
        })
    }

    /// Load neighbor lists from a JSON file holding an array of arrays
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let content = fs::read_to_string(path.as_ref())?;
        let adjacency: Vec<Vec<NodeId>> = serde_json::from_str(&content)?;
        Self::from_adjacency(adjacency)
    }

    /// Complete graph on `n` nodes
    pub fn complete(n: usize) -> Self {
        let adjacency = (0..n)
            .map(|i| (0..n).filter(|&j| j != i).collect())
            .collect();
        Self { adjacency }
    }

    /// Simple path `0 - 1 - ... - (n-1)`
    pub fn path(n: usize) -> Self {
        let adjacency = (0..n)
            .map(|i| {
                let mut neighbors = Vec::with_capacity(2);
                if i > 0 {
                    neighbors.push(i - 1);
                }
                if i + 1 < n {
                    neighbors.push(i + 1);
                }
                neighbors
            })
            .collect();
        Self { adjacency }
    }

    /// Lollipop graph: a clique on `0..clique`, a path on `clique..clique + path`,
    /// and a bridge between the last clique node and the first path node.
    pub fn lollipop(clique: usize, path: usize) -> Result<Self, TopologyError> {
        if clique == 0 || path == 0 {
            return Err(TopologyError::InvalidShape {
                shape: "lollipop",
                reason: format!("clique and path must be at least 1 (got {clique}, {path})"),
            });
        }

        let mut adjacency = Self::complete(clique).adjacency;
        for k in 0..path {
            let node = clique + k;
            let mut neighbors = Vec::with_capacity(2);
            if k > 0 {
                neighbors.push(node - 1);
            }
            if k + 1 < path {
                neighbors.push(node + 1);
            }
            adjacency.push(neighbors);
        }

        // Bridge
        adjacency[clique - 1].push(clique);
        adjacency[clique].push(clique - 1);

        Ok(Self { adjacency })
    }

    /// Wrapping 2D grid with the 8-cell Moore neighborhood. Node `(x, y)` is `y * width + x`.
    pub fn torus(width: usize, height: usize) -> Result<Self, TopologyError> {
        if width < 3 || height < 3 {
            return Err(TopologyError::InvalidShape {
                shape: "torus",
                reason: format!("width and height must be at least 3 (got {width}x{height})"),
            });
        }

        let mut adjacency = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let mut neighbors = Vec::with_capacity(8);
                for dy in [height - 1, 0, 1] {
                    for dx in [width - 1, 0, 1] {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = (x + dx) % width;
                        let ny = (y + dy) % height;
                        neighbors.push(ny * width + nx);
                    }
                }
                adjacency.push(neighbors);
            }
        }
        Ok(Self { adjacency })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Neighbors of `node`, in construction order
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node]
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node].len()
    }

    pub fn all_nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.adjacency.len()
    }

    /// Check if two nodes are adjacent
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Number of undirected edges (each listed pair counted once)
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_graph() {
        let topology = Topology::complete(4);
        assert_eq!(topology.node_count(), 4);
        assert_eq!(topology.neighbors(2), &[0, 1, 3]);
        assert_eq!(topology.edge_count(), 6);
    }

    #[test]
    fn test_lollipop_bridge() {
        let topology = Topology::lollipop(3, 4).unwrap();
        assert_eq!(topology.node_count(), 7);
        assert!(topology.are_adjacent(2, 3));
        assert!(topology.are_adjacent(3, 2));
        assert_eq!(topology.degree(0), 2);
        assert_eq!(topology.degree(2), 3);
        assert_eq!(topology.neighbors(6), &[5]);
        // 3 clique edges + 3 path edges + bridge
        assert_eq!(topology.edge_count(), 7);
    }

    #[test]
    fn test_lollipop_rejects_zero_sizes() {
        assert!(Topology::lollipop(0, 5).is_err());
        assert!(Topology::lollipop(5, 0).is_err());
    }

    #[test]
    fn test_torus_wraps() {
        let topology = Topology::torus(4, 3).unwrap();
        assert_eq!(topology.node_count(), 12);
        assert!(topology.all_nodes().all(|n| topology.degree(n) == 8));
        // (0,0) touches (3,2) diagonally through both seams
        assert!(topology.are_adjacent(0, 11));
        assert!(Topology::torus(2, 5).is_err());
    }

    #[test]
    fn test_adjacency_validation() {
        assert!(matches!(
            Topology::from_adjacency(vec![vec![1], vec![5]]),
            Err(TopologyError::NeighborOutOfRange { node: 1, neighbor: 5, .. })
        ));
        assert!(matches!(
            Topology::from_adjacency(vec![vec![0]]),
            Err(TopologyError::SelfLoop(0))
        ));
    }

    #[test]
    fn test_adjacency_rejects_one_way_edges() {
        // 0 lists 1, but 1 does not list 0
        let result = Topology::from_adjacency(vec![vec![1], Vec::new(), vec![1]]);
        assert!(matches!(
            result,
            Err(TopologyError::Asymmetric { node: 0, neighbor: 1 })
        ));
    }

    #[test]
    fn test_adjacency_rejects_duplicate_neighbors() {
        assert!(matches!(
            Topology::from_adjacency(vec![vec![1, 1], vec![0]]),
            Err(TopologyError::DuplicateNeighbor { node: 0, neighbor: 1 })
        ));
    }

    #[test]
    fn test_adjacency_accepts_undirected_lists() {
        let topology = Topology::from_adjacency(vec![vec![2, 1], vec![0], vec![0]]).unwrap();
        assert_eq!(topology.neighbors(0), &[2, 1]);
        assert_eq!(topology.degree(0), 2);
        assert_eq!(topology.edge_count(), 2);
    }

    #[test]
    fn test_from_edges_dedups() {
        let topology = Topology::from_edges(3, [(0, 1), (1, 0), (1, 2)]).unwrap();
        assert_eq!(topology.neighbors(1), &[0, 2]);
        assert_eq!(topology.edge_count(), 2);
        assert!(Topology::from_edges(2, [(0, 2)]).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adjacency.json");
        fs::write(&path, "[[1],[0,2],[1]]").unwrap();

        let topology = Topology::from_json_file(&path).unwrap();
        assert_eq!(topology, Topology::path(3));
    }

    #[test]
    fn test_from_json_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one_way.json");
        fs::write(&path, "[[1],[],[0]]").unwrap();

        assert!(matches!(
            Topology::from_json_file(&path),
            Err(TopologyError::Asymmetric { node: 0, neighbor: 1 })
        ));
    }
}
