//! Undirected concept graph and hop distances.
//!
//! Vertices are concept URIs numbered in ascending lexicographic order.
//! Edges come from parent links and related links; both are treated as
//! mutual regardless of the direction they were stated in. Adjacency is
//! stored compressed: the neighbors of vertex `v` are the sorted,
//! deduplicated slice `neighbors[offsets[v]..offsets[v + 1]]`.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use tracing::{debug, info};

use crate::builder::ConceptModel;
use crate::defaults::UNREACHABLE;
use crate::error::{Error, Result};

/// Read-only graph view over a [`ConceptModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptGraph {
    uris: Vec<String>,
    index: HashMap<String, usize>,
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl ConceptGraph {
    pub fn from_model(model: &ConceptModel) -> Self {
        // BTreeMap iteration is already ascending by URI; this is the one
        // place the canonical order is fixed.
        let uris: Vec<String> = model.concepts.keys().cloned().collect();
        let index: HashMap<String, usize> = uris
            .iter()
            .enumerate()
            .map(|(i, uri)| (uri.clone(), i))
            .collect();

        let mut edges: Vec<(usize, usize)> = Vec::new();
        for (u, concept) in model.concepts.values().enumerate() {
            let targets = concept
                .parent_uri
                .iter()
                .chain(concept.related_uris.iter());
            for target in targets {
                if let Some(&v) = index.get(target) {
                    edges.push((u, v));
                }
            }
        }

        let graph = Self::from_edges(uris, index, &edges);
        debug!(
            vertex_count = graph.vertex_count(),
            edge_count = graph.edge_count(),
            "Concept graph built"
        );
        graph
    }

    fn from_edges(
        uris: Vec<String>,
        index: HashMap<String, usize>,
        edges: &[(usize, usize)],
    ) -> Self {
        let n = uris.len();
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(u, v) in edges {
            if u == v {
                continue;
            }
            lists[u].push(v);
            lists[v].push(u);
        }

        let mut offsets = Vec::with_capacity(n + 1);
        let mut neighbors = Vec::new();
        offsets.push(0);
        for mut list in lists {
            list.sort_unstable();
            list.dedup();
            neighbors.extend(list);
            offsets.push(neighbors.len());
        }

        Self {
            uris,
            index,
            offsets,
            neighbors,
        }
    }

    /// Concept URIs in vertex order.
    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    pub fn index_of(&self, uri: &str) -> Option<usize> {
        self.index.get(uri).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.uris.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Sorted neighbor indices of `vertex`, `None` when out of range.
    pub fn neighbors(&self, vertex: usize) -> Option<&[usize]> {
        (vertex < self.vertex_count()).then(|| self.adjacent(vertex))
    }

    fn adjacent(&self, vertex: usize) -> &[usize] {
        &self.neighbors[self.offsets[vertex]..self.offsets[vertex + 1]]
    }

    /// Hop count from `source` to every vertex, `-1` where unreachable.
    pub fn distances_from(&self, source: usize) -> Result<Vec<i32>> {
        let n = self.vertex_count();
        if source >= n {
            return Err(Error::VertexOutOfRange { index: source, len: n });
        }
        Ok(self.bfs(source))
    }

    fn bfs(&self, source: usize) -> Vec<i32> {
        let mut dist = vec![UNREACHABLE; self.vertex_count()];
        let mut queue = VecDeque::new();
        dist[source] = 0;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            let next = dist[u] + 1;
            for &v in self.adjacent(u) {
                if dist[v] == UNREACHABLE {
                    dist[v] = next;
                    queue.push_back(v);
                }
            }
        }

        dist
    }

    /// `data[i][j]` is the hop count between vertex `i` and vertex `j`.
    pub fn full_distance_matrix(&self) -> Vec<Vec<i32>> {
        let start = Instant::now();
        let rows: Vec<Vec<i32>> = (0..self.vertex_count()).map(|u| self.bfs(u)).collect();
        info!(
            vertex_count = self.vertex_count(),
            edge_count = self.edge_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Distance matrix computed"
        );
        rows
    }

    /// Number of connected components, isolated vertices included.
    pub fn component_count(&self) -> usize {
        let n = self.vertex_count();
        let mut seen = vec![false; n];
        let mut stack = Vec::new();
        let mut components = 0;

        for root in 0..n {
            if seen[root] {
                continue;
            }
            components += 1;
            seen[root] = true;
            stack.push(root);
            while let Some(u) = stack.pop() {
                for &v in self.adjacent(u) {
                    if !seen[v] {
                        seen[v] = true;
                        stack.push(v);
                    }
                }
            }
        }

        components
    }
}
