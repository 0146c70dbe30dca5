//! Dictionary of unique undirected edges.
//!
//! Every edge is stored in canonical `(min, max)` order and receives a dense
//! id in first-insertion order, so the ids of a freshly built map are always
//! exactly `0..len()`. Subdivision uses the id as the offset of the midpoint
//! vertex it introduces for that edge.

use std::collections::HashMap;

use super::error::ShapeError;

/// Canonical form of the undirected edge `(a, b)`.
#[must_use]
pub fn canonical_edge(a: usize, b: usize) -> [usize; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

/// Undirected edge dictionary with dense ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeMap {
    ids: HashMap<[usize; 2], usize>,
    edges: Vec<[usize; 2]>,
}

impl EdgeMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map over all line edges followed by all triangle edges.
    ///
    /// Triangle edges are visited as `(v0, v1)`, `(v1, v2)`, `(v2, v0)`.
    #[must_use]
    pub fn from_elements(lines: &[[usize; 2]], triangles: &[[usize; 3]]) -> Self {
        let mut map = Self::new();
        for &[a, b] in lines {
            map.insert(a, b);
        }
        for triangle in triangles {
            for i in 0..3 {
                map.insert(triangle[i], triangle[(i + 1) % 3]);
            }
        }
        log::debug!(
            "edge map: {} unique edges from {} lines and {} triangles",
            map.len(),
            lines.len(),
            triangles.len()
        );
        map
    }

    /// Inserts the edge if absent and returns its id.
    ///
    /// Re-inserting an existing edge (in either direction) returns the
    /// original id and leaves the map unchanged.
    pub fn insert(&mut self, a: usize, b: usize) -> usize {
        let key = canonical_edge(a, b);
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.edges.len();
        self.ids.insert(key, id);
        self.edges.push(key);
        id
    }

    #[must_use]
    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.ids.contains_key(&canonical_edge(a, b))
    }

    /// Returns the id assigned to the edge.
    pub fn lookup(&self, a: usize, b: usize) -> Result<usize, ShapeError> {
        self.ids
            .get(&canonical_edge(a, b))
            .copied()
            .ok_or(ShapeError::EdgeNotFound { a, b })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Canonical edges indexed by id.
    #[must_use]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Iterates `(canonical_edge, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = ([usize; 2], usize)> + '_ {
        self.edges.iter().enumerate().map(|(id, &edge)| (edge, id))
    }
}
