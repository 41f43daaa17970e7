//! IdentityGraph: vertices for shared identifiers, edges for co-occurrence

use super::vertex::{ComponentLabel, IdentityVertex, VertexId, VertexKey, VertexKind};
use crate::error::{MergeError, MergeResult};
use crate::record::Identified;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Undirected graph over the phone numbers and email addresses of a batch
///
/// Vertices are stored in creation order; a [`VertexId`] is the position
/// of a vertex in that order and is only meaningful for the graph that
/// issued it. The graph only grows: vertices and edges are never removed.
#[derive(Debug, Clone, Default)]
pub struct IdentityGraph {
    vertices: Vec<IdentityVertex>,
    index: HashMap<VertexKey, VertexId>,
    edge_count: usize,
    component_count: usize,
}

impl IdentityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a batch of records
    ///
    /// Every non-blank phone and email becomes a vertex, and the two are
    /// connected when a record carries both.
    pub fn from_records<R: Identified>(records: &[R]) -> MergeResult<Self> {
        let mut graph = Self::new();
        graph.build_from_records(records)?;
        Ok(graph)
    }

    /// Return the vertex for (kind, value), creating it on first reference
    ///
    /// Blank values are rejected with [`MergeError::EmptyIdentifier`].
    pub fn get_or_create_vertex(&mut self, kind: VertexKind, value: &str) -> MergeResult<VertexId> {
        let key = VertexKey::new(kind, value)?;
        if let Some(id) = self.index.get(&key) {
            return Ok(*id);
        }
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(IdentityVertex::new(key.clone()));
        self.index.insert(key, id);
        Ok(id)
    }

    /// Connect two vertices in both directions
    ///
    /// Returns false when the edge already existed. A vertex may be
    /// connected to itself; labeling treats that as a no-op. Ids not
    /// issued by this graph are rejected with [`MergeError::UnknownVertex`].
    pub fn connect(&mut self, a: VertexId, b: VertexId) -> MergeResult<bool> {
        for id in [a, b] {
            if id.index() >= self.vertices.len() {
                return Err(MergeError::UnknownVertex(id));
            }
        }
        let added = self.vertices[a.index()].add_neighbor(b);
        self.vertices[b.index()].add_neighbor(a);
        if added {
            self.edge_count += 1;
        }
        Ok(added)
    }

    /// Add the vertices and edges contributed by each record
    pub fn build_from_records<R: Identified>(&mut self, records: &[R]) -> MergeResult<()> {
        for record in records {
            let phone = match record.phone()? {
                Some(value) => Some(self.get_or_create_vertex(VertexKind::Phone, value)?),
                None => None,
            };
            let email = match record.email()? {
                Some(value) => Some(self.get_or_create_vertex(VertexKind::Email, value)?),
                None => None,
            };
            if let (Some(phone), Some(email)) = (phone, email) {
                self.connect(phone, email)?;
            }
        }
        debug!(
            records = records.len(),
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "built identity graph"
        );
        Ok(())
    }

    /// Assign every unlabeled vertex the label of its connected component
    ///
    /// Vertices are visited in creation order. Each unlabeled vertex seeds
    /// a depth-first walk on an explicit stack over the unlabeled vertices
    /// reachable from it, so component size is bounded by memory rather
    /// than call depth. The region takes the label of an already labeled
    /// vertex it touches, or else a fresh label numbered from 1 in
    /// discovery order.
    ///
    /// Edges added after an earlier call can join two labeled components;
    /// such a split is reported as [`MergeError::SplitComponent`] rather
    /// than left with two labels.
    ///
    /// Returns the number of fresh labels issued by this call.
    pub fn label_components(&mut self) -> MergeResult<usize> {
        let mut labeled = 0;
        let mut visited = vec![false; self.vertices.len()];
        let mut stack: Vec<VertexId> = Vec::new();

        for start in 0..self.vertices.len() {
            if visited[start] || self.vertices[start].label().is_some() {
                continue;
            }

            let mut region: Vec<VertexId> = Vec::new();
            let mut existing: Option<ComponentLabel> = None;
            visited[start] = true;
            stack.push(VertexId::new(start));

            while let Some(current) = stack.pop() {
                region.push(current);
                for neighbor in self.vertices[current.index()].neighbors() {
                    if let Some(label) = self.vertices[neighbor.index()].label() {
                        existing = Some(existing.map_or(label, |e| e.min(label)));
                    } else if !visited[neighbor.index()] {
                        visited[neighbor.index()] = true;
                        stack.push(neighbor);
                    }
                }
            }

            let label = match existing {
                Some(label) => label,
                None => {
                    self.component_count += 1;
                    labeled += 1;
                    ComponentLabel::new(self.component_count as u64)
                }
            };
            for id in region {
                self.vertices[id.index()].assign_label(label)?;
            }
        }

        self.check_labels()?;

        debug!(
            components = labeled,
            vertices = self.vertex_count(),
            "labeled connected components"
        );
        Ok(labeled)
    }

    /// Every edge must join two vertices with the same label
    fn check_labels(&self) -> MergeResult<()> {
        for (id, vertex) in self.vertices() {
            for neighbor in vertex.neighbors().filter(|n| *n > id) {
                let other = &self.vertices[neighbor.index()];
                if let (Some(left_label), Some(right_label)) = (vertex.label(), other.label()) {
                    if left_label != right_label {
                        return Err(MergeError::SplitComponent {
                            left: vertex.key().clone(),
                            left_label,
                            right: other.key().clone(),
                            right_label,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Look up a vertex id without creating it
    pub fn find(&self, kind: VertexKind, value: &str) -> Option<VertexId> {
        let key = VertexKey::new(kind, value).ok()?;
        self.index.get(&key).copied()
    }

    /// Get a vertex by id
    pub fn vertex(&self, id: VertexId) -> Option<&IdentityVertex> {
        self.vertices.get(id.index())
    }

    /// All vertices in creation order
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &IdentityVertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId::new(i), v))
    }

    /// Component label of the vertex for (kind, value)
    ///
    /// Fails with [`MergeError::Unlabeled`] if the vertex is unknown or
    /// labeling has not reached it.
    pub fn label_of(&self, kind: VertexKind, value: &str) -> MergeResult<ComponentLabel> {
        let key = VertexKey::new(kind, value)?;
        self.index
            .get(&key)
            .and_then(|id| self.vertices[id.index()].label())
            .ok_or(MergeError::Unlabeled(key))
    }

    /// Vertex ids grouped by component, in label order
    pub fn components(&self) -> Vec<(ComponentLabel, Vec<VertexId>)> {
        let mut by_label: BTreeMap<ComponentLabel, Vec<VertexId>> = BTreeMap::new();
        for (id, vertex) in self.vertices() {
            if let Some(label) = vertex.label() {
                by_label.entry(label).or_default().push(id);
            }
        }
        by_label.into_iter().collect()
    }

    /// True once every vertex carries a label
    pub fn is_labeled(&self) -> bool {
        self.vertices.iter().all(|v| v.label().is_some())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct undirected edges, self-loops included
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn component_count(&self) -> usize {
        self.component_count
    }
}
