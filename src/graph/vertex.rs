//! Identity vertices: one per distinct (kind, value) pair

use crate::error::{MergeError, MergeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The identifying field a vertex was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexKind {
    Phone,
    Email,
}

impl VertexKind {
    /// Both kinds, in key-derivation precedence order
    pub const ALL: [VertexKind; 2] = [VertexKind::Phone, VertexKind::Email];

    pub fn as_str(&self) -> &'static str {
        match self {
            VertexKind::Phone => "phone",
            VertexKind::Email => "email",
        }
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a vertex within the graph
///
/// Values are scoped by kind, so a phone "42" and an email "42" are
/// distinct vertices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexKey {
    pub kind: VertexKind,
    pub value: String,
}

impl VertexKey {
    /// Create a key, rejecting empty or whitespace-only values
    pub fn new(kind: VertexKind, value: impl Into<String>) -> MergeResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(MergeError::EmptyIdentifier { kind });
        }
        Ok(Self { kind, value })
    }

    pub fn phone(value: impl Into<String>) -> MergeResult<Self> {
        Self::new(VertexKind::Phone, value)
    }

    pub fn email(value: impl Into<String>) -> MergeResult<Self> {
        Self::new(VertexKind::Email, value)
    }
}

impl std::fmt::Display for VertexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Position of a vertex in its graph's creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(usize);

impl VertexId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Label of a connected component, numbered from 1 in discovery order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentLabel(u64);

impl ComponentLabel {
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    pub fn number(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ComponentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component:{}", self.0)
    }
}

/// A phone number or email address in the identity graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityVertex {
    key: VertexKey,
    neighbors: BTreeSet<VertexId>,
    label: Option<ComponentLabel>,
}

impl IdentityVertex {
    pub(crate) fn new(key: VertexKey) -> Self {
        Self {
            key,
            neighbors: BTreeSet::new(),
            label: None,
        }
    }

    pub fn key(&self) -> &VertexKey {
        &self.key
    }

    pub fn kind(&self) -> VertexKind {
        self.key.kind
    }

    pub fn value(&self) -> &str {
        &self.key.value
    }

    /// Directly connected vertices, in ascending creation order
    pub fn neighbors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn is_adjacent(&self, other: VertexId) -> bool {
        self.neighbors.contains(&other)
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Component label, absent until labeling has run
    pub fn label(&self) -> Option<ComponentLabel> {
        self.label
    }

    /// Returns true if the neighbor was not already present
    pub(crate) fn add_neighbor(&mut self, id: VertexId) -> bool {
        self.neighbors.insert(id)
    }

    /// Set the label once. Re-applying the same label is accepted.
    pub(crate) fn assign_label(&mut self, label: ComponentLabel) -> MergeResult<()> {
        match self.label {
            None => {
                self.label = Some(label);
                Ok(())
            }
            Some(existing) if existing == label => Ok(()),
            Some(existing) => Err(MergeError::Relabel {
                key: self.key.clone(),
                existing,
                attempted: label,
            }),
        }
    }
}
