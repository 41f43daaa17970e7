//! Rendering merged groups and summarizing a merge run

use crate::config::OutputFormat;
use crate::error::MergeResult;
use crate::group::{ContactGroup, MergeOutcome};
use serde::Serialize;
use std::fmt::Write;

/// Render groups in the requested format
pub fn render<R: Serialize>(groups: &[ContactGroup<'_, R>], format: OutputFormat) -> MergeResult<String> {
    match format {
        OutputFormat::Text => render_text(groups),
        OutputFormat::Json => render_json(groups),
    }
}

/// Numbered listing: a blank line and the group index, then each record
/// as compact JSON indented beneath it
pub fn render_text<R: Serialize>(groups: &[ContactGroup<'_, R>]) -> MergeResult<String> {
    let mut out = String::new();
    for (i, group) in groups.iter().enumerate() {
        write!(out, "\n{}\n", i)?;
        for record in group.iter() {
            writeln!(out, "    {}", serde_json::to_string(record)?)?;
        }
    }
    Ok(out)
}

/// Pretty JSON array of `{"key": ..., "records": [...]}`
pub fn render_json<R: Serialize>(groups: &[ContactGroup<'_, R>]) -> MergeResult<String> {
    Ok(serde_json::to_string_pretty(groups)?)
}

/// Counts describing one merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub records: usize,
    pub groups: usize,
    /// Groups holding records with no phone or email
    pub unconnected: usize,
    pub largest_group: usize,
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
}

impl MergeSummary {
    pub fn from_outcome<R>(outcome: &MergeOutcome<'_, R>) -> Self {
        let groups = &outcome.groups;
        Self {
            records: groups.iter().map(|g| g.len()).sum(),
            groups: groups.len(),
            unconnected: groups.iter().filter(|g| g.key.is_singleton()).count(),
            largest_group: groups.iter().map(|g| g.len()).max().unwrap_or(0),
            vertices: outcome.graph.vertex_count(),
            edges: outcome.graph.edge_count(),
            components: outcome.graph.component_count(),
        }
    }

    /// Records folded into another record's group
    pub fn duplicates(&self) -> usize {
        self.records - self.groups
    }
}

impl std::fmt::Display for MergeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<14}{:>8}", "records", self.records)?;
        writeln!(f, "{:<14}{:>8}", "groups", self.groups)?;
        writeln!(f, "{:<14}{:>8}", "duplicates", self.duplicates())?;
        writeln!(f, "{:<14}{:>8}", "unconnected", self.unconnected)?;
        writeln!(f, "{:<14}{:>8}", "largest group", self.largest_group)?;
        writeln!(f, "{:<14}{:>8}", "vertices", self.vertices)?;
        writeln!(f, "{:<14}{:>8}", "edges", self.edges)?;
        write!(f, "{:<14}{:>8}", "components", self.components)
    }
}
