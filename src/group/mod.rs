//! Grouping records by the component of their identifiers

mod assigner;
mod key;

pub use assigner::{ContactGroup, GroupAssigner};
pub use key::{GroupKey, SingletonCounter};

use crate::error::MergeResult;
use crate::graph::IdentityGraph;
use crate::record::Identified;

/// Result of a full merge run: the labeled graph and the groups it produced
#[derive(Debug, Clone)]
pub struct MergeOutcome<'a, R> {
    pub graph: IdentityGraph,
    pub groups: Vec<ContactGroup<'a, R>>,
}

/// Build the identity graph, label its components, and group the records
pub fn merge<R: Identified>(records: &[R]) -> MergeResult<MergeOutcome<'_, R>> {
    let mut graph = IdentityGraph::from_records(records)?;
    graph.label_components()?;
    let groups = GroupAssigner::new(&graph).group(records, &mut SingletonCounter::new())?;
    Ok(MergeOutcome { graph, groups })
}

/// Group records that share a phone or email, directly or transitively
///
/// Returns references to the input records. Every record appears in
/// exactly one group; records with neither identifier are alone.
pub fn merge_contacts<R: Identified>(records: &[R]) -> MergeResult<Vec<ContactGroup<'_, R>>> {
    Ok(merge(records)?.groups)
}
