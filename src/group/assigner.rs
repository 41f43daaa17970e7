//! GroupAssigner: derive a key per record and bucket records by key

use super::key::{GroupKey, SingletonCounter};
use crate::error::MergeResult;
use crate::graph::{ComponentLabel, IdentityGraph, VertexKind};
use crate::record::Identified;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Records sharing one group key, in input order
#[derive(Debug, Clone, Serialize)]
pub struct ContactGroup<'a, R> {
    pub key: GroupKey,
    pub records: Vec<&'a R>,
}

impl<'a, R> ContactGroup<'a, R> {
    fn new(key: GroupKey) -> Self {
        Self {
            key,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.records.iter().copied()
    }
}

/// Assigns records to groups using a labeled identity graph
#[derive(Debug, Clone, Copy)]
pub struct GroupAssigner<'g> {
    graph: &'g IdentityGraph,
}

impl<'g> GroupAssigner<'g> {
    /// The graph should already be built from the same records and labeled
    pub fn new(graph: &'g IdentityGraph) -> Self {
        Self { graph }
    }

    /// Key for one record
    ///
    /// The phone's component wins, then the email's. A record with neither
    /// gets a fresh singleton key from `counter`. If the email does not
    /// resolve to the phone's component the divergence is logged and the
    /// phone's label is used.
    pub fn derive_key<R: Identified>(
        &self,
        record: &R,
        counter: &mut SingletonCounter,
    ) -> MergeResult<GroupKey> {
        let phone = record.phone()?;
        let email = record.email()?;

        match (phone, email) {
            (Some(phone), email) => {
                let label = self.graph.label_of(VertexKind::Phone, phone)?;
                if let Some(email) = email {
                    if let Some(mismatch) = self.email_mismatch(label, email) {
                        warn!(
                            phone,
                            email,
                            %label,
                            %mismatch,
                            "phone and email do not resolve to the same component, using phone"
                        );
                    }
                }
                Ok(GroupKey::Component(label))
            }
            (None, Some(email)) => Ok(GroupKey::Component(
                self.graph.label_of(VertexKind::Email, email)?,
            )),
            (None, None) => Ok(counter.next_key()),
        }
    }

    /// Why the email does not confirm the phone's label, if it does not
    ///
    /// An email with no vertex or no label counts as a mismatch, the same
    /// as one labeled with a different component.
    fn email_mismatch(&self, label: ComponentLabel, email: &str) -> Option<String> {
        match self.graph.label_of(VertexKind::Email, email) {
            Ok(email_label) if email_label == label => None,
            Ok(email_label) => Some(format!("email labeled {}", email_label)),
            Err(e) => Some(e.to_string()),
        }
    }

    /// Bucket records by key
    ///
    /// Groups appear in the order their key is first seen, and records keep
    /// their input order within a group. Matching records need not be
    /// adjacent in the input.
    pub fn group<'a, R: Identified>(
        &self,
        records: &'a [R],
        counter: &mut SingletonCounter,
    ) -> MergeResult<Vec<ContactGroup<'a, R>>> {
        let mut groups: Vec<ContactGroup<'a, R>> = Vec::new();
        let mut positions: HashMap<GroupKey, usize> = HashMap::new();

        for record in records {
            let key = self.derive_key(record, counter)?;
            let position = *positions.entry(key).or_insert_with(|| {
                groups.push(ContactGroup::new(key));
                groups.len() - 1
            });
            groups[position].records.push(record);
        }

        debug!(records = records.len(), groups = groups.len(), "grouped records");
        Ok(groups)
    }
}
