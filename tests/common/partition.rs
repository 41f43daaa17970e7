//! Partition helpers: compare groupings independent of label numbering

use contact_merge::ContactGroup;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Ids of each group's records, in group order and record order
pub fn group_ids(groups: &[ContactGroup<'_, Value>]) -> Vec<Vec<u64>> {
    groups
        .iter()
        .map(|g| g.iter().map(record_id).collect())
        .collect()
}

/// The grouping as a set of sets, ignoring every ordering
pub fn partition(groups: &[ContactGroup<'_, Value>]) -> BTreeSet<BTreeSet<u64>> {
    group_ids(groups)
        .into_iter()
        .map(|ids| ids.into_iter().collect())
        .collect()
}

pub fn record_id(record: &Value) -> u64 {
    record["id"].as_u64().expect("fixture record without id")
}

/// Reference partition computed by brute-force pairwise union
///
/// Two records are joined when they share a non-blank phone or a
/// non-blank email; records with neither stay alone.
pub fn expected_partition(records: &[Value]) -> BTreeSet<BTreeSet<u64>> {
    let mut parent: Vec<usize> = (0..records.len()).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    let field = |r: &Value, name: &str| -> Option<String> {
        r.get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };

    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let shares = |name: &str| {
                matches!((field(&records[i], name), field(&records[j], name)), (Some(a), Some(b)) if a == b)
            };
            if shares("phone") || shares("email") {
                let (a, b) = (find(&mut parent, i), find(&mut parent, j));
                parent[a] = b;
            }
        }
    }

    let mut sets: HashMap<usize, BTreeSet<u64>> = HashMap::new();
    for i in 0..records.len() {
        let root = find(&mut parent, i);
        sets.entry(root).or_default().insert(record_id(&records[i]));
    }
    sets.into_values().collect()
}
