//! Partition, connectivity, and ordering properties over generated inputs
//!
//! Records draw phones and emails from small pools so that chains and
//! collisions are common. Each case is checked against a brute-force
//! pairwise union of the same records.

mod common;

use common::{expected_partition, group_ids, partition, record_id, tagged};
use contact_merge::{merge, merge_contacts, IdentityGraph, VertexKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::collections::HashSet;

const CASES: u64 = 64;

fn random_records(rng: &mut StdRng, count: usize) -> Vec<Value> {
    let pick = |rng: &mut StdRng, prefix: &str, pool: usize| -> Option<String> {
        match rng.gen_range(0..10) {
            0..=2 => None,
            3 => Some("   ".to_string()),
            _ => Some(format!("{}{}", prefix, rng.gen_range(0..pool))),
        }
    };
    (0..count)
        .map(|id| {
            let phone = pick(rng, "555-", count / 2 + 1);
            let email = pick(rng, "user@", count / 2 + 1);
            tagged(id, phone.as_deref(), email.as_deref())
        })
        .collect()
}

#[test]
fn groups_match_pairwise_union() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..CASES {
        let count = rng.gen_range(0..40);
        let records = random_records(&mut rng, count);
        let groups = merge_contacts(&records).unwrap();
        assert_eq!(partition(&groups), expected_partition(&records), "input: {:?}", records);
    }
}

#[test]
fn every_record_appears_exactly_once() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..CASES {
        let records = random_records(&mut rng, 30);
        let groups = merge_contacts(&records).unwrap();

        let mut seen: Vec<*const Value> = groups
            .iter()
            .flat_map(|g| g.iter().map(|r| r as *const Value))
            .collect();
        assert_eq!(seen.len(), records.len());
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), records.len());
        assert!(groups.iter().all(|g| !g.is_empty()));
    }
}

#[test]
fn partition_is_independent_of_input_order() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..CASES {
        let records = random_records(&mut rng, 25);
        let baseline = partition(&merge_contacts(&records).unwrap());

        let mut shuffled = records.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(partition(&merge_contacts(&shuffled).unwrap()), baseline);
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut rng = StdRng::seed_from_u64(7);
    let records = random_records(&mut rng, 50);

    let first = merge_contacts(&records).unwrap();
    let second = merge_contacts(&records).unwrap();

    assert_eq!(group_ids(&first), group_ids(&second));
    let keys = |groups: &[contact_merge::ContactGroup<'_, Value>]| -> Vec<String> {
        groups.iter().map(|g| g.key.to_string()).collect()
    };
    assert_eq!(keys(&first), keys(&second));
}

#[test]
fn input_order_is_kept_within_groups() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..CASES {
        let records = random_records(&mut rng, 30);
        for ids in group_ids(&merge_contacts(&records).unwrap()) {
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "out of order: {:?}", ids);
        }
    }
}

#[test]
fn groups_appear_in_first_seen_order() {
    let mut rng = StdRng::seed_from_u64(3);
    let records = random_records(&mut rng, 40);
    let firsts: Vec<u64> = group_ids(&merge_contacts(&records).unwrap())
        .into_iter()
        .map(|ids| ids[0])
        .collect();
    assert!(firsts.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn unidentified_records_are_alone() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..CASES {
        let records = random_records(&mut rng, 20);
        let outcome = merge(&records).unwrap();

        let mut singletons = HashSet::new();
        for group in &outcome.groups {
            if group.key.is_singleton() {
                assert_eq!(group.len(), 1);
                assert!(singletons.insert(group.key));
                let record = group.records[0];
                let blank = |f: &str| record[f].as_str().map_or(true, |s| s.trim().is_empty());
                assert!(blank("phone") && blank("email"), "record {}", record_id(record));
            }
        }
    }
}

#[test]
fn edge_insertion_order_does_not_change_components() {
    let mut rng = StdRng::seed_from_u64(17);
    let records = random_records(&mut rng, 30);
    let mut shuffled = records.clone();
    shuffled.shuffle(&mut rng);

    let mut a = IdentityGraph::from_records(&records).unwrap();
    let mut b = IdentityGraph::from_records(&shuffled).unwrap();
    a.label_components().unwrap();
    b.label_components().unwrap();

    assert_eq!(a.vertex_count(), b.vertex_count());
    assert_eq!(a.edge_count(), b.edge_count());
    assert_eq!(a.component_count(), b.component_count());

    // Same vertices share a component in both graphs
    for (_, x) in a.vertices() {
        for (_, y) in a.vertices() {
            let same_a = x.label() == y.label();
            let label_b = |kind: VertexKind, value: &str| b.label_of(kind, value).unwrap();
            let same_b = label_b(x.kind(), x.value()) == label_b(y.kind(), y.value());
            assert_eq!(same_a, same_b, "{} / {}", x.key(), y.key());
        }
    }
}
