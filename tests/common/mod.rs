//! Common test utilities for merge integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod partition;

pub use fixtures::{sample_address_book, tagged};
pub use partition::{expected_partition, group_ids, partition, record_id};
