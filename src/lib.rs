//! Contact Merge: deduplication through shared identities
//!
//! Contacts that share a phone number or an email address, directly or
//! through a chain of other contacts, describe the same person. Each
//! distinct phone and email becomes a vertex in an undirected graph,
//! the phone and email of one contact are joined by an edge, and the
//! connected components of that graph decide the groups.
//!
//! # Core Concepts
//!
//! - **Vertices**: one per distinct (kind, value), e.g. `phone:123-456-7890`
//! - **Components**: labeled by an iterative depth-first walk
//! - **Groups**: records bucketed by the component of their phone (or email);
//!   records with neither get a group of their own
//!
//! # Example
//!
//! ```
//! use contact_merge::{merge_contacts, Contact};
//!
//! let contacts = vec![
//!     Contact::new().with_phone("1").with_email("a"),
//!     Contact::new().with_phone("1").with_email("b"),
//!     Contact::new().with_phone("2").with_email("b"),
//!     Contact::new(),
//! ];
//! let groups = merge_contacts(&contacts).unwrap();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].len(), 3);
//! ```

pub mod config;
mod error;
mod graph;
mod group;
mod record;
pub mod report;

pub use config::{MergeConfig, OutputFormat};
pub use error::{MergeError, MergeResult};
pub use graph::{ComponentLabel, IdentityGraph, IdentityVertex, VertexId, VertexKey, VertexKind};
pub use group::{
    merge, merge_contacts, ContactGroup, GroupAssigner, GroupKey, MergeOutcome, SingletonCounter,
};
pub use record::{Contact, FieldNames, Identified, MappedRecord};
pub use report::MergeSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
