//! Group keys and the singleton counter

use crate::graph::ComponentLabel;
use serde::{Serialize, Serializer};

/// Key that decides which group a record lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// Shared by every record whose identifiers fall in this component
    Component(ComponentLabel),
    /// Minted for a record with no identifiers; never shared
    Singleton(u64),
}

impl GroupKey {
    pub fn is_singleton(&self) -> bool {
        matches!(self, GroupKey::Singleton(_))
    }

    pub fn label(&self) -> Option<ComponentLabel> {
        match self {
            GroupKey::Component(label) => Some(*label),
            GroupKey::Singleton(_) => None,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Component(label) => write!(f, "{}", label),
            GroupKey::Singleton(n) => write!(f, "Unconnected:{}", n),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Source of singleton keys for one merge run
///
/// Passed explicitly to key derivation so that every key drawn from the
/// same counter is distinct.
#[derive(Debug, Clone, Default)]
pub struct SingletonCounter {
    next: u64,
}

impl SingletonCounter {
    /// Counter starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Mint a key no earlier call on this counter has returned
    pub fn next_key(&mut self) -> GroupKey {
        let key = GroupKey::Singleton(self.next);
        self.next += 1;
        key
    }

    /// The value the next key will carry
    pub fn peek(&self) -> u64 {
        self.next
    }
}
