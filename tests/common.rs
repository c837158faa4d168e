#![allow(dead_code)]
//! Shared helpers for `category-filter` integration tests.

use anyhow::{Result, bail};
use category_filter::*;

pub fn memory_session(host_expression: &str) -> FilterSession<MemoryStore> {
    FilterSession::open(Catalog::open(MemoryStore::new()), host_expression)
}

pub fn state_of<S: KeyValueStore>(session: &FilterSession<S>, name: &str) -> Option<TriState> {
    session.state().get(name)
}

pub fn classification(expression: &str) -> (Vec<String>, Vec<String>) {
    let parsed = parse(expression);
    (
        parsed.included().map(|n| n.as_str().to_string()).collect(),
        parsed.excluded().map(|n| n.as_str().to_string()).collect(),
    )
}

/// Every subset of `names`, in bitmask order.
pub fn subsets<'a>(names: &[&'a str]) -> Vec<Vec<&'a str>> {
    (0u32..1 << names.len())
        .map(|mask| {
            names
                .iter()
                .enumerate()
                .filter(|(idx, _)| mask & (1 << idx) != 0)
                .map(|(_, name)| *name)
                .collect()
        })
        .collect()
}

/// Storage that rejects every read and write.
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("storage unavailable")
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        bail!("storage unavailable")
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        bail!("storage unavailable")
    }
}
