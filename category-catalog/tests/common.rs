#![allow(dead_code)]
//! Shared helpers for `category-catalog` integration tests.

use anyhow::{Result, bail};
use category_catalog::*;
use category_syntax::CategoryName;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Every operation fails, like storage that is disabled or full.
#[derive(Default)]
pub struct FailingStore {
    pub attempts: usize,
}

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        bail!("storage unavailable")
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        self.attempts += 1;
        bail!("storage unavailable")
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        self.attempts += 1;
        bail!("storage unavailable")
    }
}

/// Reads succeed, writes fail.
#[derive(Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        bail!("read-only")
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        bail!("read-only")
    }
}

pub fn listed<S: KeyValueStore>(catalog: &Catalog<S>) -> Vec<String> {
    catalog
        .names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

pub fn sorted_defaults() -> Vec<String> {
    let mut defaults: Vec<String> = DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect();
    defaults.sort();
    defaults
}

pub fn name(text: &str) -> CategoryName {
    CategoryName::new(text).unwrap()
}
