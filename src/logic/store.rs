use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage quota exceeded: {needed} bytes needed, {available} available")]
    QuotaExceeded { needed: usize, available: usize },
}

/// A string key-value sink for saved plots. The editor only ever writes; it
/// makes no assumption that the data outlives the process.
pub trait PlotStore {
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// In-memory stand-in for browser local storage, with an optional byte quota
/// counted over keys and values.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl PlotStore for LocalStore {
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            let replaced = self.items.get(key).map_or(0, |v| key.len() + v.len());
            let available = quota.saturating_sub(self.used_bytes() - replaced);
            let needed = key.len() + value.len();
            if needed > available {
                return Err(StoreError::QuotaExceeded { needed, available });
            }
        }
        self.items.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut store = LocalStore::new();
        store.set_item("garden-plot-1", "{}".into()).unwrap();
        assert_eq!(store.get_item("garden-plot-1"), Some("{}"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_quota_exceeded_leaves_store_unchanged() {
        let mut store = LocalStore::with_quota(16);
        let err = store.set_item("garden-plot-1", "x".repeat(32)).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_overwrite_counts_only_new_value() {
        let mut store = LocalStore::with_quota(10);
        store.set_item("k", "123456789".into()).unwrap();
        store.set_item("k", "abcdefghi".into()).unwrap();
        assert_eq!(store.get_item("k"), Some("abcdefghi"));
    }
}
