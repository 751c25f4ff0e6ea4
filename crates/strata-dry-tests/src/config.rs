// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use strata_config::{ConfigError, ConfigStore};

/// In-memory implementation of [`ConfigStore`] for testing.
///
/// Clones share the same backing map, so a test can hand one clone to a
/// [`ConfigService`](strata_config::ConfigService) and inspect the other.
///
/// # Example
///
/// ```
/// use strata_config::ConfigService;
/// use strata_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
/// service.save("markers", &vec![1, 2, 3]).unwrap();
/// assert_eq!(store.save_count(), 1);
/// assert!(store.contains_key("markers"));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw blobs.
    pub fn with_data(data: HashMap<String, Vec<u8>>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                data,
                ..Inner::default()
            })),
        }
    }

    /// Store holding one JSON document under `key`.
    pub fn with_json(key: &str, json: &str) -> Self {
        Self::with_data(HashMap::from([(key.to_owned(), json.as_bytes().to_vec())]))
    }

    /// Make every subsequent load fail with `ConfigError::Other`.
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Make every subsequent save fail with `ConfigError::Other`.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// Number of `load_raw` attempts, failed ones included.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` attempts, failed ones included.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Whether `key` holds a blob.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Raw blob stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
