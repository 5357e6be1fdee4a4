use nway_cache::StoreError;
use nway_cache::common::StoreResult;
use nway_cache::store::BackingStore;

/// Store whose every call fails.
#[derive(Debug, Default)]
pub struct FailingStore {
    /// Calls made so far, all of which failed.
    pub calls: usize,
}

impl FailingStore {
    fn fail<T>(&mut self) -> StoreResult<T> {
        self.calls += 1;
        Err(StoreError::new("store offline"))
    }
}

impl<K, V> BackingStore<K, V> for FailingStore {
    fn put(&mut self, _key: K, _value: V) -> StoreResult<()> {
        self.fail()
    }

    fn get(&mut self, _key: &K) -> StoreResult<Option<V>> {
        self.fail()
    }

    fn remove(&mut self, _key: &K) -> StoreResult<Option<V>> {
        self.fail()
    }

    fn clear(&mut self) -> StoreResult<()> {
        self.fail()
    }
}
