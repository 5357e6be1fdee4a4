//! Cache line storage.

/// One occupied cache line: key, value, and dirty bit.
///
/// Empty lines are represented by `None` in the slot array, so a line's dirty bit only exists
/// while the line is occupied. A line whose `value` is `None` remembers that the backing store
/// had nothing for the key, so repeated reads of that key do not go back to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<K, V> {
    pub(crate) key: K,
    pub(crate) value: Option<V>,
    pub(crate) dirty: bool,
}

impl<K, V> Line<K, V> {
    pub(crate) const fn new(key: K, value: Option<V>, dirty: bool) -> Self {
        Self { key, value, dirty }
    }

    /// The cached key.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// The cached value, or `None` for a remembered store miss.
    pub const fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// `true` if the value has not been written to the backing store.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }
}
