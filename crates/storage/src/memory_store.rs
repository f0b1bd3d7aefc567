use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

use crate::{KeyValueStore, StoreError};

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();

        assert!(matches!(
            store.get::<String>("settings"),
            Err(StoreError::KeyNotFound(_))
        ));

        store.set("settings", &"foo").unwrap();
        assert_eq!(store.get::<String>("settings").unwrap(), "foo");

        store.delete("settings").unwrap();
        assert_eq!(store.get_raw("settings").unwrap(), None);
    }
}
