#![warn(clippy::pedantic)]

use serde::{Serialize, de::DeserializeOwned};

pub mod document;
pub mod file_store;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory_store;


/// A store of JSON documents addressed by key.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns `None` if there is no value for `key`.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError>
    where
        Self: Sized,
    {
        let value = self
            .get_raw(key)?
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        Ok(serde_json::from_str(&value)?)
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        self.set_raw(key, &serde_json::to_string(value)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ppling_domain::StorageError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Io(err) => Self::Io(err),
            err => Self::Other(Box::new(err)),
        }
    }
}
