use std::collections::VecDeque;

use ppling_app::{Settings, SettingsRepository, log};
use ppling_domain as domain;

use crate::{KeyValueStore, StoreError, document::Document};

const KEY_STATE: &str = "state";
const KEY_SETTINGS: &str = "settings";
const KEY_LOG: &str = "log";

pub struct LocalStorage<S> {
    store: S,
}

impl<S: KeyValueStore> LocalStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> domain::StateRepository for LocalStorage<S> {
    fn read_state(&self) -> Result<Option<domain::State>, domain::ReadError> {
        match self.store.get::<Document>(KEY_STATE) {
            Ok(document) => domain::State::try_from(document)
                .map(Some)
                .map_err(|err| domain::ReadError::Decode(Box::new(err))),
            Err(StoreError::KeyNotFound(_)) => Ok(None),
            Err(StoreError::Serde(err)) => Err(domain::ReadError::Decode(Box::new(err))),
            Err(err) => Err(domain::ReadError::Storage(err.into())),
        }
    }

    fn write_state(&self, state: &domain::State) -> Result<(), domain::StorageError> {
        Ok(self.store.set(KEY_STATE, &Document::from(state))?)
    }
}

impl<S: KeyValueStore> SettingsRepository for LocalStorage<S> {
    fn read_settings(&self) -> Result<Settings, String> {
        match self.store.get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(StoreError::KeyNotFound(_)) => Ok(Settings::default()),
            Err(err) => Err(err.to_string()),
        }
    }

    fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.store
            .set(KEY_SETTINGS, &settings)
            .map_err(|err| err.to_string())
    }
}

pub struct Log<S> {
    store: S,
}

impl<S: KeyValueStore> Log<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> log::Repository for Log<S> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match self.store.get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                StoreError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::CAPACITY);
        self.store
            .set(KEY_LOG, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
