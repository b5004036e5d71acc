//! In-memory save store.
//!
//! Keeps encoded record text keyed by pet name, so loads go through the
//! same decoder as the file store.  Used by tests and by sessions that
//! should not touch the disk.

use std::collections::HashMap;

use log::{debug, info};

use crate::app::ports::{SaveStore, StoreError};
use crate::pet::PetName;
use crate::record::SaveRecord;

pub struct MemorySaveStore {
    records: HashMap<String, String>,
    max_age_stage: u8,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::with_max_age_stage(crate::config::PetConfig::default().max_age_stage)
    }

    pub fn with_max_age_stage(max_age_stage: u8) -> Self {
        info!("MemorySaveStore: simulation backend");
        Self {
            records: HashMap::new(),
            max_age_stage,
        }
    }

    /// Store raw text under `name`, bypassing the encoder.
    pub fn insert_raw(&mut self, name: &str, text: &str) {
        self.records.insert(name.to_string(), text.to_string());
    }

    pub fn raw(&self, name: &str) -> Option<&str> {
        self.records.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for MemorySaveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&self, name: &PetName) -> Result<SaveRecord, StoreError> {
        let text = self.records.get(name.as_str()).ok_or(StoreError::NotFound)?;
        Ok(SaveRecord::parse(text, self.max_age_stage)?)
    }

    fn save(&mut self, record: &SaveRecord) -> Result<(), StoreError> {
        let text = record.to_text()?;
        self.records.insert(record.name.as_str().to_string(), text);
        debug!("MemorySaveStore: saved {:?}", record.name.as_str());
        Ok(())
    }

    fn delete(&mut self, name: &PetName) -> Result<(), StoreError> {
        if self.records.remove(name.as_str()).is_none() {
            debug!("MemorySaveStore: nothing to delete for {:?}", name.as_str());
        }
        Ok(())
    }

    fn exists(&self, name: &PetName) -> bool {
        self.records.contains_key(name.as_str())
    }

    fn list(&self) -> Result<Vec<PetName>, StoreError> {
        let mut names: Vec<PetName> = self
            .records
            .keys()
            .filter_map(|k| PetName::new(k).ok())
            .collect();
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(names)
    }
}
