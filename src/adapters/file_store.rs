//! Filesystem save store.
//!
//! One text file per pet: `<dir>/<name>.<extension>`, e.g. `saves/Rex.TAMA`.
//! [`PetName`] already rules out path separators, so a name can never
//! escape the save directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::app::ports::{SaveStore, StoreError};
use crate::config::PetConfig;
use crate::pet::PetName;
use crate::record::SaveRecord;

pub struct FileSaveStore {
    dir: PathBuf,
    extension: String,
    max_age_stage: u8,
}

impl FileSaveStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, max_age_stage: u8) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            max_age_stage,
        }
    }

    /// Store laid out by `config.save_dir` and `config.save_extension`.
    pub fn from_config(config: &PetConfig) -> Self {
        Self::new(
            config.save_dir.as_str(),
            config.save_extension.as_str(),
            config.max_age_stage,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `name`.
    pub fn path_for(&self, name: &PetName) -> PathBuf {
        self.dir.join(format!("{}.{}", name.as_str(), self.extension))
    }
}

impl SaveStore for FileSaveStore {
    fn load(&self, name: &PetName) -> Result<SaveRecord, StoreError> {
        let path = self.path_for(name);
        let text = fs::read_to_string(&path)?;
        let record = SaveRecord::parse(&text, self.max_age_stage)?;
        info!("FileSaveStore: loaded {}", path.display());
        Ok(record)
    }

    fn save(&mut self, record: &SaveRecord) -> Result<(), StoreError> {
        let text = record.to_text()?;
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&record.name);
        fs::write(&path, text)?;
        info!("FileSaveStore: wrote {}", path.display());
        Ok(())
    }

    fn delete(&mut self, name: &PetName) -> Result<(), StoreError> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("FileSaveStore: removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("FileSaveStore: {} already gone", path.display());
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists(&self, name: &PetName) -> bool {
        self.path_for(name).is_file()
    }

    fn list(&self) -> Result<Vec<PetName>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(name) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| PetName::new(s).ok())
            {
                names.push(name);
            }
        }
        names.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(names)
    }
}
