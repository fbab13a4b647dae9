// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    error::{self, Result},
    metadata,
};

use super::{IsPersistent, Key, Storage};

/// Storage kept as a single JSON object on disk.
pub(crate) struct File {
    path: PathBuf,
}

impl File {
    /// Keeps `file` in the per-user data directory.
    pub(crate) fn new<P: AsRef<Path>>(file: P) -> Result<Self> {
        let dirs = metadata::PROJECT_DIRS
            .as_ref()
            .ok_or(error::Storage::NoProjectDirs)?;
        Ok(Self {
            path: dirs.data_dir().join(file),
        })
    }

    pub(crate) fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<Key, String>> {
        match fs::File::open(&self.path) {
            Ok(fp) => Ok(serde_json::from_reader(io::BufReader::new(fp))?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, data: &BTreeMap<Key, String>) -> Result<()> {
        if data.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, data)?;
        Ok(())
    }
}

impl IsPersistent for File {
    fn is_persistent(&self) -> bool {
        true
    }
}

#[async_trait]
impl Storage for File {
    async fn get(&mut self, key: Key) -> Result<Option<String>> {
        Ok(self.load()?.remove(&key))
    }

    async fn set(&mut self, key: Key, value: &str) -> Result<()> {
        let mut data = self.load()?;
        _ = data.insert(key, value.to_owned());
        self.save(&data)
    }

    async fn remove(&mut self, key: Key) -> Result<()> {
        let mut data = self.load()?;
        if data.remove(&key).is_some() {
            self.save(&data)?;
        }
        Ok(())
    }
}
