// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

use super::{IsPersistent, Key, Storage};

/// Process-local storage. Clones share the same underlying map.
#[derive(Clone, Default)]
pub(crate) struct Memory {
    data: Arc<RwLock<HashMap<Key, String>>>,
}

impl Memory {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl IsPersistent for Memory {
    fn is_persistent(&self) -> bool {
        false
    }
}

#[async_trait]
impl Storage for Memory {
    async fn get(&mut self, key: Key) -> Result<Option<String>> {
        let guard = self.data.read().await;
        Ok(guard.get(&key).cloned())
    }

    async fn set(&mut self, key: Key, value: &str) -> Result<()> {
        let target_data = Arc::clone(&self.data);
        let mut guard = target_data.write_owned().await;
        _ = guard.insert(key, value.to_owned());
        Ok(())
    }

    async fn remove(&mut self, key: Key) -> Result<()> {
        let target_data = Arc::clone(&self.data);
        let mut guard = target_data.write_owned().await;
        _ = guard.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Result;

    use super::*;

    #[tokio::test]
    async fn absent_key_is_none() -> Result<()> {
        let mut storage = Memory::new();
        assert_eq!(storage.get(Key::Role).await?, None);

        storage.set(Key::Role, "farmer").await?;
        assert_eq!(storage.get(Key::Role).await?.as_deref(), Some("farmer"));
        assert_eq!(storage.get(Key::AuthToken).await?, None);

        storage.remove(Key::Role).await?;
        assert_eq!(storage.get(Key::Role).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn clones_share_data() -> Result<()> {
        let mut storage = Memory::new();
        let mut observer = storage.clone();

        storage.set(Key::DisplayName, "Asha").await?;
        assert_eq!(
            observer.get(Key::DisplayName).await?.as_deref(),
            Some("Asha")
        );
        assert!(!observer.is_persistent());
        Ok(())
    }
}
