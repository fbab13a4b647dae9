// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub(crate) use file::File;
pub(crate) use memory::Memory;

/// The keys the platform keeps in its persisted store.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub(crate) enum Key {
    #[serde(rename = "userRole")]
    Role,
    #[serde(rename = "authToken")]
    AuthToken,
    #[serde(rename = "userName")]
    DisplayName,
    #[serde(rename = "selectedLanguage")]
    Language,
}

impl Key {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Role => "userRole",
            Self::AuthToken => "authToken",
            Self::DisplayName => "userName",
            Self::Language => "selectedLanguage",
        }
    }
}

pub(crate) trait IsPersistent {
    fn is_persistent(&self) -> bool;
}

impl<T: IsPersistent + ?Sized> IsPersistent for Box<T> {
    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}

/// A string key-value store that outlives a single run of the program.
///
/// An absent key is reported as `Ok(None)` and is never an error.
#[async_trait]
pub(crate) trait Storage: Send + Sync + IsPersistent {
    async fn get(&mut self, key: Key) -> Result<Option<String>>;
    async fn set(&mut self, key: Key, value: &str) -> Result<()>;
    async fn remove(&mut self, key: Key) -> Result<()>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn get(&mut self, key: Key) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&mut self, key: Key, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&mut self, key: Key) -> Result<()> {
        (**self).remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_tokens, Token};

    use super::*;

    #[test]
    fn key_names_match_stored_form() {
        for (key, name) in [
            (Key::Role, "userRole"),
            (Key::AuthToken, "authToken"),
            (Key::DisplayName, "userName"),
            (Key::Language, "selectedLanguage"),
        ] {
            assert_eq!(key.as_str(), name);
            assert_tokens(
                &key,
                &[Token::UnitVariant {
                    name: "Key",
                    variant: name,
                }],
            );
        }
    }
}
