// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use clap::ValueEnum;
use inflector::Inflector as _;
use log::{debug, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    error::{self, Result},
    storage::{Key, Storage},
};

/// The canonical user roles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Role {
    #[value(alias = "administrator")]
    Admin,
    System,
    Farmer,
    Government,
    #[value(alias = "vet")]
    Veterinarian,
    Visitor,
}

impl Role {
    pub(crate) const ALL: [Self; 6] = [
        Self::Admin,
        Self::System,
        Self::Farmer,
        Self::Government,
        Self::Veterinarian,
        Self::Visitor,
    ];

    /// Parses a stored role, accepting the known synonyms.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw {
            "administrator" => Some(Self::Admin),
            "vet" => Some(Self::Veterinarian),
            _ => Self::ALL.into_iter().find(|role| role.as_str() == raw),
        }
    }

    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::System => "system",
            Self::Farmer => "farmer",
            Self::Government => "government",
            Self::Veterinarian => "veterinarian",
            Self::Visitor => "visitor",
        }
    }

    /// The URL segment under which the role's pages live.
    pub(crate) const fn path_segment(self) -> &'static str {
        match self {
            Self::Veterinarian => "vet",
            Self::Admin | Self::System | Self::Farmer | Self::Government | Self::Visitor => {
                self.as_str()
            }
        }
    }

    pub(crate) fn placeholder_name(self) -> String {
        match self {
            Self::Government => "GovUser".to_owned(),
            Self::Admin | Self::System | Self::Farmer | Self::Veterinarian | Self::Visitor => {
                self.as_str().to_title_case()
            }
        }
    }

    pub(crate) const fn mock_token(self) -> &'static str {
        match self {
            Self::Admin | Self::System | Self::Government => "mock-auth-token",
            Self::Farmer => "mock-farmer-token",
            Self::Veterinarian => "mock-vet-token",
            Self::Visitor => "mock-visitor-token",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = error::Login;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| error::Login::UnknownRole(s.to_owned()))
    }
}

/// The user-facing language preference.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Language {
    #[default]
    En,
    Hi,
    Mr,
    Gu,
    Ta,
}

impl Language {
    pub(crate) const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Mr => "mr",
            Self::Gu => "gu",
            Self::Ta => "ta",
        }
    }

    pub(crate) const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिंदी",
            Self::Mr => "मराठी",
            Self::Gu => "ગુજરાતી",
            Self::Ta => "தமிழ்",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::value_variants()
            .iter()
            .copied()
            .find(|language| language.code() == code)
    }
}

/// A snapshot of the persisted session.
#[derive(Clone, Debug, Default)]
pub(crate) struct Session {
    role: Option<Role>,
    auth_token: Option<SecretString>,
    display_name: Option<String>,
}

impl Session {
    pub(crate) const fn role(&self) -> Option<Role> {
        self.role
    }

    pub(crate) const fn auth_token(&self) -> &Option<SecretString> {
        &self.auth_token
    }

    pub(crate) fn display_name(&self) -> String {
        match (self.display_name.as_ref(), self.role) {
            (Some(name), _) => name.clone(),
            (None, Some(role)) => role.placeholder_name(),
            (None, None) => "Guest".to_owned(),
        }
    }
}

/// Owns every read and write of the session fields in the persisted store.
pub(crate) struct Store<S> {
    storage: S,
}

impl<S: Storage> Store<S> {
    pub(crate) const fn new(storage: S) -> Self {
        Self { storage }
    }

    pub(crate) fn is_persistent(&self) -> bool {
        self.storage.is_persistent()
    }

    /// Reads the session, rewriting a synonym role to its canonical spelling.
    pub(crate) async fn session(&mut self) -> Result<Session> {
        let role = match self.storage.get(Key::Role).await? {
            Some(raw) => match Role::parse(&raw) {
                Some(role) if role.as_str() != raw => {
                    debug!("Normalizing stored {} {:?} to {}", Key::Role.as_str(), raw, role);
                    if let Err(e) = self.storage.set(Key::Role, role.as_str()).await {
                        warn!("We could not persist the normalized role {}: {}", role, e);
                    }
                    Some(role)
                }
                Some(role) => Some(role),
                None => {
                    warn!("Ignoring unrecognized {} {:?}", Key::Role.as_str(), raw);
                    None
                }
            },
            None => None,
        };

        Ok(Session {
            role,
            auth_token: self.storage.get(Key::AuthToken).await?.map(SecretString::new),
            display_name: self.storage.get(Key::DisplayName).await?,
        })
    }

    /// Overwrites every session field.
    ///
    /// If any write fails the session is cleared, so a half-written login
    /// reads as signed out.
    pub(crate) async fn establish(&mut self, role: Role, display_name: &str) -> Result<Session> {
        let auth_token = SecretString::new(role.mock_token().to_owned());
        let display_name = if display_name.is_empty() {
            role.placeholder_name()
        } else {
            display_name.to_owned()
        };

        if let Err(e) = self.write(role, &auth_token, &display_name).await {
            warn!("Signing in failed part way, so we are clearing the session: {}", e);
            if let Err(e) = self.clear().await {
                warn!("We could not clear the session either: {}", e);
            }
            return Err(e);
        }

        Ok(Session {
            role: Some(role),
            auth_token: Some(auth_token),
            display_name: Some(display_name),
        })
    }

    // The role goes last: it is what makes the session count as signed in.
    async fn write(
        &mut self,
        role: Role,
        auth_token: &SecretString,
        display_name: &str,
    ) -> Result<()> {
        self.storage
            .set(Key::AuthToken, auth_token.expose_secret())
            .await?;
        self.storage.set(Key::DisplayName, display_name).await?;
        self.storage.set(Key::Role, role.as_str()).await
    }

    pub(crate) async fn clear(&mut self) -> Result<()> {
        self.storage.remove(Key::Role).await?;
        self.storage.remove(Key::AuthToken).await?;
        self.storage.remove(Key::DisplayName).await?;
        Ok(())
    }

    pub(crate) async fn language(&mut self) -> Result<Language> {
        Ok(match self.storage.get(Key::Language).await? {
            Some(code) => Language::from_code(&code).unwrap_or_else(|| {
                warn!("Ignoring unsupported language preference {:?}", code);
                Language::default()
            }),
            None => Language::default(),
        })
    }

    pub(crate) async fn set_language(&mut self, language: Language) -> Result<()> {
        self.storage.set(Key::Language, language.code()).await
    }
}
