// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use clap::ValueEnum;
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    error::{self, Field},
    session::Role,
};

/// Which kind of administrator is signing in through the admin portal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum AdminKind {
    System,
    Government,
}

impl AdminKind {
    const fn role(self) -> Role {
        match self {
            Self::System => Role::System,
            Self::Government => Role::Government,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Secret {
    Password(SecretString),
    Otp(SecretString),
}

impl Secret {
    fn missing_field(&self) -> Option<Field> {
        match *self {
            Self::Password(ref password) if password.expose_secret().is_empty() => {
                Some(Field::Password)
            }
            Self::Otp(ref otp) if otp.expose_secret().is_empty() => Some(Field::Otp),
            Self::Password(_) | Self::Otp(_) => None,
        }
    }
}

/// A submitted login form.
#[derive(Clone, Debug)]
pub(crate) struct Request {
    portal: Role,
    admin_kind: Option<AdminKind>,
    username: String,
    secret: Secret,
}

impl Request {
    pub(crate) fn username(&self) -> &str {
        &self.username
    }

    /// Checks the form and works out which role the session will carry.
    ///
    /// Any non-empty credential pair is accepted.
    pub(crate) fn validate(&self) -> Result<Role, error::Login> {
        if self.username.is_empty() {
            return Err(error::Login::MissingField(Field::Username));
        }
        if let Some(field) = self.secret.missing_field() {
            return Err(error::Login::MissingField(field));
        }

        match self.portal {
            Role::Admin => self
                .admin_kind
                .map(AdminKind::role)
                .ok_or(error::Login::MissingField(Field::AdminType)),
            role @ (Role::Farmer | Role::Visitor | Role::Veterinarian) => Ok(role),
            role @ (Role::System | Role::Government) => Err(error::Login::Portal(role)),
        }
    }
}

pub(crate) struct RequestBuilder {
    portal: Role,
    admin_kind: Option<AdminKind>,
    username: String,
    secret: Secret,
}

impl RequestBuilder {
    pub(crate) fn new(portal: Role) -> Self {
        Self {
            portal,
            admin_kind: None,
            username: String::new(),
            secret: Secret::Password(SecretString::new(String::new())),
        }
    }

    pub(crate) const fn with_admin_kind(mut self, admin_kind: AdminKind) -> Self {
        self.admin_kind = Some(admin_kind);
        self
    }

    pub(crate) fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_owned();
        self
    }

    pub(crate) fn with_password(mut self, password: SecretString) -> Self {
        self.secret = Secret::Password(password);
        self
    }

    pub(crate) fn with_otp(mut self, otp: SecretString) -> Self {
        self.secret = Secret::Otp(otp);
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            portal: self.portal,
            admin_kind: self.admin_kind,
            username: self.username,
            secret: self.secret,
        }
    }
}
