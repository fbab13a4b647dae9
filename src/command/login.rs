// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use secrecy::SecretString;

use crate::{
    error::Result,
    login::{AdminKind, RequestBuilder},
    navigation::Navigator,
    password,
    router::Router,
    session::Role,
    storage::Storage,
};

/// Sign in through one of the login portals.
///
/// Any non-empty credentials are accepted. When neither a password nor a
/// one-time password is given, the password is read from the terminal.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The portal to sign in through.
    #[arg(value_enum)]
    portal: Role,

    /// Which administrator account to use. Required for the admin portal.
    #[arg(long, value_enum)]
    admin_type: Option<AdminKind>,

    #[arg(long, short, default_value = "")]
    username: String,

    #[arg(long, conflicts_with = "otp", env = "FARMGUARD_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Sign in with a one-time password instead.
    #[arg(long)]
    otp: Option<String>,

    /// Prompt for a one-time password rather than a password.
    #[arg(long, conflicts_with_all = ["password", "otp"])]
    prompt_otp: bool,
}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        let mut builder = RequestBuilder::new(self.portal).with_username(&self.username);
        if let Some(admin_kind) = self.admin_type {
            builder = builder.with_admin_kind(admin_kind);
        }

        builder = match (self.password, self.otp) {
            (Some(password), _) => builder.with_password(SecretString::new(password)),
            (None, Some(otp)) => builder.with_otp(SecretString::new(otp)),
            // Nothing to ask for until there is a username.
            (None, None) if self.username.is_empty() => builder,
            (None, None) => {
                let kind = if self.prompt_otp {
                    password::Kind::Otp
                } else {
                    password::Kind::Password
                };
                let secret = password::require(
                    &password::RpasswordPrompt,
                    password::RequestBuilder::new(kind)
                        .with_username(&self.username)
                        .into_request(),
                )
                .await?;
                match kind {
                    password::Kind::Password => builder.with_password(secret),
                    password::Kind::Otp => builder.with_otp(secret),
                }
            }
        };

        let target = router.login(&builder.into_request()).await?;
        println!("{target}");
        Ok(())
    }
}
