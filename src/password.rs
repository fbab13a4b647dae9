// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::task;

use crate::{
    error::{self, Result},
    metadata,
};

/// What the user is being asked to type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    Password,
    Otp,
}

impl Kind {
    const fn label(self) -> &'static str {
        match self {
            Self::Password => "Password",
            Self::Otp => "One-time password",
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Request {
    kind: Kind,
    username: String,
}

pub(crate) struct RequestBuilder {
    kind: Kind,
    username: String,
}

impl RequestBuilder {
    pub(crate) const fn new(kind: Kind) -> Self {
        Self {
            kind,
            username: String::new(),
        }
    }

    pub(crate) fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_owned();
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            kind: self.kind,
            username: self.username,
        }
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

/// Reads the secret from the controlling terminal without echo.
pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        let prompt = if req.username.is_empty() {
            format!("{} - {}: ", *metadata::CLIENT_DISPLAY_NAME, req.kind.label())
        } else {
            format!(
                "{} - {} for {}: ",
                *metadata::CLIENT_DISPLAY_NAME,
                req.kind.label(),
                req.username
            )
        };

        Ok(Some(
            task::spawn_blocking(move || rpassword::prompt_password(prompt).map(SecretString::new))
                .await??,
        ))
    }
}

/// Asks `prompt`, failing when it has nothing to offer.
pub(crate) async fn require<P: Prompt + ?Sized>(prompt: &P, req: Request) -> Result<SecretString> {
    prompt
        .prompt(req)
        .await?
        .ok_or_else(|| error::Password::NoPrompt.into())
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret as _;

    use super::*;

    struct Canned(Option<&'static str>);

    #[async_trait]
    impl Prompt for Canned {
        async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
            assert_eq!(req.kind, Kind::Otp);
            assert_eq!(req.username, "abc");
            Ok(self.0.map(|secret| SecretString::new(secret.to_owned())))
        }
    }

    fn request() -> Request {
        RequestBuilder::new(Kind::Otp)
            .with_username("abc")
            .into_request()
    }

    #[tokio::test]
    async fn require_passes_the_answer_through() -> Result<()> {
        let prompt: Box<dyn Prompt> = Box::new(Canned(Some("123456")));
        assert_eq!(require(&prompt, request()).await?.expose_secret(), "123456");
        Ok(())
    }

    #[tokio::test]
    async fn require_fails_without_an_answer() {
        assert!(matches!(
            require(&Canned(None), request()).await,
            Err(error::Error::Password(error::Password::NoPrompt))
        ));
    }
}
