// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{
    error::Result, navigation::Navigator, router::Router, session::Language, storage::Storage,
};

/// Show or change the preferred language.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The language to switch to.
    #[arg(value_enum)]
    code: Option<Language>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        let store = router.store_mut();
        if let Some(language) = self.code {
            store.set_language(language).await?;
        }

        let language = store.language().await?;
        println!("{} ({})", language.native_name(), language.code());
        Ok(())
    }
}
