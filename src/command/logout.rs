// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{error::Result, navigation::Navigator, router::Router, storage::Storage};

/// Sign out, forgetting the stored role, token and name.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        router.logout().await?;
        println!("{}", router.navigator().current());
        Ok(())
    }
}
