// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;

use crate::{
    checkin::{self, Page},
    error::{self, Result},
    navigation::Navigator,
    router::{Decision, Router},
    storage::Storage,
};

/// Check in to a farm by typing its ID instead of scanning.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The page to check in from.
    #[arg(long, value_enum, default_value_t = Page::Visitor)]
    page: Page,

    /// The farm ID, or for visitors a farm link.
    #[clap()]
    id: String,
}

/// Opens the page's scan screen, failing when the signed-in role may not see
/// it.
pub(crate) async fn enter<S: Storage, N: Navigator>(
    router: &mut Router<S, N>,
    page: Page,
) -> Result<()> {
    match router.visit(page.scan_path()).await {
        Decision::Stay => Ok(()),
        Decision::Redirect(target) => {
            error!(
                "You need to sign in as a {} to check in from {}; we sent you to {}",
                page,
                page.scan_path(),
                target
            );
            Err(error::Error::Command)
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        enter(router, self.page).await?;

        let destination =
            checkin::Checkin::new(self.page, router.navigator_mut()).submit_manual(&self.id)?;
        _ = router.guard().await;
        println!("{destination}");
        Ok(())
    }
}
