// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::info;

use crate::{
    error::Result,
    navigation::Navigator,
    router::{Decision, Router},
    storage::Storage,
};

/// Navigate to a path and print where the signed-in user ends up.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Press "back" once after arriving, as a browser would.
    #[arg(long)]
    back: bool,

    /// The path to navigate to, such as `/dashboard` or `/vet-alert`.
    #[clap()]
    path: String,
}

impl Command {
    async fn follow<S: Storage, N: Navigator>(&self, router: &mut Router<S, N>) -> String {
        if let Decision::Redirect(target) = router.visit(&self.path).await {
            info!("You may not stay on {}, so we sent you to {}", self.path, target);
        }
        if self.back {
            if router.navigator_mut().back() {
                _ = router.guard().await;
            } else {
                info!("There is no earlier page to go back to");
            }
        }
        router.navigator().current().to_owned()
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        println!("{}", self.follow(router).await);
        Ok(())
    }
}
