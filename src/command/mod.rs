// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{error::Result, navigation::Navigator, router::Router, storage::Storage};

pub(crate) mod checkin;
pub(crate) mod language;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod route;
pub(crate) mod scan;
pub(crate) mod session;

#[async_trait]
pub(crate) trait Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()>;
}
