// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use tabled::{settings::Style, Table, Tabled};

use crate::{error::Result, navigation::Navigator, router::Router, storage::Storage};

/// Show who is signed in.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[derive(Clone, Debug, Tabled)]
struct Row {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl Row {
    fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        let store = router.store_mut();
        let session = store.session().await?;
        let language = store.language().await?;
        let persistent = store.is_persistent();

        let rows = [
            Row::new(
                "Role",
                session.role().map_or("(signed out)", |role| role.as_str()),
            ),
            Row::new("Name", session.display_name()),
            Row::new(
                "Token",
                if session.auth_token().is_some() {
                    "⋆⋆⋆⋆⋆⋆⋆⋆⋆⋆"
                } else {
                    "(none)"
                },
            ),
            Row::new("Language", language.code()),
            Row::new("Persistent", if persistent { "yes" } else { "no" }),
        ];

        println!("{}", Table::new(rows).with(Style::rounded()));
        Ok(())
    }
}
