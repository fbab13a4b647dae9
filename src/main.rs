// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod checkin;
mod command;
mod error;
mod login;
mod metadata;
mod navigation;
mod password;
mod router;
mod routes;
mod scan;
mod session;
mod storage;

use std::{path::PathBuf, process};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use log::{error, warn};
use navigation::{History, Navigator};
use router::Router;
use storage::Storage;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Logout(command::logout::Command),
    Session(command::session::Command),
    Route(command::route::Command),
    Language(command::language::Command),
    Scan(command::scan::Command),
    Checkin(command::checkin::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        match self {
            Self::Login(cmd) => command::Command::execute(cmd, router).await,
            Self::Logout(cmd) => command::Command::execute(cmd, router).await,
            Self::Session(cmd) => command::Command::execute(cmd, router).await,
            Self::Route(cmd) => command::Command::execute(cmd, router).await,
            Self::Language(cmd) => command::Command::execute(cmd, router).await,
            Self::Scan(cmd) => command::Command::execute(cmd, router).await,
            Self::Checkin(cmd) => command::Command::execute(cmd, router).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The JSON file that remembers the session between runs. Defaults to a
    /// file in the per-user data directory.
    #[arg(long, env = "FARMGUARD_STORE", value_hint = clap::ValueHint::FilePath)]
    store: Option<PathBuf>,

    /// Keep the session in memory only, forgetting it when the command ends.
    #[arg(long, conflicts_with = "store")]
    ephemeral: bool,

    #[clap(subcommand)]
    command: Command,
}

fn get_storage(args: &Args) -> Box<dyn Storage> {
    if !args.ephemeral {
        if let Some(ref path) = args.store {
            return Box::new(storage::File::with_path(path));
        }

        match storage::File::new(metadata::STORE_FILE_NAME) {
            Ok(file_storage) => return Box::new(file_storage),
            Err(e) => {
                warn!("We need to fall back to memory storage, so your session will not be remembered: {}", e);
            }
        }
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let mut router = Router::new(session::Store::new(get_storage(&args)), History::default());
    command::Command::execute(args.command, &mut router).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("FARMGUARD_LOG", "warn")
        .write_style("FARMGUARD_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
