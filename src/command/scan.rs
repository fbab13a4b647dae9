// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use clap::Parser;
use log::{error, info};
use tokio::{select, sync::mpsc, time};

use crate::{
    checkin::{self, Page},
    error::{self, Result},
    navigation::Navigator,
    router::Router,
    scan::{
        camera::{FacingMode, Replay},
        decoder::{self, Capability},
        worker::{self, Event, Handle},
        Engine, State,
    },
    storage::Storage,
};

/// Check in to a farm by scanning its code from recorded camera frames.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The page to scan from.
    #[arg(long, value_enum, default_value_t = Page::Visitor)]
    page: Page,

    /// A recording of camera frames, one frame per line.
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    frames: PathBuf,

    /// The camera to start with.
    #[arg(long, value_enum, default_value_t = FacingMode::Environment)]
    facing: FacingMode,

    /// Switch to the other camera once the first one is open.
    #[arg(long)]
    flip: bool,

    /// Behave as if this runtime could not decode codes.
    #[arg(long)]
    no_decoder: bool,

    /// Give up after this many seconds without a code.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Milliseconds between decoded frames.
    #[arg(long)]
    refresh_ms: Option<u64>,
}

impl Command {
    async fn await_code<S: Storage, N: Navigator>(
        &self,
        router: &mut Router<S, N>,
        handle: &Handle,
        events: &mut mpsc::UnboundedReceiver<Event>,
    ) -> Result<()> {
        _ = handle.start().await?;
        if self.flip {
            let (facing_mode, state) = handle
                .toggle_facing(self.page.restarts_on_toggle())
                .await?;
            info!("Switched to the {} camera", facing_mode);
            if state == State::Idle {
                _ = handle.start().await?;
            }
        }

        let deadline = time::sleep(Duration::from_secs(self.timeout));
        tokio::pin!(deadline);

        select! {
            event = events.recv() => match event {
                Some(Event::Resolved(text)) => {
                    let destination =
                        checkin::Checkin::new(self.page, router.navigator_mut()).resolved(&text)?;
                    _ = router.guard().await;
                    println!("{destination}");
                    Ok(())
                }
                Some(Event::PermissionDenied) => {
                    error!(
                        "Camera access was denied. Try again, or enter the farm ID with `checkin --page {}`",
                        self.page
                    );
                    Err(error::Error::Command)
                }
                Some(Event::Unsupported) => {
                    error!(
                        "Scanning is not available here. Enter the farm ID with `checkin --page {}` instead",
                        self.page
                    );
                    Err(error::Error::Command)
                }
                None => Err(error::Internal::ChannelClosed.into()),
            },
            () = &mut deadline => {
                error!("No farm code was found within {} seconds", self.timeout);
                Err(error::Error::Cancelled)
            }
        }
    }
}

#[async_trait]
impl super::Command for Command {
    async fn execute<S: Storage, N: Navigator>(self, router: &mut Router<S, N>) -> Result<()> {
        super::checkin::enter(router, self.page).await?;

        let decoder = if self.no_decoder {
            Capability::Unavailable
        } else {
            Capability::available(decoder::Text)
        };
        let engine = Engine::new(Replay::new(&self.frames), decoder).with_facing_mode(self.facing);
        let (events_tx, mut events) = mpsc::unbounded_channel();
        let (worker, handle) = worker::channel(
            engine,
            events_tx,
            self.refresh_ms
                .map_or(worker::DEFAULT_REFRESH, Duration::from_millis),
        );
        let worker_task = tokio::spawn(worker);

        let result = self.await_code(router, &handle, &mut events).await;
        _ = handle.stop().await?;
        drop(handle);
        worker_task.await??;

        result
    }
}
