// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use futures_util::{future::BoxFuture, Stream, StreamExt};
use log::{debug, warn};
use tokio::{
    select,
    sync::{mpsc, oneshot},
    time::{self, MissedTickBehavior},
};
use tokio_stream::wrappers::ReceiverStream;

use crate::error::{self, Result};

use super::{
    camera::{Camera, FacingMode},
    engine::{Engine, Failure, State, Tick},
};

/// Roughly one display refresh.
pub(crate) const DEFAULT_REFRESH: Duration = Duration::from_millis(16);

/// Receives the outcomes a scan page reacts to.
pub(crate) trait Observer: Send {
    fn resolved(&mut self, text: &str);

    fn unsupported(&mut self) {}

    fn permission_denied(&mut self) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Resolved(String),
    Unsupported,
    PermissionDenied,
}

impl Observer for mpsc::UnboundedSender<Event> {
    fn resolved(&mut self, text: &str) {
        notify(self, Event::Resolved(text.to_owned()));
    }

    fn unsupported(&mut self) {
        notify(self, Event::Unsupported);
    }

    fn permission_denied(&mut self) {
        notify(self, Event::PermissionDenied);
    }
}

fn notify(tx: &mpsc::UnboundedSender<Event>, event: Event) {
    if let Err(failed) = tx.send(event) {
        debug!("Nobody is listening for scan event {:?}", failed.0);
    }
}

#[derive(Debug)]
pub(crate) enum Call {
    Start(oneshot::Sender<State>),
    Stop(oneshot::Sender<State>),
    ToggleFacing {
        restart: bool,
        tx: oneshot::Sender<(FacingMode, State)>,
    },
}

/// Controls a running scan worker. Dropping every handle stops the camera
/// and ends the worker.
#[derive(Clone, Debug)]
pub(crate) struct Handle {
    tx: mpsc::Sender<Call>,
}

impl Handle {
    async fn call<R, F: FnOnce(oneshot::Sender<R>) -> Call>(&self, f: F) -> Result<R> {
        let (tx, rx) = oneshot::channel();
        self.tx.send(f(tx)).await.map_err(error::Internal::from)?;
        Ok(rx.await.map_err(error::Internal::from)?)
    }

    pub(crate) async fn start(&self) -> Result<State> {
        self.call(Call::Start).await
    }

    /// Returns once the camera is released and no further frame will be
    /// decoded.
    pub(crate) async fn stop(&self) -> Result<State> {
        self.call(Call::Stop).await
    }

    /// Switches cameras. With `restart`, a camera that was streaming is
    /// reopened straight away.
    pub(crate) async fn toggle_facing(&self, restart: bool) -> Result<(FacingMode, State)> {
        self.call(|tx| Call::ToggleFacing { restart, tx }).await
    }
}

fn reply<T>(tx: oneshot::Sender<T>, value: T) {
    if tx.send(value).is_err() {
        warn!("Failed to inform a disconnected caller of the scan state");
    }
}

async fn start<C: Camera, O: Observer>(engine: &mut Engine<C>, observer: &mut O) -> State {
    let state = engine.start().await;
    if let State::Failed(failure) = state {
        match failure {
            Failure::Permission => observer.permission_denied(),
            Failure::Unsupported => observer.unsupported(),
        }
    }
    state
}

async fn handle<C: Camera, O: Observer>(engine: &mut Engine<C>, observer: &mut O, call: Call) {
    match call {
        Call::Start(tx) => reply(tx, start(engine, observer).await),
        Call::Stop(tx) => {
            engine.stop();
            reply(tx, engine.state().clone());
        }
        Call::ToggleFacing { restart, tx } => {
            let was_streaming = engine.is_streaming();
            let facing_mode = engine.toggle_facing();
            let state = if restart && was_streaming {
                start(engine, observer).await
            } else {
                engine.state().clone()
            };
            reply(tx, (facing_mode, state));
        }
    }
}

/// Drives the decode loop once per `refresh` while the engine is scanning,
/// serving calls in between.
///
/// Calls take priority over frames, so once a stop is answered no further
/// frame is decoded.
pub(crate) async fn run<
    C: Camera,
    O: Observer,
    CallStream: Stream<Item = Call> + Send + Unpin,
>(
    engine: &mut Engine<C>,
    observer: &mut O,
    call_stream: &mut CallStream,
    refresh: Duration,
) -> Result<()> {
    let mut frames = time::interval(refresh);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        select! {
            biased;

            candidate = call_stream.next() => match candidate {
                Some(call) => handle(engine, observer, call).await,
                None => {
                    debug!("Every scan handle is gone, so we are stopping the camera");
                    engine.stop();
                    return Ok(());
                }
            },
            _ = frames.tick(), if engine.is_scanning() => {
                if engine.tick().await == Tick::Resolved {
                    if let Some(text) = engine.decoded_text() {
                        observer.resolved(text);
                    }
                }
            }
        }
    }
}

pub(crate) fn channel<C: Camera + 'static, O: Observer + 'static>(
    mut engine: Engine<C>,
    mut observer: O,
    refresh: Duration,
) -> (BoxFuture<'static, Result<()>>, Handle) {
    let (tx, rx) = mpsc::channel(16);

    let worker = async move {
        let mut call_stream = ReceiverStream::new(rx);
        run(&mut engine, &mut observer, &mut call_stream, refresh).await
    };

    (Box::pin(worker), Handle { tx })
}
