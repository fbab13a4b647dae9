// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, info, trace, warn};
use uuid::Uuid;

use crate::error;

use super::{
    camera::{Camera, Constraints, FacingMode, Frame, Stream},
    decoder::Capability,
};

/// Why a scan attempt cannot decode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Failure {
    /// The user refused camera access.
    Permission,
    /// No camera or no decoder on this runtime.
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum State {
    Idle,
    Acquiring,
    Active,
    Decoding,
    Resolved(String),
    Failed(Failure),
    Stopped,
}

/// The outcome of one pass of the decode loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Tick {
    /// Nothing to scan: the engine is not active or cannot decode.
    Inactive,
    Pending,
    /// The session resolved and [`Engine::decoded_text`] holds the result.
    Resolved,
}

/// Owns the camera stream of one scan page and the decode loop over it.
///
/// At most one stream is held at a time, and it is released before a new
/// one is requested, on [`Engine::stop`], on resolution and on drop.
pub(crate) struct Engine<C> {
    camera: C,
    decoder: Capability,
    facing_mode: FacingMode,
    state: State,
    stream: Option<Box<dyn Stream>>,
    buffer: Frame,
    decoded_text: Option<String>,
    id: Uuid,
}

impl<C> Engine<C> {
    pub(crate) fn new(camera: C, decoder: Capability) -> Self {
        Self {
            camera,
            decoder,
            facing_mode: FacingMode::default(),
            state: State::Idle,
            stream: None,
            buffer: Frame::default(),
            decoded_text: None,
            id: Uuid::nil(),
        }
    }

    pub(crate) fn with_facing_mode(mut self, facing_mode: FacingMode) -> Self {
        self.facing_mode = facing_mode;
        self
    }

    pub(crate) const fn state(&self) -> &State {
        &self.state
    }

    /// The text of the last successful scan, kept until the next `start`.
    pub(crate) fn decoded_text(&self) -> Option<&str> {
        self.decoded_text.as_deref()
    }

    pub(crate) const fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Whether the decode loop should be scheduled.
    pub(crate) fn is_scanning(&self) -> bool {
        self.state == State::Active && self.decoder.is_available()
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            debug!("[{}] Released the camera", self.id);
        }
    }

    /// Cancels scanning and releases the camera. Does nothing when idle or
    /// already stopped.
    pub(crate) fn stop(&mut self) {
        self.release();
        match self.state {
            State::Idle | State::Stopped => {}
            State::Acquiring
            | State::Active
            | State::Decoding
            | State::Resolved(_)
            | State::Failed(_) => {
                debug!("[{}] Scan stopped", self.id);
                self.state = State::Stopped;
            }
        }
    }

    /// Stops, switches to the other camera and waits for the next `start`.
    pub(crate) fn toggle_facing(&mut self) -> FacingMode {
        self.stop();
        self.facing_mode = self.facing_mode.flipped();
        self.state = State::Idle;
        self.facing_mode
    }
}

impl<C: Camera> Engine<C> {
    /// Begins a new scan session.
    ///
    /// Failures are returned as [`State::Failed`]. A missing decoder still
    /// leaves the camera streaming for preview.
    pub(crate) async fn start(&mut self) -> State {
        self.release();
        self.decoded_text = None;
        self.id = Uuid::new_v4();
        self.state = State::Acquiring;

        let constraints = Constraints::video_only(self.facing_mode);
        debug!(
            "[{}] Requesting the {} camera (audio: {})",
            self.id, constraints.facing_mode, constraints.audio
        );
        self.state = match self.camera.request_stream(&constraints).await {
            Ok(stream) => {
                self.stream = Some(stream);
                info!("[{}] Camera acquired", self.id);
                if self.decoder.is_available() {
                    State::Active
                } else {
                    warn!(
                        "[{}] Code scanning is not supported here, so only the preview will run",
                        self.id
                    );
                    State::Failed(Failure::Unsupported)
                }
            }
            Err(error::Error::Camera(error::Camera::PermissionDenied)) => {
                warn!("[{}] Camera permission was denied", self.id);
                State::Failed(Failure::Permission)
            }
            Err(e) => {
                warn!("[{}] We could not open a camera: {}", self.id, e);
                State::Failed(Failure::Unsupported)
            }
        };
        self.state.clone()
    }

    /// Runs one pass of the decode loop over the current frame.
    ///
    /// The first non-empty payload resolves the session and releases the
    /// camera before this returns.
    pub(crate) async fn tick(&mut self) -> Tick {
        if self.state != State::Active {
            return Tick::Inactive;
        }
        let Capability::Available(decoder) = &self.decoder else {
            return Tick::Inactive;
        };
        let Some(stream) = self.stream.as_mut() else {
            return Tick::Inactive;
        };
        if !stream.capture(&mut self.buffer) {
            return Tick::Pending;
        }
        trace!(
            "[{}] Captured a {}x{} frame",
            self.id,
            self.buffer.width(),
            self.buffer.height()
        );

        self.state = State::Decoding;
        let detected = decoder.detect(&self.buffer).await;
        self.state = State::Active;

        let codes = match detected {
            Ok(codes) => codes,
            Err(e) => {
                debug!("[{}] Skipping a frame we could not decode: {}", self.id, e);
                return Tick::Pending;
            }
        };
        match codes.into_iter().next() {
            Some(code) if !code.payload.is_empty() => {
                self.release();
                info!("[{}] Scanned {:?} ({:?})", self.id, code.payload, code.format);
                self.state = State::Resolved(code.payload.clone());
                self.decoded_text = Some(code.payload);
                Tick::Resolved
            }
            Some(_) | None => Tick::Pending,
        }
    }
}

impl<C> Drop for Engine<C> {
    fn drop(&mut self) {
        self.release();
    }
}
