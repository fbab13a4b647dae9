// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    collections::VecDeque,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use clap::ValueEnum;
use log::info;

use crate::error::{self, Result};

/// Which physical camera to ask for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum FacingMode {
    User,
    #[default]
    Environment,
}

impl FacingMode {
    #[must_use]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Self::User => Self::Environment,
            Self::Environment => Self::User,
        }
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::User => "user",
            Self::Environment => "environment",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Constraints {
    pub(crate) facing_mode: FacingMode,
    pub(crate) audio: bool,
}

impl Constraints {
    pub(crate) const fn video_only(facing_mode: FacingMode) -> Self {
        Self {
            facing_mode,
            audio: false,
        }
    }
}

/// An off-screen image buffer that frames are copied into.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    pub(crate) fn fill(&mut self, width: u32, height: u32, data: &[u8]) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    pub(crate) const fn width(&self) -> u32 {
        self.width
    }

    pub(crate) const fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A live video stream. Holding one keeps the camera busy.
pub(crate) trait Stream: Send {
    /// Copies the most recent frame into `buffer`, returning false when no
    /// frame is ready yet.
    fn capture(&mut self, buffer: &mut Frame) -> bool;

    /// Stops every track of the stream.
    fn stop_tracks(&mut self);
}

#[async_trait]
pub(crate) trait Camera: Send + Sync {
    /// Asks for a stream. May suspend on a permission prompt.
    ///
    /// Denial is reported as [`error::Camera::PermissionDenied`].
    async fn request_stream(&self, constraints: &Constraints) -> Result<Box<dyn Stream>>;
}

#[async_trait]
impl<T: Camera + ?Sized> Camera for Box<T> {
    async fn request_stream(&self, constraints: &Constraints) -> Result<Box<dyn Stream>> {
        (**self).request_stream(constraints).await
    }
}

/// Plays back recorded frames from a text file, one frame per line.
pub(crate) struct Replay {
    path: PathBuf,
}

impl Replay {
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }
}

#[async_trait]
impl Camera for Replay {
    async fn request_stream(&self, constraints: &Constraints) -> Result<Box<dyn Stream>> {
        let recording = match fs::read(&self.path) {
            Ok(recording) => recording,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(error::Camera::PermissionDenied.into())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(error::Camera::Unavailable(self.path.display().to_string()).into())
            }
            Err(e) => return Err(e.into()),
        };

        let frames = split_frames(&recording);
        info!(
            "Replaying {} frames from {} as the {} camera",
            frames.len(),
            self.path.display(),
            constraints.facing_mode
        );
        Ok(Box::new(ReplayStream { frames }))
    }
}

/// Splits a recording into lines, keeping each line's bytes untouched apart
/// from the line ending.
fn split_frames(recording: &[u8]) -> VecDeque<Vec<u8>> {
    if recording.is_empty() {
        return VecDeque::new();
    }

    recording
        .strip_suffix(b"\n")
        .unwrap_or(recording)
        .split(|&byte| byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line).to_vec())
        .collect()
}

struct ReplayStream {
    frames: VecDeque<Vec<u8>>,
}

impl Stream for ReplayStream {
    fn capture(&mut self, buffer: &mut Frame) -> bool {
        match self.frames.pop_front() {
            Some(frame) => {
                let width = u32::try_from(frame.len()).unwrap_or(u32::MAX);
                buffer.fill(width, 1, &frame);
                true
            }
            None => false,
        }
    }

    fn stop_tracks(&mut self) {
        self.frames.clear();
    }
}
