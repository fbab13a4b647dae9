// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::session::Role;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("login failed: {0}")]
    Login(#[from] Login),
    #[error("camera error: {0}")]
    Camera(#[from] Camera),
    #[error("decoder error: {0}")]
    Decode(#[from] Decode),
    #[error("check-in error: {0}")]
    Checkin(#[from] Checkin),
    #[error("storage error: {0}")]
    Storage(#[from] Storage),
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("internal communication error: {0}")]
    Internal(#[from] Internal),
    #[error("command execution failed")]
    Command,
    #[error("operation cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Field {
    Username,
    Password,
    Otp,
    AdminType,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match *self {
            Self::Username => "username",
            Self::Password => "password",
            Self::Otp => "one-time password",
            Self::AdminType => "administrator type",
        })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum Login {
    #[error("the {0} field is required")]
    MissingField(Field),
    #[error("{0} accounts sign in through the administrator portal")]
    Portal(Role),
    #[error(r#"unrecognized role "{}""#, .0.escape_default())]
    UnknownRole(String),
}

#[derive(Error, Debug)]
pub(crate) enum Camera {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera available: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub(crate) enum Decode {
    #[error("frame could not be decoded: {0}")]
    Frame(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum Checkin {
    #[error("a farm ID is required")]
    EmptyEntry,
    #[error(r#"scanned text "{}" does not identify a farm"#, .0.escape_default())]
    Unrecognized(String),
}

#[derive(Error, Debug)]
pub(crate) enum Storage {
    #[error("no data directory is available for this user")]
    NoProjectDirs,
}

#[derive(Error, Debug)]
pub(crate) enum Password {
    #[error("no password prompt available")]
    NoPrompt,
}

#[derive(Error, Debug)]
pub(crate) enum Internal {
    #[error("channel is closed")]
    ChannelClosed,
}

impl<T> From<mpsc::error::SendError<T>> for Internal {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::ChannelClosed
    }
}

impl From<oneshot::error::RecvError> for Internal {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::ChannelClosed
    }
}
