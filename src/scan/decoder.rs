// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::str;

use async_trait::async_trait;

use crate::error::{self, Result};

use super::camera::Frame;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    QrCode,
}

/// One machine-readable code found in a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Detected {
    pub(crate) payload: String,
    pub(crate) format: Format,
}

impl Detected {
    pub(crate) fn qr(payload: &str) -> Self {
        Self {
            payload: payload.to_owned(),
            format: Format::QrCode,
        }
    }
}

#[async_trait]
pub(crate) trait Decoder: Send + Sync {
    /// Returns the codes in `frame`, in decode order.
    async fn detect(&self, frame: &Frame) -> Result<Vec<Detected>>;
}

/// Whether the runtime can decode codes at all.
pub(crate) enum Capability {
    Available(Box<dyn Decoder>),
    Unavailable,
}

impl Capability {
    pub(crate) fn available<D: Decoder + 'static>(decoder: D) -> Self {
        Self::Available(Box::new(decoder))
    }

    pub(crate) const fn is_available(&self) -> bool {
        matches!(*self, Self::Available(_))
    }
}

/// Reads frame bytes as UTF-8 text with `|` between codes.
///
/// Pairs with [`super::camera::Replay`].
pub(crate) struct Text;

#[async_trait]
impl Decoder for Text {
    async fn detect(&self, frame: &Frame) -> Result<Vec<Detected>> {
        let text = str::from_utf8(frame.data())
            .map_err(|e| error::Decode::Frame(e.to_string()))?;
        if text.is_empty() {
            return Ok(vec![]);
        }

        Ok(text.split('|').map(str::trim).map(Detected::qr).collect())
    }
}
