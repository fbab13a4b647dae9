// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod camera;
pub(crate) mod decoder;
pub(crate) mod engine;
pub(crate) mod worker;

pub(crate) use engine::{Engine, State};
