// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use log::debug;

use crate::routes;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    Push,
    /// Overwrite the current entry so "back" cannot return to it.
    Replace,
}

pub(crate) trait Navigator: Send {
    fn navigate(&mut self, path: &str, mode: Mode);

    /// Pops one entry. Returns false when there is nothing to go back to.
    fn back(&mut self) -> bool;

    fn current(&self) -> &str;
}

impl<T: Navigator + ?Sized> Navigator for Box<T> {
    fn navigate(&mut self, path: &str, mode: Mode) {
        (**self).navigate(path, mode);
    }

    fn back(&mut self) -> bool {
        (**self).back()
    }

    fn current(&self) -> &str {
        (**self).current()
    }
}

/// An in-memory navigation stack.
#[derive(Clone, Debug)]
pub(crate) struct History {
    entries: Vec<String>,
}

impl History {
    pub(crate) fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_owned()],
        }
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(routes::LANDING)
    }
}

impl Navigator for History {
    fn navigate(&mut self, path: &str, mode: Mode) {
        debug!("Navigating to {} ({:?})", path, mode);
        if mode == Mode::Replace {
            if let Some(last) = self.entries.last_mut() {
                path.clone_into(last);
                return;
            }
        }
        self.entries.push(path.to_owned());
    }

    fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            _ = self.entries.pop();
            true
        } else {
            false
        }
    }

    fn current(&self) -> &str {
        self.entries.last().map_or(routes::LANDING, String::as_str)
    }
}
