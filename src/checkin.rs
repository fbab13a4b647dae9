// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use clap::ValueEnum;
use log::{info, warn};
use url::Url;

use crate::{
    error::{self, Result},
    navigation::{Mode, Navigator},
};

/// How a page reads the text of a farm code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Policy {
    /// The whole text is the farm ID.
    BareId,
    /// A `/farms/...` path or a URL embedding one, otherwise a farm ID.
    PathOrUrl,
}

/// The pages that check a user in to a farm.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Page {
    Visitor,
    #[value(alias = "vet")]
    Veterinarian,
    Government,
}

impl Page {
    pub(crate) const fn policy(self) -> Policy {
        match self {
            Self::Visitor => Policy::PathOrUrl,
            Self::Veterinarian | Self::Government => Policy::BareId,
        }
    }

    pub(crate) const fn scan_path(self) -> &'static str {
        match self {
            Self::Visitor => "/visitor/scan",
            Self::Veterinarian => "/vet/scan",
            Self::Government => "/government/scan-farm",
        }
    }

    pub(crate) fn farm_path(self, id: &str) -> String {
        match self {
            Self::Visitor => format!("/farms/{id}"),
            Self::Veterinarian => format!("/vet/farm/{id}"),
            Self::Government => format!("/government/farm-details/{id}"),
        }
    }

    /// Whether switching cameras reopens a camera that was streaming.
    pub(crate) const fn restarts_on_toggle(self) -> bool {
        matches!(self, Self::Visitor)
    }

    /// Works out where a scanned or typed farm code leads.
    pub(crate) fn interpret(self, text: &str) -> Result<Destination, error::Checkin> {
        match self.policy() {
            Policy::BareId => Ok(Destination::Page(self.farm_path(text))),
            Policy::PathOrUrl if text.starts_with("/farms/") => {
                Ok(Destination::Page(text.to_owned()))
            }
            Policy::PathOrUrl if is_web_link(text) => {
                let url = Url::parse(text)
                    .map_err(|_| error::Checkin::Unrecognized(text.to_owned()))?;
                Ok(farm_id(&url).map_or_else(
                    || Destination::External(url.clone()),
                    |id| Destination::Page(self.farm_path(id)),
                ))
            }
            Policy::PathOrUrl => Ok(Destination::Page(self.farm_path(text))),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Visitor => "visitor",
            Self::Veterinarian => "veterinarian",
            Self::Government => "government",
        })
    }
}

/// Whether `text` starts with an `http://` or `https://` scheme, in any case.
fn is_web_link(text: &str) -> bool {
    ["http://", "https://"].into_iter().any(|scheme| {
        text.get(..scheme.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Finds the ID after the first `/farms/` segment that is followed by one.
///
/// IDs are made of ASCII letters, digits and underscores.
fn farm_id(url: &Url) -> Option<&str> {
    let segments = url.path_segments()?;
    let following = url.path_segments()?.skip(1);
    segments
        .zip(following)
        .filter(|&(segment, _)| segment == "farms")
        .map(|(_, next)| {
            next.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .next()
                .unwrap_or_default()
        })
        .find(|id| !id.is_empty())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Destination {
    Page(String),
    /// Somewhere outside the app, left for the host to open.
    External(Url),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Page(ref path) => f.write_str(path),
            Self::External(ref url) => write!(f, "{url}"),
        }
    }
}

/// Consumes scan results and manual entries on behalf of one page.
pub(crate) struct Checkin<'nav, N> {
    page: Page,
    navigator: &'nav mut N,
}

impl<'nav, N: Navigator> Checkin<'nav, N> {
    pub(crate) fn new(page: Page, navigator: &'nav mut N) -> Self {
        Self { page, navigator }
    }

    fn go(&mut self, destination: Destination) -> Destination {
        match destination {
            Destination::Page(ref path) => {
                info!("Checking in at {}", path);
                self.navigator.navigate(path, Mode::Push);
            }
            Destination::External(ref url) => {
                warn!("The scanned code points outside the app, to {}", url);
            }
        }
        destination
    }

    /// Navigates for the text a scan resolved to.
    pub(crate) fn resolved(&mut self, text: &str) -> Result<Destination> {
        let destination = self.page.interpret(text)?;
        Ok(self.go(destination))
    }

    /// Navigates for a farm ID typed by hand. Works without any camera.
    pub(crate) fn submit_manual(&mut self, input: &str) -> Result<Destination> {
        let input = input.trim();
        if input.is_empty() {
            return Err(error::Checkin::EmptyEntry.into());
        }

        let destination = self.page.interpret(input)?;
        Ok(self.go(destination))
    }
}

#[cfg(test)]
mod tests {
    use crate::navigation::History;

    use super::*;

    fn page(path: &str) -> Destination {
        Destination::Page(path.to_owned())
    }

    #[test]
    fn bare_ids_become_farm_pages() -> Result<(), error::Checkin> {
        assert_eq!(Page::Visitor.interpret("42")?, page("/farms/42"));
        assert_eq!(Page::Veterinarian.interpret("42")?, page("/vet/farm/42"));
        assert_eq!(
            Page::Government.interpret("F-7")?,
            page("/government/farm-details/F-7")
        );
        Ok(())
    }

    #[test]
    fn visitor_accepts_paths_and_urls() -> Result<(), error::Checkin> {
        assert_eq!(Page::Visitor.interpret("/farms/9")?, page("/farms/9"));
        assert_eq!(
            Page::Visitor.interpret("https://farmguard.example/farms/abc_1?src=qr")?,
            page("/farms/abc_1")
        );
        assert_eq!(
            Page::Visitor.interpret("http://farmguard.example/en/farms/77/visit")?,
            page("/farms/77")
        );
        assert!(matches!(
            Page::Visitor.interpret("https://example.org/about")?,
            Destination::External(_)
        ));
        assert_eq!(
            Page::Visitor.interpret("HTTPS://farm.example/farms/12")?,
            page("/farms/12")
        );
        assert_eq!(
            Page::Visitor.interpret("https://farm.example/farms/-/farms/12")?,
            page("/farms/12")
        );
        assert_eq!(
            Page::Visitor.interpret("https://farm.example/farms/12\u{e9}x")?,
            page("/farms/12")
        );
        assert!(matches!(
            Page::Visitor.interpret("https://farm.example/farms/\u{e9}12")?,
            Destination::External(_)
        ));
        assert_eq!(
            Page::Visitor.interpret("http://"),
            Err(error::Checkin::Unrecognized("http://".to_owned()))
        );
        Ok(())
    }

    #[test]
    fn bare_id_pages_do_not_parse_urls() -> Result<(), error::Checkin> {
        assert_eq!(
            Page::Veterinarian.interpret("/farms/9")?,
            page("/vet/farm//farms/9")
        );
        Ok(())
    }

    #[test]
    fn only_the_visitor_page_restarts() {
        assert!(Page::Visitor.restarts_on_toggle());
        assert!(!Page::Veterinarian.restarts_on_toggle());
        assert!(!Page::Government.restarts_on_toggle());
    }

    #[test]
    fn resolved_text_navigates() -> Result<()> {
        let mut history = History::new(Page::Visitor.scan_path());
        let destination = Checkin::new(Page::Visitor, &mut history).resolved("42")?;

        assert_eq!(destination, page("/farms/42"));
        assert_eq!(history.entries(), ["/visitor/scan", "/farms/42"]);
        Ok(())
    }

    #[test]
    fn external_codes_stay_on_the_page() -> Result<()> {
        let mut history = History::new(Page::Visitor.scan_path());
        _ = Checkin::new(Page::Visitor, &mut history).resolved("https://example.org/")?;

        assert_eq!(history.entries(), ["/visitor/scan"]);
        Ok(())
    }

    #[test]
    fn manual_entry_is_trimmed() -> Result<()> {
        let mut history = History::new(Page::Government.scan_path());
        let mut checkin = Checkin::new(Page::Government, &mut history);

        assert!(matches!(
            checkin.submit_manual("   "),
            Err(error::Error::Checkin(error::Checkin::EmptyEntry))
        ));
        assert_eq!(
            checkin.submit_manual("  12 \n")?,
            page("/government/farm-details/12")
        );
        assert_eq!(history.current(), "/government/farm-details/12");
        Ok(())
    }
}
