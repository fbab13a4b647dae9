// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use crate::session::Role;

pub(crate) const LANDING: &str = "/";

/// Unprefixed paths kept working for old links, with the pages they now live at.
const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("/farmer-registration", "/farmer/register"),
    ("/my-farms", "/farms"),
    ("/nearby-farms", "/visitor/nearby"),
    ("/gov-nearby-farm", "/government/nearby-farms"),
    ("/disease-alerts", "/farmer/alerts"),
    ("/admin-farm-management", "/admin/farms"),
    ("/admin-approvals", "/admin/approvals"),
    ("/scan-farm-qr", "/visitor/scan"),
    ("/recent-visits", "/visitor/recent"),
    ("/vet-scan-farm-qr", "/vet/scan"),
    ("/vet-alert", "/vet/alerts"),
];

/// Role-scoped pages that are reachable without signing in.
const OPEN_SCOPED: &[&str] = &["/farmer/register"];

/// A role-scoped path prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Area {
    Admin,
    System,
    Farmer,
    Government,
    Vet,
    Visitor,
}

impl Area {
    fn from_segment(segment: &str) -> Option<Self> {
        Some(match segment {
            "admin" => Self::Admin,
            "system" => Self::System,
            "farmer" => Self::Farmer,
            "government" => Self::Government,
            "vet" => Self::Vet,
            "visitor" => Self::Visitor,
            _ => return None,
        })
    }

    /// Whether a signed-in role may stay on pages in this area.
    pub(crate) const fn admits(self, role: Role) -> bool {
        matches!(
            (self, role),
            (Self::Admin, Role::Admin | Role::System)
                | (Self::System, Role::System)
                | (Self::Farmer, Role::Farmer)
                | (Self::Government, Role::Government)
                | (Self::Vet, Role::Veterinarian)
                | (Self::Visitor, Role::Visitor)
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    Public,
    Dashboard,
    Scoped(Area),
}

/// Strips trailing slashes and resolves legacy aliases.
pub(crate) fn canonicalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return LANDING.to_owned();
    }

    LEGACY_ALIASES
        .iter()
        .find(|&&(alias, _)| alias == trimmed)
        .map_or(trimmed, |&(_, target)| target)
        .to_owned()
}

/// Classifies a canonical path.
pub(crate) fn scope(path: &str) -> Scope {
    if path == "/dashboard" || path.starts_with("/dashboard/") {
        return Scope::Dashboard;
    }
    if OPEN_SCOPED.contains(&path) {
        return Scope::Public;
    }

    let mut segments = path.trim_start_matches('/').split('/');
    match segments.next().and_then(Area::from_segment) {
        Some(_) if segments.next() == Some("dashboard") => Scope::Dashboard,
        Some(area) => Scope::Scoped(area),
        None => Scope::Public,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_prefixed_pages() {
        assert_eq!(canonicalize("/scan-farm-qr"), "/visitor/scan");
        assert_eq!(canonicalize("/vet-alert/"), "/vet/alerts");
        assert_eq!(canonicalize("/my-farms"), "/farms");
        assert_eq!(canonicalize("/visitor/scan"), "/visitor/scan");
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        assert_eq!(canonicalize("/dashboard/"), "/dashboard");
        assert_eq!(canonicalize("/"), "/");
        assert_eq!(canonicalize(""), "/");
        assert_eq!(canonicalize("//"), "/");
    }

    #[test]
    fn scopes() {
        assert_eq!(scope("/"), Scope::Public);
        assert_eq!(scope("/login/admin/system"), Scope::Public);
        assert_eq!(scope("/farms/42"), Scope::Public);
        assert_eq!(scope("/farmer/register"), Scope::Public);
        assert_eq!(scope("/dashboard"), Scope::Dashboard);
        assert_eq!(scope("/dashboard/farmer"), Scope::Dashboard);
        assert_eq!(scope("/vet/dashboard"), Scope::Dashboard);
        assert_eq!(scope("/system/dashboard"), Scope::Dashboard);
        assert_eq!(scope("/vet/farm/7"), Scope::Scoped(Area::Vet));
        assert_eq!(
            scope("/government/farm-details/3"),
            Scope::Scoped(Area::Government)
        );
        assert_eq!(scope("/dashboards"), Scope::Public);
    }

    #[test]
    fn admin_area_admits_system_administrators() {
        assert!(Area::Admin.admits(Role::Admin));
        assert!(Area::Admin.admits(Role::System));
        assert!(!Area::System.admits(Role::Admin));
        assert!(Area::Vet.admits(Role::Veterinarian));
        assert!(!Area::Vet.admits(Role::Visitor));
    }
}
