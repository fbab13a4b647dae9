// SPDX-FileCopyrightText: 2026 Farmguard Contributors
//
// SPDX-License-Identifier: Apache-2.0

use log::{debug, info, warn};

use crate::{
    error::Result,
    login,
    navigation::{Mode, Navigator},
    routes::{self, Scope},
    session::{self, Role},
    storage::Storage,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Decision {
    Stay,
    Redirect(String),
}

pub(crate) fn dashboard(role: Role) -> String {
    format!("/{}/dashboard", role.path_segment())
}

/// Decides where a user holding `role` belongs when they are at `current`.
///
/// Resolving again from a redirect target always yields [`Decision::Stay`].
pub(crate) fn resolve_target(role: Option<Role>, current: &str) -> Decision {
    let (target, settled) = match role {
        None => (routes::LANDING.to_owned(), current == routes::LANDING),
        Some(role @ (Role::System | Role::Admin)) => {
            let target = dashboard(role);
            let settled = current == target;
            (target, settled)
        }
        Some(role @ (Role::Farmer | Role::Government | Role::Veterinarian | Role::Visitor)) => {
            let target = dashboard(role);
            let settled = current.starts_with(&target);
            (target, settled)
        }
    };

    if settled {
        Decision::Stay
    } else {
        Decision::Redirect(target)
    }
}

/// Keeps the user on pages their stored role is allowed to see.
pub(crate) struct Router<S, N> {
    store: session::Store<S>,
    navigator: N,
}

impl<S: Storage, N: Navigator> Router<S, N> {
    pub(crate) const fn new(store: session::Store<S>, navigator: N) -> Self {
        Self { store, navigator }
    }

    pub(crate) fn store_mut(&mut self) -> &mut session::Store<S> {
        &mut self.store
    }

    pub(crate) const fn navigator(&self) -> &N {
        &self.navigator
    }

    pub(crate) fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    async fn stored_role(&mut self) -> Option<Role> {
        match self.store.session().await {
            Ok(session) => session.role(),
            Err(e) => {
                warn!(
                    "Failed to read the stored session, so we are treating you as signed out: {}",
                    e
                );
                None
            }
        }
    }

    /// Re-evaluates the current location, redirecting at most once.
    pub(crate) async fn guard(&mut self) -> Decision {
        let current = routes::canonicalize(self.navigator.current());
        let decision = match routes::scope(&current) {
            Scope::Public => Decision::Stay,
            Scope::Dashboard => resolve_target(self.stored_role().await, &current),
            Scope::Scoped(area) => match self.stored_role().await {
                Some(role) if area.admits(role) => Decision::Stay,
                role => resolve_target(role, &current),
            },
        };

        match decision {
            Decision::Redirect(ref target) => {
                debug!("Redirecting from {} to {}", current, target);
                self.navigator.navigate(target, Mode::Replace);
            }
            Decision::Stay if current != self.navigator.current() => {
                self.navigator.navigate(&current, Mode::Replace);
            }
            Decision::Stay => {}
        }
        decision
    }

    /// Navigates to `path` and applies the guard to the new location.
    pub(crate) async fn visit(&mut self, path: &str) -> Decision {
        self.navigator.navigate(path, Mode::Push);
        self.guard().await
    }

    /// Establishes a session for the submitted form and lands on its dashboard.
    ///
    /// A form that fails validation leaves the session and location untouched.
    pub(crate) async fn login(&mut self, request: &login::Request) -> Result<String> {
        let role = request.validate()?;
        let session = self.store.establish(role, request.username()).await?;
        let target = dashboard(role);
        info!("Signed in as {} ({})", session.display_name(), role);

        self.navigator.navigate(&target, Mode::Replace);
        Ok(target)
    }

    pub(crate) async fn logout(&mut self) -> Result<()> {
        self.store.clear().await?;
        info!("Signed out");
        self.navigator.navigate(routes::LANDING, Mode::Push);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use async_trait::async_trait;
    use secrecy::SecretString;

    use crate::{
        error::{self, Result},
        login::{AdminKind, RequestBuilder},
        navigation::History,
        storage::{IsPersistent, Key, Memory},
    };

    use super::*;

    struct Broken;

    impl IsPersistent for Broken {
        fn is_persistent(&self) -> bool {
            true
        }
    }

    #[async_trait]
    impl Storage for Broken {
        async fn get(&mut self, _key: Key) -> Result<Option<String>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked").into())
        }

        async fn set(&mut self, _key: Key, _value: &str) -> Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked").into())
        }

        async fn remove(&mut self, _key: Key) -> Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked").into())
        }
    }

    async fn router_with_role(role: Option<&str>, at: &str) -> Result<(Router<Memory, History>, Memory)> {
        let mut storage = Memory::new();
        if let Some(role) = role {
            storage.set(Key::Role, role).await?;
        }
        let router = Router::new(session::Store::new(storage.clone()), History::new(at));
        Ok((router, storage))
    }

    #[test]
    fn known_roles_land_on_their_dashboards() {
        for role in Role::ALL {
            match resolve_target(Some(role), "/dashboard") {
                Decision::Redirect(target) => match role {
                    Role::Admin => assert_eq!(target, "/admin/dashboard"),
                    Role::System => assert_eq!(target, "/system/dashboard"),
                    Role::Farmer | Role::Government | Role::Veterinarian | Role::Visitor => {
                        assert!(target.starts_with(&format!("/{}/", role.path_segment())));
                    }
                },
                Decision::Stay => panic!("{role} should have been redirected"),
            }
        }
    }

    #[test]
    fn unset_role_lands_on_root() {
        assert_eq!(
            resolve_target(None, "/dashboard/farmer"),
            Decision::Redirect("/".to_owned())
        );
        assert_eq!(resolve_target(None, "/"), Decision::Stay);
    }

    #[test]
    fn resolving_from_a_target_is_a_fixed_point() {
        let paths = ["/", "/dashboard", "/vet/alerts", "/admin/dashboard/extra"];
        for role in Role::ALL.into_iter().map(Some).chain([None]) {
            for path in paths {
                let after = match resolve_target(role, path) {
                    Decision::Redirect(target) => target,
                    Decision::Stay => path.to_owned(),
                };
                assert_eq!(resolve_target(role, &after), Decision::Stay, "{role:?} {path}");
            }
        }
    }

    #[test]
    fn role_pages_under_the_dashboard_stay() {
        assert_eq!(
            resolve_target(Some(Role::Farmer), "/farmer/dashboard/tasks"),
            Decision::Stay
        );
        assert_eq!(
            resolve_target(Some(Role::System), "/system/dashboard/tasks"),
            Decision::Redirect("/system/dashboard".to_owned())
        );
    }

    #[tokio::test]
    async fn vet_synonym_is_normalized_and_routed() -> Result<()> {
        let (mut router, mut storage) = router_with_role(Some("vet"), "/dashboard").await?;

        assert_eq!(
            router.guard().await,
            Decision::Redirect("/vet/dashboard".to_owned())
        );
        assert_eq!(router.navigator().current(), "/vet/dashboard");
        assert_eq!(
            storage.get(Key::Role).await?.as_deref(),
            Some("veterinarian")
        );
        Ok(())
    }

    #[tokio::test]
    async fn signed_out_dashboard_goes_to_landing() -> Result<()> {
        let (mut router, _) = router_with_role(None, "/").await?;

        assert_eq!(
            router.visit("/dashboard/farmer").await,
            Decision::Redirect("/".to_owned())
        );
        assert_eq!(router.navigator().current(), "/");
        Ok(())
    }

    #[tokio::test]
    async fn second_guard_does_not_redirect_again() -> Result<()> {
        let (mut router, _) = router_with_role(Some("government"), "/dashboard").await?;

        assert!(matches!(router.guard().await, Decision::Redirect(_)));
        assert_eq!(router.guard().await, Decision::Stay);
        assert_eq!(router.navigator().current(), "/government/dashboard");
        Ok(())
    }

    #[tokio::test]
    async fn foreign_scopes_bounce_to_own_dashboard() -> Result<()> {
        let (mut router, _) = router_with_role(Some("visitor"), "/").await?;

        assert_eq!(router.visit("/visitor/scan").await, Decision::Stay);
        assert_eq!(
            router.visit("/vet/scan").await,
            Decision::Redirect("/visitor/dashboard".to_owned())
        );
        assert_eq!(router.visit("/farms/42").await, Decision::Stay);
        Ok(())
    }

    #[tokio::test]
    async fn system_administrators_may_use_admin_pages() -> Result<()> {
        let (mut router, _) = router_with_role(Some("system"), "/").await?;

        assert_eq!(router.visit("/admin/approvals").await, Decision::Stay);
        assert_eq!(
            router.visit("/admin/dashboard").await,
            Decision::Redirect("/system/dashboard".to_owned())
        );
        Ok(())
    }

    #[tokio::test]
    async fn legacy_aliases_behave_like_prefixed_paths() -> Result<()> {
        for role in ["visitor", "farmer"] {
            let (mut legacy, _) = router_with_role(Some(role), "/").await?;
            let (mut prefixed, _) = router_with_role(Some(role), "/").await?;

            assert_eq!(
                legacy.visit("/scan-farm-qr").await,
                prefixed.visit("/visitor/scan").await
            );
            assert_eq!(legacy.navigator().current(), prefixed.navigator().current());
        }
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_store_degrades_to_landing() {
        let mut router = Router::new(session::Store::new(Broken), History::new("/dashboard"));

        assert_eq!(router.guard().await, Decision::Redirect("/".to_owned()));
        assert_eq!(router.navigator().current(), "/");
    }

    #[tokio::test]
    async fn farmer_login_replaces_the_login_page() -> Result<()> {
        let (mut router, mut storage) = router_with_role(None, "/").await?;
        router
            .navigator_mut()
            .navigate("/login/farmer", Mode::Push);

        let req = RequestBuilder::new(Role::Farmer)
            .with_username("abc")
            .with_password(SecretString::new("123".to_owned()))
            .into_request();
        assert_eq!(router.login(&req).await?, "/farmer/dashboard");

        assert_eq!(storage.get(Key::Role).await?.as_deref(), Some("farmer"));
        assert_eq!(storage.get(Key::DisplayName).await?.as_deref(), Some("abc"));
        assert_eq!(router.navigator().entries(), ["/", "/farmer/dashboard"]);
        assert!(router.navigator_mut().back());
        assert_eq!(router.navigator().current(), "/");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_mutates_nothing() -> Result<()> {
        let (mut router, mut storage) = router_with_role(Some("visitor"), "/login/admin").await?;

        let req = RequestBuilder::new(Role::Admin)
            .with_username("root")
            .into_request();
        assert!(matches!(
            router.login(&req).await,
            Err(error::Error::Login(error::Login::MissingField(_)))
        ));
        assert_eq!(storage.get(Key::Role).await?.as_deref(), Some("visitor"));
        assert_eq!(router.navigator().current(), "/login/admin");
        Ok(())
    }

    #[tokio::test]
    async fn government_login_through_admin_portal() -> Result<()> {
        let (mut router, _) = router_with_role(None, "/login/admin/government").await?;

        let req = RequestBuilder::new(Role::Admin)
            .with_admin_kind(AdminKind::Government)
            .with_username("official")
            .with_password(SecretString::new("pw".to_owned()))
            .into_request();
        assert_eq!(router.login(&req).await?, "/government/dashboard");
        assert_eq!(router.guard().await, Decision::Stay);
        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_session_and_returns_to_landing() -> Result<()> {
        let (mut router, mut storage) = router_with_role(Some("farmer"), "/farmer/dashboard").await?;
        storage.set(Key::AuthToken, "mock-farmer-token").await?;

        router.logout().await?;

        assert_eq!(storage.get(Key::Role).await?, None);
        assert_eq!(storage.get(Key::AuthToken).await?, None);
        assert_eq!(router.navigator().current(), "/");
        assert_eq!(router.visit("/farmer/dashboard").await, Decision::Redirect("/".to_owned()));
        Ok(())
    }
}
