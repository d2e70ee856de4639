//! Route access decisions based on the stored session.

use crate::session::SessionStore;

/// Pages of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Dashboard,
    Campaigns,
    Analytics,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/auth/login",
            Route::Signup => "/auth/signup",
            Route::Dashboard => "/dashboard",
            Route::Campaigns => "/campaigns",
            Route::Analytics => "/analytics",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        [
            Route::Landing,
            Route::Login,
            Route::Signup,
            Route::Dashboard,
            Route::Campaigns,
            Route::Analytics,
        ]
        .into_iter()
        .find(|r| r.path() == path)
    }

    /// Routes that require a session token
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Campaigns | Route::Analytics)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Outcome of a route check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

/// Pure decision: whether `route` may render given the session state
pub fn check(route: Route, authenticated: bool) -> Access {
    match route {
        Route::Landing if authenticated => Access::Redirect(Route::Dashboard),
        Route::Landing => Access::Redirect(Route::Login),
        r if r.is_protected() && !authenticated => Access::Redirect(Route::Login),
        _ => Access::Allow,
    }
}

/// Decide access against a live session store
pub async fn guard(route: Route, session: &SessionStore) -> Access {
    let access = check(route, session.is_authenticated().await);
    if let Access::Redirect(to) = access {
        tracing::debug!(from = %route, to = %to, "Route redirected");
    }
    access
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::from_path("/dashboard/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/"), Some(Route::Landing));
        assert_eq!(Route::from_path("/auth/login"), Some(Route::Login));
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn test_protected_routes_need_session() {
        for route in [Route::Dashboard, Route::Campaigns, Route::Analytics] {
            assert_eq!(check(route, false), Access::Redirect(Route::Login));
            assert_eq!(check(route, true), Access::Allow);
        }
    }

    #[test]
    fn test_landing_redirects() {
        assert_eq!(check(Route::Landing, true), Access::Redirect(Route::Dashboard));
        assert_eq!(check(Route::Landing, false), Access::Redirect(Route::Login));
    }

    #[test]
    fn test_auth_pages_always_open() {
        assert_eq!(check(Route::Login, false), Access::Allow);
        assert_eq!(check(Route::Signup, true), Access::Allow);
    }

    #[tokio::test]
    async fn test_offline_session_passes_guard() {
        let session = SessionStore::in_memory();
        assert_eq!(guard(Route::Analytics, &session).await, Access::Redirect(Route::Login));

        session.set_token(crate::fallback::OFFLINE_TOKEN).await.unwrap();
        assert_eq!(guard(Route::Analytics, &session).await, Access::Allow);
    }
}
