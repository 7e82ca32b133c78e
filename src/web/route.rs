//! Route definitions - domain model.
//!
//! Pure business logic, free of DOM and `web_sys` access. Defines every
//! route of the application together with its access rules.

use std::fmt::Display;

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// Login and registration page (default route for visitors)
    #[default]
    Login,
    /// Stats overview (requires authentication)
    Dashboard,
    /// Book catalogue management (requires authentication)
    Books,
    /// The current user's loans (requires authentication)
    Loans,
    /// Page not found
    NotFound,
}

impl AppRoute {
    /// Parse a URL path into a route.
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" => Self::Dashboard,
            "/login" => Self::Login,
            "/books" => Self::Books,
            "/loans" => Self::Loans,
            _ => Self::NotFound,
        }
    }

    /// The URL path of this route.
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/",
            Self::Books => "/books",
            Self::Loans => "/loans",
            Self::NotFound => "/404",
        }
    }

    /// **Core guard rule: does this route require a session?**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Books | Self::Loans)
    }

    /// Whether an authenticated user should be moved off this route
    /// (the login page).
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// Redirect target when the guard denies access.
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// Redirect target once authentication succeeds (from the login page).
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Books,
            AppRoute::Loans,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_paths_map_to_not_found() {
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/books/1"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
    }

    #[test]
    fn every_view_except_login_is_protected() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Books.requires_auth());
        assert!(AppRoute::Loans.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn redirect_targets() {
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Dashboard);
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Books.should_redirect_when_authenticated());
    }
}
