//! Client-side navigation routes.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A screen of the booking client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    ContactSupport,
    VenueDetails(u64),
    Profile,
    AdminDashboard,
    AdminUsers,
    AdminVenues,
    AdminBookings,
    AdminUsageStats,
    AdminActiveUsers,
}

impl Route {
    /// Parse a path, returning `None` for paths the client does not know.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/forgot-password" => Route::ForgotPassword,
            "/reset-password" => Route::ResetPassword,
            "/contact-support" => Route::ContactSupport,
            "/profile" => Route::Profile,
            "/admin" => Route::AdminDashboard,
            "/admin/users" => Route::AdminUsers,
            "/admin/venues" => Route::AdminVenues,
            "/admin/bookings" => Route::AdminBookings,
            "/admin/halls/usage-stats" => Route::AdminUsageStats,
            "/admin/active-users-count" => Route::AdminActiveUsers,
            other => {
                let id = other.strip_prefix("/venues/")?.parse().ok()?;
                Route::VenueDetails(id)
            }
        };
        Some(route)
    }

    /// Returns the canonical path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::ForgotPassword => "/forgot-password".to_string(),
            Route::ResetPassword => "/reset-password".to_string(),
            Route::ContactSupport => "/contact-support".to_string(),
            Route::VenueDetails(id) => format!("/venues/{id}"),
            Route::Profile => "/profile".to_string(),
            Route::AdminDashboard => "/admin".to_string(),
            Route::AdminUsers => "/admin/users".to_string(),
            Route::AdminVenues => "/admin/venues".to_string(),
            Route::AdminBookings => "/admin/bookings".to_string(),
            Route::AdminUsageStats => "/admin/halls/usage-stats".to_string(),
            Route::AdminActiveUsers => "/admin/active-users-count".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s).ok_or_else(|| {
            InvalidInputError::Other {
                message: format!("unknown route '{s}'"),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/admin/"), Some(Route::AdminDashboard));
        assert_eq!(Route::parse("/venues/42"), Some(Route::VenueDetails(42)));
        assert_eq!(Route::parse("/contact-support"), Some(Route::ContactSupport));
        assert_eq!(Route::parse("/admin/active-users-count"), Some(Route::AdminActiveUsers));
        assert_eq!(
            Route::parse("/admin/halls/usage-stats?page=2"),
            Some(Route::AdminUsageStats)
        );
    }

    #[test]
    fn unknown_paths_are_none() {
        assert_eq!(Route::parse("/venues/abc"), None);
        assert_eq!(Route::parse("/admin/schedule"), None);
    }

    #[test]
    fn path_round_trips_through_parse() {
        let route = Route::VenueDetails(7);
        assert_eq!(Route::parse(&route.path()), Some(route));
    }
}
