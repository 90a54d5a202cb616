//! Role-gated navigation.
//!
//! The table below only decides which screens the client offers. The backend
//! re-derives the caller's role from the bearer token on every protected
//! request; nothing here is a security boundary.

use tracing::debug;

use crate::session::SessionContext;
use crate::types::{Role, Route};

const EVERYONE: &[Role] = &[Role::SysAdmin, Role::VenueManager, Role::User, Role::Anonymous];
const SYS_ADMIN: &[Role] = &[Role::SysAdmin];
const STAFF: &[Role] = &[Role::SysAdmin, Role::VenueManager];
const MEMBERS: &[Role] = &[Role::User];

/// Roles permitted to open a route.
pub fn permitted_roles(route: Route) -> &'static [Role] {
    match route {
        Route::Home
        | Route::Login
        | Route::Register
        | Route::ForgotPassword
        | Route::ResetPassword
        | Route::ContactSupport
        | Route::VenueDetails(_) => EVERYONE,
        Route::Profile => MEMBERS,
        Route::AdminDashboard | Route::AdminUsers | Route::AdminActiveUsers => SYS_ADMIN,
        Route::AdminVenues | Route::AdminBookings | Route::AdminUsageStats => STAFF,
    }
}

/// Returns true if `role` may open `route`.
pub fn can_access(route: Route, role: Role) -> bool {
    permitted_roles(route).contains(&role)
}

/// Resolve a requested path to the route that is actually shown.
///
/// Unknown paths and denied routes redirect to [`Route::Home`].
pub fn resolve(path: &str, session: &SessionContext) -> Route {
    match Route::parse(path) {
        Some(route) if can_access(route, session.role()) => route,
        Some(route) => {
            debug!(%route, role = %session.role(), "route denied, redirecting home");
            Route::Home
        }
        None => {
            debug!(path, "unknown route, redirecting home");
            Route::Home
        }
    }
}

/// Admin sidebar entries visible to a role, in display order.
pub fn admin_menu(role: Role) -> Vec<Route> {
    [
        Route::AdminDashboard,
        Route::AdminUsers,
        Route::AdminVenues,
        Route::AdminBookings,
        Route::AdminUsageStats,
        Route::AdminActiveUsers,
    ]
    .into_iter()
    .filter(|route| can_access(*route, role))
    .collect()
}
