//! Core client types.
//!
//! These types validate at construction time so the rest of the client
//! never handles a malformed URL, role or route.

mod api_url;
mod role;
mod route;

pub use api_url::ApiUrl;
pub use role::Role;
pub use route::Route;
