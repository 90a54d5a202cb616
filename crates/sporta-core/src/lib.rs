//! sporta-core - Core types, traits and the paginated list protocol of the
//! Sporta venue-booking client.

pub mod credentials;
pub mod error;
pub mod guard;
pub mod list;
pub mod models;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use list::{ControllerOptions, Envelope, ListController, ListQuery, ListSnapshot, QueryChange};
pub use session::SessionContext;
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{Identified, ListSource};
pub use types::{ApiUrl, Role, Route};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
