//! Core traits for list rows and list endpoints.

mod identified;
mod list_source;

pub use identified::Identified;
pub use list_source::ListSource;
