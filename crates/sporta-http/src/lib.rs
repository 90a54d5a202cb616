//! sporta-http - REST backend and list sources for the Sporta booking client.

mod backend;
mod client;
pub mod endpoints;
pub mod sources;

pub use backend::{LoginOutput, SportaBackend};
pub use client::{RestClient, transport_error};
pub use endpoints::CreatedBooking;
pub use sources::{Collection, Screen};
