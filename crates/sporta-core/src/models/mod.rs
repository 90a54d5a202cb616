//! View models of the booking backend.
//!
//! Optional fields default when absent; only `id` is required on list rows.

mod booking;
mod support;
mod usage;
mod user;
mod venue;

pub use booking::{Booking, BookingRequest, BookingStatus, StatusUpdate};
pub use support::{
    ActiveUsers, ContactKind, ContactMessage, PasswordReset, PasswordResetRequest, Priority,
};
pub use usage::UsageStat;
pub use user::{Profile, ProfileUpdate, Registration, SystemStats, User, UserForm};
pub use venue::{CatalogConfig, Venue, VenueForm};
