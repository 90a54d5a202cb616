//! REST endpoint paths and request/response bodies.

use serde::{Deserialize, Serialize};

// ============================================================================
// Auth and profile
// ============================================================================

pub const LOGIN: &str = "/api/login/";
pub const TOKEN_REFRESH: &str = "/api/token/refresh/";
pub const REGISTER: &str = "/api/register/";
pub const PROFILE: &str = "/api/profile/";
pub const FORGOT_PASSWORD: &str = "/api/forgot-password/";
pub const VERIFY_CODE: &str = "/api/verify-code/";

// ============================================================================
// Collections
// ============================================================================

pub const HALLS: &str = "/api/halls/";
pub const ADMIN_HALLS: &str = "/api/admin/halls/";
pub const ADMIN_BOOKINGS: &str = "/api/admin-halls/bookings/";
pub const USERS: &str = "/api/users/";
pub const USAGE_STATS: &str = "/api/admin/halls/usage-stats/";
pub const MY_BOOKINGS: &str = "/api/bookings/my-history/";

// ============================================================================
// Mutations and lookups
// ============================================================================

pub const HALL_CREATE: &str = "/api/halls/create/";
pub const HALL_FACILITIES: &str = "/api/halls/facilities/";
pub const HALL_CONFIG: &str = "/api/halls/config/";
pub const BOOKING_CREATE: &str = "/api/bookings/create/";
pub const USER_CREATE: &str = "/api/users/create/";
pub const SYSTEM_STATS: &str = "/api/system/stats/";
pub const ACTIVE_USERS: &str = "/api/admin/users/active-count";
pub const CONTACT: &str = "/api/contact/";

pub fn hall(id: u64) -> String {
    format!("/api/halls/{id}/")
}

pub fn hall_update(id: u64) -> String {
    format!("/api/halls/update/{id}/")
}

pub fn hall_update_facilities(id: u64) -> String {
    format!("/api/halls/update-facilities/{id}/")
}

pub fn hall_delete(id: u64) -> String {
    format!("/api/halls/delete/{id}/")
}

pub fn booking_status(id: u64) -> String {
    format!("/api/admin-halls/bookings/{id}/status/")
}

pub fn user_update(id: u64) -> String {
    format!("/api/users/update/{id}")
}

pub fn user_delete(id: u64) -> String {
    format!("/api/users/delete/{id}")
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Token pair returned by login.
#[derive(Debug, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from token refresh. Rotation may return a new refresh token.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Request body for the facilities update.
#[derive(Debug, Serialize)]
pub struct FacilitiesRequest<'a> {
    pub facilities: &'a [String],
}

/// Facility names, either bare or as `{name}` objects.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FacilityEntry {
    Name(String),
    Object { name: String },
}

impl FacilityEntry {
    pub fn into_name(self) -> String {
        match self {
            FacilityEntry::Name(name) | FacilityEntry::Object { name } => name,
        }
    }
}

/// Response from booking creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedBooking {
    pub id: u64,
    #[serde(default)]
    pub status: sporta_core::models::BookingStatus,
}
