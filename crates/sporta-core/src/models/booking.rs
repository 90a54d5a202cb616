//! Booking view models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;
use crate::traits::Identified;
use crate::{Error, Result};

/// Lifecycle of a booking request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    #[serde(alias = "canceled")]
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(InvalidInputError::BookingStatus {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// A booking row of the admin table and the booking history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: u64,
    #[serde(default)]
    pub hall_name: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Start time as sent by the server, e.g. `18:00:00`.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub duration_hours: f64,
    #[serde(default)]
    pub price: u64,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Identified for Booking {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Body of the booking form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub hall: u64,
    pub date: NaiveDate,
    #[serde(serialize_with = "serialize_time")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "serialize_time")]
    pub end_time: NaiveTime,
}

impl BookingRequest {
    /// Build a request, rejecting an empty or inverted time range.
    pub fn new(hall: u64, date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Result<Self> {
        if end_time <= start_time {
            return Err(Error::validation(
                "end_time",
                "End time must be after start time.",
            ));
        }
        Ok(Self {
            hall,
            date,
            start_time,
            end_time,
        })
    }
}

/// Body of the admin booking status update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
}

impl StatusUpdate {
    pub fn confirm() -> Self {
        Self {
            status: BookingStatus::Confirmed,
            cancel_reason: None,
        }
    }

    /// Cancel with an optional reason; a blank reason is dropped.
    pub fn cancel(reason: Option<&str>) -> Self {
        Self {
            status: BookingStatus::Cancelled,
            cancel_reason: reason
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }
}

fn serialize_time<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&time.format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn history_row_decodes() {
        let booking: Booking = serde_json::from_value(json!({
            "id": 9001,
            "hallName": "Arena Fit Center",
            "sport": "Football",
            "date": "2026-02-12",
            "time": "18:00:00",
            "durationHours": 2.0,
            "price": 900,
            "status": "canceled"
        }))
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2026, 2, 12));
    }

    #[test]
    fn inverted_range_rejected() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
        let six = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        let four = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        assert!(BookingRequest::new(1, date, six, four).is_err());
        assert!(BookingRequest::new(1, date, six, six).is_err());
        assert!(BookingRequest::new(1, date, four, six).is_ok());
    }

    #[test]
    fn request_serializes_times() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 12).unwrap();
        let start = NaiveTime::from_hms_opt(16, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
        let body = serde_json::to_value(BookingRequest::new(3, date, start, end).unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"hall": 3, "date": "2026-02-12", "start_time": "16:00:00", "end_time": "18:30:00"})
        );
    }

    #[test]
    fn blank_cancel_reason_dropped() {
        let body = serde_json::to_value(StatusUpdate::cancel(Some("   "))).unwrap();
        assert_eq!(body, json!({"status": "cancelled"}));
    }

    #[test]
    fn status_parses_both_spellings() {
        assert_eq!("Canceled".parse::<BookingStatus>().unwrap(), BookingStatus::Cancelled);
        assert!("lost".parse::<BookingStatus>().is_err());
    }
}
