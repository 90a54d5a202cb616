//! Venue usage report rows.

use serde::{Deserialize, Serialize};

use crate::traits::Identified;

/// Booking volume of one venue over the selected date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStat {
    #[serde(alias = "hall_id")]
    pub id: u64,
    #[serde(default, alias = "hall_name")]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default, alias = "num_bookings")]
    pub total_bookings: u64,
    #[serde(default)]
    pub confirmed_bookings: u64,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub revenue: u64,
}

impl Identified for UsageStat {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_hall_keys() {
        let row: UsageStat = serde_json::from_value(json!({
            "hall_id": 4,
            "hall_name": "Pulse Club",
            "num_bookings": 17
        }))
        .unwrap();
        assert_eq!(row.id, 4);
        assert_eq!(row.name, "Pulse Club");
        assert_eq!(row.total_bookings, 17);
    }
}
