//! Venue (hall) view models.

use serde::{Deserialize, Serialize};

use crate::traits::Identified;
use crate::{Error, Result};

/// A bookable sports venue as the listing endpoints return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default, alias = "price_per_hour")]
    pub price_per_hour: u64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "location")]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl Identified for Venue {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Body of the venue create and update forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub sport: String,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl VenueForm {
    /// Check required fields and trim them.
    ///
    /// `cities` and `sports` are the configured choices; empty slices accept
    /// any value.
    pub fn validated(mut self, cities: &[String], sports: &[String]) -> Result<Self> {
        self.name = required("name", &self.name, "Name is required.")?;
        self.address = required("address", &self.address, "Address is required.")?;
        self.city = required("city", &self.city, "City is required.")?;
        if !cities.is_empty() && !cities.contains(&self.city) {
            return Err(Error::validation("city", "Please select a valid city."));
        }
        self.sport = required("sport", &self.sport, "Sport is required.")?;
        if !sports.is_empty() && !sports.contains(&self.sport) {
            return Err(Error::validation("sport", "Please select a valid sport."));
        }
        if self.price_per_hour == 0 {
            return Err(Error::validation("pricePerHour", "Price per hour is required."));
        }
        self.cover_image = self
            .cover_image
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(self)
    }
}

/// Cities and sports offered by the backend's dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub sports: Vec<String>,
}

pub(crate) fn required(field: &'static str, value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation(field, message))
    } else {
        Ok(trimmed.to_string())
    }
}
