//! Backend envelope and the response normalizer.
//!
//! Every endpoint wraps its payload as `{status, message, data}`, but the
//! list endpoints disagree on where the rows and the pagination numbers
//! live. [`Envelope::normalize`] is the one place that knows all the shapes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApiError, DEFAULT_FAILURE_MESSAGE, Error};
use crate::Result;

use super::ListResult;

/// Keys that may hold the row array, in lookup order.
const ITEM_KEYS: &[&str] = &["results", "items", "data"];

/// Keys that may hold the total row count, in lookup order.
const TOTAL_KEYS: &[&str] = &["total_items", "count", "total"];

/// The uniform response wrapper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
    /// Pagination keys some endpoints put beside `data`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A response reduced to what a list screen needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub ok: bool,
    pub items: Vec<Value>,
    pub total_pages: u32,
    pub page: u32,
    pub message: String,
}

impl Envelope {
    /// A successful envelope around `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            status: true,
            message: None,
            data,
            extra: Map::new(),
        }
    }

    /// A failed envelope with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: Some(message.into()),
            data: Value::Null,
            extra: Map::new(),
        }
    }

    /// Returns the message, if the server sent a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// Reduce the envelope to `{ok, items, total_pages, page, message}`.
    ///
    /// `requested_page_size` stands in when the response omits `page_size`.
    /// Never fails; `total_pages` and `page` are always at least 1.
    pub fn normalize(&self, requested_page_size: u32) -> Normalized {
        if !self.status {
            return Normalized {
                ok: false,
                items: Vec::new(),
                total_pages: 1,
                page: 1,
                message: self.message().unwrap_or(DEFAULT_FAILURE_MESSAGE).to_string(),
            };
        }

        let items = self.items();
        let total = self
            .number(TOTAL_KEYS)
            .unwrap_or(items.len() as u64);
        let page_size = self
            .number(&["page_size"])
            .unwrap_or(u64::from(requested_page_size));

        let total_pages = match self.number(&["total_pages"]) {
            Some(pages) if pages > 0 => pages,
            _ => total_pages(total, page_size),
        };
        let page = self.number(&["page"]).unwrap_or(1).max(1);

        Normalized {
            ok: true,
            items,
            total_pages: clamp_u32(total_pages),
            page: clamp_u32(page),
            message: self.message().unwrap_or_default().to_string(),
        }
    }

    /// Returns the entity nested under `data.<key>`, or `data` itself.
    ///
    /// Mutation endpoints answer with either shape.
    pub fn entity<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        if !self.status {
            return Err(ApiError::new(None, self.message().map(str::to_string)).into());
        }
        let value = match self.data.get(key) {
            Some(nested) if nested.is_object() => nested.clone(),
            _ => self.data.clone(),
        };
        serde_json::from_value(value).map_err(Error::decode)
    }

    /// Fail with the envelope message unless `status` is true.
    pub fn into_success(self) -> Result<Self> {
        if self.status {
            Ok(self)
        } else {
            Err(ApiError::new(None, self.message().map(str::to_string)).into())
        }
    }

    fn items(&self) -> Vec<Value> {
        if let Value::Array(rows) = &self.data {
            return rows.clone();
        }
        ITEM_KEYS
            .iter()
            .find_map(|key| {
                self.data
                    .get(*key)
                    .or_else(|| self.extra.get(*key))
                    .and_then(Value::as_array)
            })
            .cloned()
            .unwrap_or_default()
    }

    fn number(&self, keys: &[&str]) -> Option<u64> {
        keys.iter().find_map(|key| {
            self.data
                .get(*key)
                .and_then(as_count)
                .or_else(|| self.extra.get(*key).and_then(as_count))
        })
    }
}

impl Normalized {
    /// Decode the rows, turning `ok: false` into an [`ApiError`].
    pub fn into_result<T: DeserializeOwned>(self) -> Result<ListResult<T>> {
        if !self.ok {
            return Err(ApiError::new(None, Some(self.message)).into());
        }
        let items = self
            .items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(Error::decode)?;

        Ok(ListResult {
            items,
            total_pages: self.total_pages,
            page: self.page,
        })
    }
}

/// `ceil(total / page_size)`, never below 1.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Accepts integers, non-negative finite floats and numeric strings.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.floor() as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
