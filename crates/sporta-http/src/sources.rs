//! Collection endpoints as list sources, one per screen.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use sporta_core::{AccessToken, Envelope, Identified, ListQuery, ListSource, Result};

use crate::client::RestClient;
use crate::endpoints;

/// A list screen's collection endpoint and the filters it understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub name: &'static str,
    pub path: &'static str,
    pub filters: &'static [&'static str],
}

impl Screen {
    /// Returns true if `key` is a filter of this screen.
    pub fn accepts(&self, key: &str) -> bool {
        self.filters.contains(&key)
    }

    /// Wire parameters for `query`, without filters this screen ignores.
    pub fn params(&self, query: &ListQuery) -> Vec<(String, String)> {
        query
            .params()
            .into_iter()
            .filter(|(key, _)| {
                let keep = PAGING_KEYS.contains(&key.as_str()) || self.accepts(key);
                if !keep {
                    warn!(screen = self.name, filter = %key, "dropping unsupported filter");
                }
                keep
            })
            .collect()
    }
}

const PAGING_KEYS: &[&str] = &["page", "page_size", "search"];

pub const VENUE_CAROUSEL: Screen = Screen {
    name: "venues",
    path: endpoints::HALLS,
    filters: &["sport"],
};

pub const ADMIN_VENUES: Screen = Screen {
    name: "admin venues",
    path: endpoints::ADMIN_HALLS,
    filters: &["city", "sport"],
};

pub const ADMIN_BOOKINGS: Screen = Screen {
    name: "admin bookings",
    path: endpoints::ADMIN_BOOKINGS,
    filters: &["status", "from", "to"],
};

pub const ADMIN_USERS: Screen = Screen {
    name: "admin users",
    path: endpoints::USERS,
    filters: &["role", "active"],
};

pub const USAGE_STATS: Screen = Screen {
    name: "usage stats",
    path: endpoints::USAGE_STATS,
    filters: &["city", "sport", "start_date", "end_date"],
};

pub const MY_BOOKINGS: Screen = Screen {
    name: "my bookings",
    path: endpoints::MY_BOOKINGS,
    filters: &["status"],
};

/// A paginated collection of `T` rows.
pub struct Collection<T> {
    client: RestClient,
    screen: Screen,
    token: Option<AccessToken>,
    _rows: PhantomData<fn() -> T>,
}

impl<T> Collection<T> {
    pub fn new(client: RestClient, screen: Screen, token: Option<AccessToken>) -> Self {
        Self {
            client,
            screen,
            token,
            _rows: PhantomData,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("screen", &self.screen.name)
            .field("path", &self.screen.path)
            .field("authed", &self.token.is_some())
            .finish()
    }
}

#[async_trait]
impl<T> ListSource for Collection<T>
where
    T: Identified + DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Item = T;

    #[instrument(skip(self), fields(screen = self.screen.name))]
    async fn fetch(&self, query: &ListQuery) -> Result<Envelope> {
        self.client
            .get(self.screen.path, &self.screen.params(query), self.token.as_ref())
            .await
    }
}
