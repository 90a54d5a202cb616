//! List endpoint trait.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::list::{Envelope, ListQuery};

use super::Identified;

/// A paginated collection endpoint.
///
/// Implementations only fetch; normalizing the envelope, decoding rows and
/// applying the result are the controller's job.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    /// Row type of this collection.
    type Item: Identified + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Fetch one page.
    ///
    /// Errors cover transport failures and non-2xx responses; a 2xx
    /// `status: false` envelope is returned as `Ok` and surfaced by the
    /// normalizer.
    async fn fetch(&self, query: &ListQuery) -> Result<Envelope>;
}
