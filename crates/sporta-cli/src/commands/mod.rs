//! Subcommand implementations.

pub mod admin;
pub mod auth;
pub mod profile;
pub mod support;
pub mod venues;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use sporta_core::{
    ApiUrl, ControllerOptions, ListController, ListQuery, ListSnapshot, ListSource, Route, guard,
};
use sporta_http::SportaBackend;

use crate::session::storage;

/// What every command needs: the backend location.
pub struct Env {
    backend: SportaBackend,
}

impl Env {
    pub fn new(api: &str) -> Result<Self> {
        let api = ApiUrl::new(api).context("Invalid API URL")?;
        let backend = SportaBackend::new(api).context("Failed to create HTTP client")?;
        Ok(Self { backend })
    }

    pub fn api(&self) -> &ApiUrl {
        self.backend.api()
    }

    /// A backend client without credentials.
    pub fn anonymous(&self) -> &SportaBackend {
        &self.backend
    }

    /// A backend client for the saved session, anonymous if there is none.
    pub fn current(&self) -> Result<SportaBackend> {
        let context = storage::load_context().context("Failed to load session")?;
        Ok(self.backend.with_session(context.shared()))
    }

    /// A backend client for the saved session, if it may open `route`.
    pub fn guarded(&self, route: Route) -> Result<SportaBackend> {
        let backend = self.current()?;
        let shown = guard::resolve(&route.path(), backend.session());
        if shown != route {
            bail!("access denied, redirected to {shown}");
        }
        debug!(%route, role = %backend.session().role(), "route permitted");
        Ok(backend)
    }
}

/// Query and paging flags shared by the list screens.
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Page to show
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,

    /// Print rows as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Initial query with the given filters; `None` values are skipped.
    pub fn query(&self, filters: &[(&str, Option<&String>)]) -> ListQuery {
        let mut query = ListQuery::new(self.page_size).with_page(self.page);
        if let Some(search) = &self.search {
            query = query.with_search(search.clone());
        }
        for (key, value) in filters {
            if let Some(value) = value {
                query = query.with_filter(*key, value.as_str());
            }
        }
        query
    }
}

/// Load one page of a table screen.
///
/// The first fetch asks for the query's page directly. Pages past the end
/// come back clamped to the last page.
pub async fn load_page<S: ListSource>(
    source: S,
    args: &ListArgs,
    query: ListQuery,
) -> ListSnapshot<S::Item> {
    let controller =
        ListController::with_query(source, ControllerOptions::admin_table(args.page_size), query);
    controller.mount();
    controller.settled().await
}
