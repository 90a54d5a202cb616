//! REST HTTP client.

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use sporta_core::error::{ApiError, TransportError};
use sporta_core::{AccessToken, ApiUrl, Envelope, Error, Result};

/// HTTP client for the booking backend.
///
/// Every response body is expected to be an [`Envelope`]. Non-2xx
/// responses become [`Error::Api`] carrying the envelope message when the
/// body has one.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl RestClient {
    /// Create a new client for the given backend.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sporta/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, api })
    }

    /// Returns the backend URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// GET a resource with query parameters.
    #[instrument(skip(self, params, token), fields(api = %self.api))]
    pub async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
        token: Option<&AccessToken>,
    ) -> Result<Envelope> {
        trace!(?params, "query parameters");
        self.send::<()>(Method::GET, path, params, None, token).await
    }

    /// POST a JSON body.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn post<B>(&self, path: &str, body: &B, token: Option<&AccessToken>) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, &[], Some(body), token).await
    }

    /// PATCH a JSON body.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn patch<B>(&self, path: &str, body: &B, token: Option<&AccessToken>) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, &[], Some(body), token).await
    }

    /// DELETE a resource.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn delete(&self, path: &str, token: Option<&AccessToken>) -> Result<Envelope> {
        self.send::<()>(Method::DELETE, path, &[], None, token).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&B>,
        token: Option<&AccessToken>,
    ) -> Result<Envelope>
    where
        B: Serialize + ?Sized,
    {
        let url = self.api.endpoint(path);
        debug!(%method, %url, authed = token.is_some(), "REST request");

        let mut request = self.client.request(method, &url);
        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Parse the envelope of a response, or turn a failure into an error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Envelope> {
        let status = response.status();
        trace!(status = %status, "REST response");

        let bytes = response.bytes().await.map_err(transport_error)?;

        if status.is_success() {
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Envelope::ok(serde_json::Value::Null));
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let message = serde_json::from_slice::<Envelope>(&bytes)
            .ok()
            .and_then(|envelope| envelope.message().map(str::to_string));
        Err(ApiError::new(Some(status.as_u16()), message).into())
    }
}

/// Map a reqwest failure onto the transport error variants.
pub fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        TransportError::Timeout.into()
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
        .into()
    } else if err.is_decode() {
        Error::decode(err)
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
        .into()
    }
}
