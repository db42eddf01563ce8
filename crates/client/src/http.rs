//! JSON-over-HTTP transport shared by the stores.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// Thin REST client for the backend.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Resolve path segments against the base URL.
    ///
    /// Each segment is percent-encoded, so identifiers containing `/`, `?`,
    /// `#` or spaces stay inside their own segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path to extend.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: reqwest::Method, path: &[&str]) -> reqwest::RequestBuilder {
        let request = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// GET a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure, non-success status or an
    /// undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> ApiResult<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure, non-success status or an
    /// undecodable body.
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// PUT a JSON body, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or non-success status.
    pub async fn put<B: Serialize + Sync>(&self, path: &[&str], body: &B) -> ApiResult<()> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// PATCH a JSON body, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or non-success status.
    pub async fn patch<B: Serialize + Sync>(&self, path: &[&str], body: &B) -> ApiResult<()> {
        let response = self
            .request(reqwest::Method::PATCH, path)
            .json(body)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    /// DELETE a resource, ignoring any response body.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure or non-success status.
    pub async fn delete(&self, path: &[&str]) -> ApiResult<()> {
        let response = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::expect_success(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Backend response");
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    async fn expect_success(response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Backend response");
            return Ok(());
        }

        let body = response.bytes().await?;
        Err(ApiError::from_status(status.as_u16(), &body))
    }
}
