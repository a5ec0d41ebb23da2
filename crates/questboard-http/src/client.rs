//! Typed HTTP client for the Quest Board REST API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};
use url::Url;

use questboard_core::envelope;
use questboard_core::page::ListFormat;
use questboard_core::schema::PageQuery;
use questboard_core::{BaseUrl, Error, NetworkError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin plus mount prefix, e.g. `https://guild.example.com/quest-board`.
    pub base_url: BaseUrl,
    /// Per-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Wire format of the `/users` list endpoint.
    pub user_list_format: ListFormat,
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("questboard/", env!("CARGO_PKG_VERSION")).to_string(),
            user_list_format: ListFormat::Current,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_user_list_format(mut self, format: ListFormat) -> Self {
        self.user_list_format = format;
        self
    }
}

/// Query string parameters. Absent values are left out of the URL entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a parameter if `value` is set.
    pub fn opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Add `from` and `count`.
    pub fn page(self, page: PageQuery) -> Self {
        self.param("from", page.from).param("count", page.count)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// HTTP client for the Quest Board API.
///
/// Requests carry the session cookies held in the client's jar, the same way a
/// browser sends credentials with every call. Cloning is cheap and clones
/// share the connection pool and the jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: BaseUrl,
    jar: Arc<Jar>,
    user_list_format: ListFormat,
}

impl ApiClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .cookie_provider(jar.clone())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base: config.base_url,
            jar,
            user_list_format: config.user_list_format,
        })
    }

    /// Returns the base URL this client is configured for.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    pub(crate) fn user_list_format(&self) -> ListFormat {
        self.user_list_format
    }

    /// Returns the cookies that would be sent to the API, as a `Cookie`
    /// header value.
    pub fn export_cookies(&self) -> Option<String> {
        let url = Url::parse(&self.base.api_url("/")).ok()?;
        let header = self.jar.cookies(&url)?;
        header.to_str().ok().map(str::to_string)
    }

    /// Load cookies previously returned by [`ApiClient::export_cookies`].
    pub fn restore_cookies(&self, header: &str) {
        let origin = self.base.origin();
        let mut restored = 0;
        for pair in header.split(';').map(str::trim).filter(|p| p.contains('=')) {
            self.jar.add_cookie_str(&format!("{pair}; Path=/"), &origin);
            restored += 1;
        }
        debug!(restored, "restored session cookies");
    }

    /// Returns true if the jar holds any cookie for the API.
    pub fn has_cookies(&self) -> bool {
        self.export_cookies().is_some()
    }

    /// GET an envelope-wrapped resource.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<R>(&self, path: &str, query: &Query) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "GET");
        trace!(?query, "query parameters");
        let request = self.request(Method::GET, path).query(query.pairs());
        self.send(request).await
    }

    /// POST a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "POST");
        self.send(self.request(Method::POST, path).json(body)).await
    }

    /// PATCH with a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "PATCH");
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    /// PUT a JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.put_with_query(path, &Query::new(), body).await
    }

    /// PUT a JSON body with query parameters.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn put_with_query<B, R>(&self, path: &str, query: &Query, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "PUT");
        trace!(?query, "query parameters");
        let request = self.request(Method::PUT, path).query(query.pairs()).json(body);
        self.send(request).await
    }

    /// DELETE a resource.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "DELETE");
        self.send(self.request(Method::DELETE, path)).await
    }

    /// DELETE with a JSON body, used by bulk endpoints.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn delete_with_body<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(path, "DELETE");
        self.send(self.request(Method::DELETE, path).json(body)).await
    }

    /// GET a plain JSON body that is not envelope-wrapped.
    #[instrument(skip(self), fields(base = %self.base))]
    pub(crate) async fn get_plain<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        debug!(path, "GET (plain)");
        let response = self.request(Method::GET, path).send().await.map_err(transport)?;
        let status = response.status();
        trace!(%status, "response");
        let bytes = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::malformed(format!("HTTP {status}: {e}")))
    }

    /// Send a request whose body is ignored, returning its status.
    ///
    /// Server errors become [`NetworkError::Http`]; redirects count as success.
    pub(crate) async fn send_unwrapped(&self, request: RequestBuilder) -> Result<StatusCode> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        trace!(%status, "response");
        if status.is_client_error() || status.is_server_error() {
            return Err(NetworkError::Http {
                message: format!("unexpected status {status}"),
            }
            .into());
        }
        Ok(status)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.base.api_url(path))
    }

    /// Send a request and decode its envelope.
    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        trace!(%status, "response");

        let bytes = response.bytes().await.map_err(transport)?;
        match envelope::decode(&bytes) {
            Err(Error::MalformedResponse(err)) if !status.is_success() => {
                warn!(%status, reason = %err.reason, "error status without an envelope");
                Err(Error::malformed(format!("HTTP {status}: {}", err.reason)))
            }
            other => other,
        }
    }
}

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        NetworkError::Timeout
    } else if err.is_connect() {
        NetworkError::Connection {
            message: err.to_string(),
        }
    } else {
        NetworkError::Http {
            message: err.to_string(),
        }
    };
    Error::Network(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let base = BaseUrl::new("https://guild.example.com").unwrap();
        let client = ApiClient::new(ClientConfig::new(base.clone())).unwrap();
        assert_eq!(client.base_url(), &base);
        assert!(!client.has_cookies());
    }

    #[test]
    fn query_omits_absent_values() {
        let query = Query::new().param("from", 0).opt("leaderIdFilter", None::<String>).param("count", 20);
        assert_eq!(
            query.pairs(),
            &[("from".to_string(), "0".to_string()), ("count".to_string(), "20".to_string())]
        );
    }

    #[test]
    fn cookies_round_trip() {
        let base = BaseUrl::new("https://guild.example.com/quest-board").unwrap();
        let client = ApiClient::new(ClientConfig::new(base)).unwrap();
        client.restore_cookies("session-token=abc; csrf=xyz");
        let exported = client.export_cookies().unwrap();
        assert!(exported.contains("session-token=abc"));
        assert!(exported.contains("csrf=xyz"));
    }
}
