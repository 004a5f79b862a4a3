use std::sync::Arc;
use std::time::Duration;

use reqwest::RequestBuilder;

use super::endpoint::Endpoint;
use crate::errors::{BuildError, RequestError, Result, TokenError};
use crate::token::{TokenProvider, TokenStore};

const DEFAULT_USER_AGENT: &str = concat!("hinet", "@", env!("CARGO_PKG_VERSION"),);

/// One fixed timeout for connect and for the whole request. There are no
/// per-call overrides.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
#[must_use]
/// Configures a [`RestClient`] before construction.
///
/// Customize timeouts, user-agent, and the token persistence store. Most code
/// obtains this via [`RestClient::builder()`], which simply returns
/// `RestClientBuilder::default()`.
///
/// # Defaults
/// - Request timeout: 30 s; connect timeout: 30 s
/// - User-agent: `hinet@<crate-version>` plus any [`Self::user_agent_extra`]
/// - Token store: process memory only (see [`crate::MemoryTokenStore`])
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use hinet::RestClient;
/// let client = RestClient::builder()
///     .request_timeout(Duration::from_secs(10))
///     .user_agent_extra("myapp/1.2.3")
///     .build()?;
/// # Ok::<_, hinet::BuildError>(())
/// ```
#[derive(Default)]
pub struct RestClientBuilder {
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,

    /// Optional user-agent segment appended to the default UA for app-level telemetry.
    user_agent_extra: Option<String>,

    token_store: Option<Arc<dyn TokenStore>>,
}

impl RestClientBuilder {
    /// Set the total per-request timeout (connect + read + write).
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.request_timeout = Some(timeout);

        self
    }

    /// Set the connection-establishment timeout.
    pub fn connect_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.connect_timeout = Some(timeout);

        self
    }

    /// Append an extra user-agent segment after the default `hinet@<version>`.
    /// Example: `.user_agent_extra("myapp/1.2.3")`
    pub fn user_agent_extra<S: Into<String>>(&mut self, extra: S) -> &mut Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Mirror the bearer token into `store` instead of keeping it in process
    /// memory only. A token already persisted in the store is rehydrated when
    /// the client is built.
    pub fn token_store(&mut self, store: Arc<dyn TokenStore>) -> &mut Self {
        self.token_store = Some(store);
        self
    }

    /// Build a [`RestClient`].
    pub fn build(&self) -> std::result::Result<RestClient, BuildError> {
        // Compose user agent with optional extra part.
        let user_agent = match &self.user_agent_extra {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(self.request_timeout.unwrap_or(DEFAULT_TIMEOUT))
            .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()?;

        let token = match &self.token_store {
            Some(store) => TokenProvider::new(Arc::clone(store))
                .map_err(|TokenError::Store(e)| BuildError::TokenStore(e))?,
            None => TokenProvider::in_memory(),
        };

        Ok(RestClient { http, token })
    }
}

/// Asynchronous REST executor: builds HTTP calls from [`Endpoint`]s, attaches
/// the bearer token, and maps raw results into envelopes or errors.
///
/// `RestClient` owns one `reqwest::Client` (connection reuse, TLS) and one
/// [`TokenProvider`]. It is cheap to clone; clones share both.
///
/// ### What it does
/// - Joins `base_url` and the endpoint path by **plain concatenation** — no
///   escaping, normalization, or trailing-slash handling. The caller is
///   responsible for a syntactically valid result.
/// - Applies endpoint headers, then the bearer token (if one is set).
/// - Delivers exactly one `Ok`/`Err` per call; see
///   [`request`](Self::request) and [`request_raw`](Self::request_raw).
///
/// ### What it *doesn't* do
/// - No retries, no per-call timeout overrides, no redirect-policy changes,
///   no cancellation hooks. Two concurrent calls may complete in either
///   order.
///
/// ### Construction
/// Use [`RestClient::builder()`] to tweak timeouts, user-agent, or the token
/// store; or pick the defaults via [`RestClient::new()`]. Most apps can share
/// one client process-wide via [`crate::global_client`].
#[derive(Clone, Debug)]
pub struct RestClient {
    pub(crate) http: reqwest::Client,
    pub(crate) token: TokenProvider,
}

impl RestClient {
    /// Creates a client with default timeouts and an in-memory token store.
    pub fn new() -> std::result::Result<RestClient, BuildError> {
        Self::builder().build()
    }

    /// Returns a builder to edit settings before creating [`RestClient`].
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::default()
    }

    // === Token lifecycle ===

    /// Set the bearer token: persisted to the store, attached as
    /// `Authorization: Bearer <token>` to every request built afterwards.
    pub fn set_token(&self, token: &str) -> std::result::Result<(), TokenError> {
        self.token.set(token)
    }

    /// Clear the bearer token from memory and the store; subsequent requests
    /// omit the `Authorization` header.
    pub fn clear_token(&self) -> std::result::Result<(), TokenError> {
        self.token.clear()
    }

    /// The token provider backing this client.
    pub fn token_provider(&self) -> &TokenProvider {
        &self.token
    }

    /// Build an outgoing call for `endpoint` against `base_url`.
    ///
    /// Target URL is `format!("{base_url}{path}")`; query items are appended
    /// percent-encoded; endpoint headers are applied before the bearer token,
    /// so the token wins when both carry `Authorization`.
    pub(crate) fn request_builder(
        &self,
        endpoint: &Endpoint,
        base_url: &str,
    ) -> Result<RequestBuilder> {
        if endpoint.path().is_empty() {
            return Err(RequestError::Validation {
                message: "endpoint path must not be empty".into(),
            }
            .into());
        }

        let url = format!("{base_url}{}", endpoint.path());
        let mut rb = self.http.request(endpoint.method().into(), url);

        if let Some(query) = endpoint.query() {
            rb = rb.query(query);
        }
        if let Some(headers) = endpoint.headers() {
            for (name, value) in headers {
                rb = rb.header(name.as_str(), value.as_str());
            }
        }
        if let Some(token) = self.token.current() {
            rb = rb.bearer_auth(token);
        }

        Ok(rb)
    }
}

#[cfg(test)]
mod test {
    use reqwest::header::AUTHORIZATION;

    use super::*;
    use crate::rest::endpoint::HttpMethod;

    fn built(client: &RestClient, endpoint: &Endpoint, base: &str) -> reqwest::Request {
        client
            .request_builder(endpoint, base)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn bearer_header_present_iff_token_set() {
        let client = RestClient::new().unwrap();
        let endpoint = Endpoint::new("/users", HttpMethod::Get);

        let request = built(&client, &endpoint, "http://example.com");
        assert!(request.headers().get(AUTHORIZATION).is_none());

        client.set_token("tok-x").unwrap();
        let request = built(&client, &endpoint, "http://example.com");
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer tok-x"
        );

        client.clear_token().unwrap();
        let request = built(&client, &endpoint, "http://example.com");
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn url_is_plain_concatenation_plus_query() {
        let client = RestClient::new().unwrap();
        let endpoint = Endpoint::new("/v1/users", HttpMethod::Get).query_item("page", "2");

        let request = built(&client, &endpoint, "http://example.com/api");
        assert_eq!(request.url().path(), "/api/v1/users");
        assert_eq!(request.url().query(), Some("page=2"));
    }

    #[test]
    fn endpoint_headers_are_applied() {
        let client = RestClient::new().unwrap();
        let endpoint = Endpoint::new("/users", HttpMethod::Delete).header("X-Trace", "abc");

        let request = built(&client, &endpoint, "http://example.com");
        assert_eq!(request.method(), &reqwest::Method::DELETE);
        assert_eq!(request.headers().get("X-Trace").unwrap(), "abc");
    }

    #[test]
    fn empty_path_is_rejected_before_dispatch() {
        let client = RestClient::new().unwrap();
        let endpoint = Endpoint::new("", HttpMethod::Get);

        let err = client
            .request_builder(&endpoint, "http://example.com")
            .unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Request(RequestError::Validation { .. })
        ));
    }

    #[test]
    fn clients_share_token_provider_on_clone() {
        let client = RestClient::new().unwrap();
        let clone = client.clone();
        client.set_token("shared").unwrap();
        assert_eq!(clone.token_provider().current().as_deref(), Some("shared"));
    }
}
