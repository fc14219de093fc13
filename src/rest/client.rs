//! Lunch Money REST API client implementation.

use std::borrow::Cow;
use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::{ApiKey, CredentialsProvider, EnvCredentials, StaticCredentials};
use crate::context::RequestContext;
use crate::error::LunchMoneyError;
use crate::rest::endpoints::LUNCHMONEY_BASE_URL;
use crate::rest::envelope;
use crate::types::QueryMap;

/// The Lunch Money REST API client.
///
/// This client authenticates every request with a bearer token, decodes
/// responses and turns the API's various error shapes into
/// [`LunchMoneyError`] values. It performs exactly one HTTP round trip per
/// call and never retries.
///
/// Cancellation and deadlines attach to a cheap client copy rather than to
/// each method, so a per-call context reads
/// `client.with_context(ctx).get_user().await?`.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use lunchmoney_api_client::RequestContext;
/// use lunchmoney_api_client::rest::LunchMoneyClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = LunchMoneyClient::new("access_token");
///
///     let categories = client.get_categories().await?;
///     for category in &categories {
///         println!("{}: {}", category.id, category.name);
///     }
///
///     let ctx = RequestContext::background().with_timeout(Duration::from_secs(5));
///     let user = client.with_context(ctx).get_user().await?;
///     println!("{}", user.user_name);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct LunchMoneyClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    context: RequestContext,
}

impl LunchMoneyClient {
    /// Create a new client authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client whose key comes from `LUNCHMONEY_TOKEN`.
    ///
    /// A missing variable is not an error here; requests made with the
    /// resulting client fail with [`LunchMoneyError::MissingCredentials`].
    pub fn from_env() -> Self {
        let builder = Self::builder();
        match EnvCredentials::try_from_env() {
            Some(credentials) => builder.credentials(Arc::new(credentials)).build(),
            None => builder.build(),
        }
    }

    /// Create a new client builder.
    pub fn builder() -> LunchMoneyClientBuilder {
        LunchMoneyClientBuilder::new()
    }

    /// A copy of this client whose calls run under `context`.
    ///
    /// The copy shares the underlying connection pool.
    pub fn with_context(&self, context: RequestContext) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    /// The context calls made through this client run under.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated GET request.
    ///
    /// `query` holds only the filter fields that were set. The full body is
    /// buffered before returning.
    pub async fn get(&self, path: &str, query: &QueryMap) -> Result<ResponseBody, LunchMoneyError> {
        let url = self.endpoint_url(path, query)?;
        let request = self.authorize(self.http_client.get(url))?;

        tracing::debug!(method = "GET", path, params = query.len(), "sending request");
        let response = self.execute(request).await?;

        if !response.status.is_success() {
            let err = envelope::status_error(response.status, &response.bytes);
            tracing::warn!(method = "GET", path, error = %err, "request failed");
            return Err(err);
        }

        Ok(response)
    }

    /// Make an authenticated POST request with a JSON body.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<ResponseBody, LunchMoneyError>
    where
        B: Serialize + ?Sized,
    {
        self.write(Method::POST, path, body).await
    }

    /// Make an authenticated PUT request with a JSON body.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<ResponseBody, LunchMoneyError>
    where
        B: Serialize + ?Sized,
    {
        self.write(Method::PUT, path, body).await
    }

    async fn write<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ResponseBody, LunchMoneyError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path, &QueryMap::new())?;
        let payload = serde_json::to_vec(body)
            .map_err(|e| LunchMoneyError::InvalidRequest(format!("could not encode body: {e}")))?;
        let request = self
            .authorize(self.http_client.request(method.clone(), url))?
            .header(CONTENT_TYPE, "application/json")
            .body(payload);

        tracing::debug!(%method, path, "sending request");
        let response = self.execute(request).await?;

        if !response.status.is_success() {
            let err = envelope::status_error(response.status, &response.bytes);
            tracing::warn!(%method, path, error = %err, "request failed");
            return Err(err);
        }

        // A 200 can still carry an error body.
        if let Some(err) = envelope::hidden_error(response.status, &response.bytes) {
            tracing::warn!(%method, path, error = %err, "error reported in success response");
            return Err(err);
        }

        Ok(response)
    }

    /// GET a resource, reject an embedded `error` field and decode it.
    pub(crate) async fn get_resource<T>(
        &self,
        path: &str,
        query: &QueryMap,
        context: &str,
    ) -> Result<T, LunchMoneyError>
    where
        T: DeserializeOwned,
    {
        let body = self.get(path, query).await?;
        if let Some(err) = envelope::embedded_error(body.status, &body.bytes) {
            return Err(err);
        }
        body.json(context)
    }

    /// POST a JSON body and decode the response.
    pub(crate) async fn post_resource<T, B>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, LunchMoneyError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(path, body).await?.json(context)
    }

    /// PUT a JSON body and decode the response.
    pub(crate) async fn put_resource<T, B>(
        &self,
        path: &str,
        body: &B,
        context: &str,
    ) -> Result<T, LunchMoneyError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put(path, body).await?.json(context)
    }

    /// Send the request and buffer the body, racing the client's context.
    async fn execute(&self, request: RequestBuilder) -> Result<ResponseBody, LunchMoneyError> {
        self.context
            .run(async move {
                let response = request.send().await?;
                let status = response.status();
                let bytes = response.bytes().await?;
                tracing::debug!(%status, len = bytes.len(), "received response");
                Ok::<_, LunchMoneyError>(ResponseBody {
                    status,
                    bytes: bytes.to_vec(),
                })
            })
            .await
    }

    fn endpoint_url(&self, path: &str, query: &QueryMap) -> Result<Url, LunchMoneyError> {
        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }

        url.set_path(path);
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(query.iter());
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, LunchMoneyError> {
        Ok(request.bearer_auth(self.api_key()?.expose_secret()))
    }

    fn api_key(&self) -> Result<&ApiKey, LunchMoneyError> {
        self.credentials
            .as_ref()
            .map(|provider| provider.api_key())
            .filter(|key| !key.is_empty())
            .ok_or(LunchMoneyError::MissingCredentials)
    }
}

impl std::fmt::Debug for LunchMoneyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LunchMoneyClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("context", &self.context)
            .finish()
    }
}

/// A fully buffered success response.
#[derive(Debug, Clone)]
pub struct ResponseBody {
    status: StatusCode,
    bytes: Vec<u8>,
}

impl ResponseBody {
    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw body bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the raw body bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Decode the body as JSON. `context` names what was being decoded.
    pub fn json<T>(&self, context: &str) -> Result<T, LunchMoneyError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.bytes)
            .map_err(|e| LunchMoneyError::decode(context, e, &self.bytes))
    }
}

/// Builder for [`LunchMoneyClient`].
pub struct LunchMoneyClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    user_agent: Option<String>,
    context: RequestContext,
}

impl LunchMoneyClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: LUNCHMONEY_BASE_URL.to_string(),
            credentials: None,
            user_agent: None,
            context: RequestContext::background(),
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    ///
    /// The URL is parsed when a request is made; a malformed value surfaces as
    /// [`LunchMoneyError::Url`] from that request.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Authenticate with a fixed access token.
    pub fn api_key(self, api_key: impl Into<String>) -> Self {
        self.credentials(Arc::new(StaticCredentials::new(api_key)))
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the context calls run under (default: never cancelled).
    pub fn context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Build the client.
    pub fn build(self) -> LunchMoneyClient {
        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("lunchmoney-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("lunchmoney-api-client"));
        headers.insert(USER_AGENT, header_value);

        // Build the HTTP client with tracing middleware.
        let reqwest_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        LunchMoneyClient {
            http_client: client,
            base_url: self.base_url,
            credentials: self.credentials,
            context: self.context,
        }
    }
}

impl Default for LunchMoneyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
