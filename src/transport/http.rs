use super::TransportError;
use crate::executor::{ExecResult, RequestExecutor, TokenKind};
use crate::params::ParameterMap;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use reqwest::{Proxy, Response};
use serde_json::{json, Value};
use std::env;
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!("wikibase-repo-api/", env!("CARGO_PKG_VERSION"));

/// Settings for [`HttpExecutor`].
#[derive(Debug, Clone)]
pub struct HttpExecutorConfig {
    /// Full URL of the remote `api.php`.
    pub endpoint: String,
    /// Server the calling application is served from (e.g. `https://example.org`
    /// or protocol-relative `//example.org`). When its host differs from the
    /// endpoint's, requests carry `origin` for cross-domain access.
    pub local_server: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy_url: Option<String>,
}

impl HttpExecutorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            local_server: None,
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy_url: None,
        }
    }

    pub fn with_local_server(mut self, server: impl Into<String>) -> Self {
        self.local_server = Some(server.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// Read the configuration from the environment:
    /// - `WBAPI_ENDPOINT` (required)
    /// - `WBAPI_LOCAL_SERVER`
    /// - `WBAPI_HTTP_TIMEOUT_SECS` (default 30)
    /// - `WBAPI_USER_AGENT`
    /// - `WBAPI_PROXY_URL`
    pub fn from_env() -> Result<Self> {
        let endpoint = env::var("WBAPI_ENDPOINT").map_err(|_| {
            Error::configuration_with_context(
                "API endpoint is not configured",
                ErrorContext::new()
                    .with_field_path("WBAPI_ENDPOINT")
                    .with_source("http_executor"),
            )
        })?;
        let mut config = Self::new(endpoint);
        config.local_server = env::var("WBAPI_LOCAL_SERVER").ok();
        if let Some(secs) = env::var("WBAPI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs.max(1));
        }
        if let Ok(agent) = env::var("WBAPI_USER_AGENT") {
            config.user_agent = agent;
        }
        config.proxy_url = env::var("WBAPI_PROXY_URL").ok();
        Ok(config)
    }
}

/// [`RequestExecutor`] speaking to a remote `api.php` over HTTP.
///
/// Reads are sent as GET with a query string, writes as form-encoded POST
/// after fetching a token from `action=query&meta=tokens`.
pub struct HttpExecutor {
    client: reqwest::Client,
    endpoint: Url,
    origin: Option<String>,
}

impl HttpExecutor {
    pub fn new(config: HttpExecutorConfig) -> Result<Self> {
        let endpoint = parse_url(&config.endpoint)?;
        let origin = match config.local_server.as_deref() {
            Some(server) => cross_domain_origin(&endpoint, server)?,
            None => None,
        };

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            // tokens are bound to the session cookie
            .cookie_store(true);

        if let Some(proxy_url) = config.proxy_url.as_deref() {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy_url")
                        .with_source("http_executor"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            client,
            endpoint,
            origin,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(HttpExecutorConfig::from_env()?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `origin` value sent with every request, when the endpoint is on another host.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    fn base_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("format".to_string(), "json".to_string())];
        if let Some(origin) = &self.origin {
            query.push(("origin".to_string(), origin.clone()));
        }
        query
    }

    async fn fetch_token(&self, kind: TokenKind) -> ExecResult {
        debug!(kind = kind.as_str(), "fetching token");
        let mut query = self.base_query();
        query.push(("action".to_string(), "query".to_string()));
        query.push(("meta".to_string(), "tokens".to_string()));
        query.push(("type".to_string(), kind.as_str().to_string()));

        let response = self.client.get(self.endpoint.clone()).query(&query).send().await;
        let body = read_response(response).await?;
        body.pointer(&format!("/query/tokens/{}", kind.response_field()))
            .cloned()
            .filter(Value::is_string)
            .ok_or_else(|| {
                json!({
                    "textStatus": "notoken",
                    "exception": format!("no {} token in response", kind.as_str()),
                })
            })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn get(&self, params: &ParameterMap) -> ExecResult {
        let mut query = self.base_query();
        query.extend(params.to_wire_pairs());
        let response = self.client.get(self.endpoint.clone()).query(&query).send().await;
        read_response(response).await
    }

    async fn post_with_token(&self, token: TokenKind, params: &ParameterMap) -> ExecResult {
        let token = self.fetch_token(token).await?;
        let mut form = params.to_wire_pairs();
        form.push((
            "token".to_string(),
            token.as_str().unwrap_or_default().to_string(),
        ));

        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&self.base_query())
            .form(&form)
            .send()
            .await;
        read_response(response).await
    }
}

/// Raw failure payload in the transport-failure shape.
fn transport_failure(text_status: &str, exception: impl ToString) -> Value {
    json!({
        "textStatus": text_status,
        "exception": exception.to_string(),
    })
}

async fn read_response(response: reqwest::Result<Response>) -> ExecResult {
    let response = response.map_err(|e| {
        let status = if e.is_timeout() { "timeout" } else { "error" };
        transport_failure(status, e)
    })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| transport_failure("error", e))?;

    let body: Value = match serde_json::from_str(&text) {
        Ok(body) => body,
        Err(_) if !status.is_success() => {
            return Err(transport_failure("http", format!("HTTP {}", status)))
        }
        Err(e) => return Err(transport_failure("parsererror", e)),
    };

    if body.get("error").is_some() || body.get("errors").is_some() {
        return Err(body);
    }
    if !status.is_success() {
        return Err(transport_failure("http", format!("HTTP {}", status)));
    }
    Ok(body)
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| {
        Error::Transport(TransportError::InvalidEndpoint {
            url: raw.to_string(),
            reason: e.to_string(),
        })
    })
}

/// `origin` parameter for a local server on another host than the endpoint.
fn cross_domain_origin(endpoint: &Url, local_server: &str) -> Result<Option<String>> {
    let server = if local_server.starts_with("//") {
        // origin must not be protocol relative
        format!("{}:{}", endpoint.scheme(), local_server)
    } else {
        local_server.to_string()
    };
    let local = parse_url(&server)?;
    if local.host_str() == endpoint.host_str() && local.port() == endpoint.port() {
        return Ok(None);
    }
    Ok(Some(server.trim_end_matches('/').to_string()))
}
