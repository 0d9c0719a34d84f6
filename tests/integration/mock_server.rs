//! Mock api.php setup for HTTP executor tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use wikibase_repo_api::transport::{HttpExecutor, HttpExecutorConfig};
use wikibase_repo_api::RepoApi;

pub const API_PATH: &str = "/w/api.php";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, API_PATH)
    }

    pub fn config(&self) -> HttpExecutorConfig {
        HttpExecutorConfig::new(self.endpoint())
    }

    pub fn create_api(&self) -> RepoApi<HttpExecutor> {
        self.create_api_with(self.config())
    }

    pub fn create_api_with(&self, config: HttpExecutorConfig) -> RepoApi<HttpExecutor> {
        RepoApi::new(HttpExecutor::new(config).expect("executor"))
    }

    /// GET answered with a JSON body when all `query` pairs are present.
    pub async fn mock_get(&self, query: &[(&str, &str)], status: usize, body: &Value) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", API_PATH)
            .match_query(all_encoded(query))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    /// GET answered with an arbitrary body.
    pub async fn mock_get_raw(&self, status: usize, content_type: &str, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", API_PATH)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await
    }

    /// Token endpoint handing out `token` for the given kind.
    pub async fn mock_token(&self, kind: &str, token: &str) -> Mock {
        let body = serde_json::json!({
            "batchcomplete": "",
            "query": {"tokens": {format!("{}token", kind): token}}
        });
        self.mock_get(
            &[("action", "query"), ("meta", "tokens"), ("type", kind)],
            200,
            &body,
        )
        .await
    }

    /// Form POST answered with a JSON body when all `form` pairs are present.
    pub async fn mock_post(&self, form: &[(&str, &str)], status: usize, body: &Value) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", API_PATH)
            .match_query(Matcher::UrlEncoded("format".into(), "json".into()))
            .match_body(all_encoded(form))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }
}

fn all_encoded(pairs: &[(&str, &str)]) -> Matcher {
    Matcher::AllOf(
        pairs
            .iter()
            .map(|(k, v)| Matcher::UrlEncoded(k.to_string(), v.to_string()))
            .collect(),
    )
}
