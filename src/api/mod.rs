//! Request builder for the repository API.
//!
//! [`RepoApi`] exposes one method per API module. Each method checks its
//! arguments, assembles a [`ParameterMap`] and hands it to the injected
//! [`RequestExecutor`]: read-only modules go through `get`, edits through
//! `post_with_token` with a CSRF token and the bot-edit marker set.
//!
//! Failed calls come back as [`Error::Remote`] carrying a
//! [`RepoApiError`] whose action is the API module name.
//!
//! ```rust,no_run
//! use wikibase_repo_api::api::RepoApi;
//! use wikibase_repo_api::transport::{HttpExecutor, HttpExecutorConfig};
//!
//! # async fn run() -> wikibase_repo_api::Result<()> {
//! let executor = HttpExecutor::new(HttpExecutorConfig::new("https://www.wikidata.org/w/api.php"))?;
//! let api = RepoApi::new(executor);
//! let entities = api.get_entities("Q42", Some("labels".into()), Some(["en", "de"].into()), None, None).await?;
//! println!("{}", entities["entities"]["Q42"]["labels"]["en"]["value"]);
//! # Ok(())
//! # }
//! ```

mod claims;
mod entities;
pub mod types;
mod validate;

pub use types::{HashOrIndex, Rank, SnakType, SortDirection};

use crate::classify::RepoApiError;
use crate::executor::{RequestExecutor, TokenKind};
use crate::messages::{DefaultMessages, MessageResolver};
use crate::params::ParameterMap;
use crate::{Error, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Client-side builder for repository API calls.
pub struct RepoApi<E> {
    executor: E,
    messages: Arc<dyn MessageResolver>,
}

impl<E: RequestExecutor> RepoApi<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            messages: Arc::new(DefaultMessages::new()),
        }
    }

    /// Use a custom resolver for the display message of remote errors.
    pub fn with_messages(mut self, messages: Arc<dyn MessageResolver>) -> Self {
        self.messages = messages;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn messages(&self) -> &dyn MessageResolver {
        self.messages.as_ref()
    }

    /// Send a read-only request.
    async fn get(&self, params: ParameterMap) -> Result<Value> {
        params.ensure_complete()?;
        let action = params.action().unwrap_or_default().to_string();
        debug!(action = %action, params = params.len(), "GET");
        self.executor
            .get(&params)
            .await
            .map_err(|raw| self.classify(&raw, &action))
    }

    /// Send an edit. The bot-edit marker is always set.
    async fn post(&self, mut params: ParameterMap) -> Result<Value> {
        params.insert("bot", 1i64);
        params.ensure_complete()?;
        let action = params.action().unwrap_or_default().to_string();
        debug!(action = %action, params = params.len(), "POST");
        self.executor
            .post_with_token(TokenKind::Csrf, &params)
            .await
            .map_err(|raw| self.classify(&raw, &action))
    }

    fn classify(&self, raw: &Value, action: &str) -> Error {
        let action = Some(action).filter(|a| !a.is_empty());
        let error = RepoApiError::from_api_response(raw, action, self.messages.as_ref());
        warn!(
            code = %error.code(),
            action = ?error.action(),
            "repository API call failed"
        );
        Error::Remote(error)
    }
}
