//! The request executor seam.
//!
//! [`crate::api::RepoApi`] never talks to the network itself; it hands a
//! finished [`ParameterMap`] to a [`RequestExecutor`]. The HTTP implementation
//! lives in [`crate::transport`]; tests plug in a recording executor.

use crate::params::ParameterMap;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of one executor call: the raw success payload, or the raw failure
/// payload that is handed to the error classifier.
pub type ExecResult = std::result::Result<Value, Value>;

/// Token kind requested for authenticated writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Edit (CSRF) token. All mutating repository calls use this.
    Csrf,
}

impl TokenKind {
    /// Name used by the token endpoint (`meta=tokens&type=...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Csrf => "csrf",
        }
    }

    /// Name of the response field carrying the token.
    pub fn response_field(&self) -> &'static str {
        match self {
            TokenKind::Csrf => "csrftoken",
        }
    }
}

/// Performs API calls on behalf of the request builder.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Read-only call.
    async fn get(&self, params: &ParameterMap) -> ExecResult;

    /// Authenticated write; the executor obtains and attaches the token.
    async fn post_with_token(&self, token: TokenKind, params: &ParameterMap) -> ExecResult;
}

#[async_trait]
impl<T: RequestExecutor + ?Sized> RequestExecutor for Arc<T> {
    async fn get(&self, params: &ParameterMap) -> ExecResult {
        (**self).get(params).await
    }

    async fn post_with_token(&self, token: TokenKind, params: &ParameterMap) -> ExecResult {
        (**self).post_with_token(token, params).await
    }
}
