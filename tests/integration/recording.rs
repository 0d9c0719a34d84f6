//! Executor double that records every call

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;
use wikibase_repo_api::{ExecResult, ParameterMap, RepoApi, RequestExecutor, TokenKind};

/// One recorded executor call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(ParameterMap),
    Post(TokenKind, ParameterMap),
}

impl Call {
    pub fn params(&self) -> &ParameterMap {
        match self {
            Call::Get(p) | Call::Post(_, p) => p,
        }
    }

    pub fn is_post(&self) -> bool {
        matches!(self, Call::Post(..))
    }
}

/// Records calls and answers each one with a fixed outcome.
pub struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    outcome: ExecResult,
}

impl RecordingExecutor {
    pub fn succeeding() -> Self {
        Self::with_outcome(Ok(json!({"success": 1})))
    }

    pub fn failing(raw: Value) -> Self {
        Self::with_outcome(Err(raw))
    }

    pub fn with_outcome(outcome: ExecResult) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call(&self, index: usize) -> Call {
        self.calls()
            .get(index)
            .cloned()
            .unwrap_or_else(|| panic!("no call #{}", index))
    }

    /// Parameters of the call at `index`.
    pub fn params(&self, index: usize) -> ParameterMap {
        self.call(index).params().clone()
    }
}

#[async_trait]
impl RequestExecutor for RecordingExecutor {
    async fn get(&self, params: &ParameterMap) -> ExecResult {
        self.calls.lock().unwrap().push(Call::Get(params.clone()));
        self.outcome.clone()
    }

    async fn post_with_token(&self, token: TokenKind, params: &ParameterMap) -> ExecResult {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Post(token, params.clone()));
        self.outcome.clone()
    }
}

pub fn recording_api() -> RepoApi<RecordingExecutor> {
    RepoApi::new(RecordingExecutor::succeeding())
}

/// String value of `name`, panicking when absent or not a string.
pub fn param(params: &ParameterMap, name: &str) -> String {
    params
        .get_str(name)
        .unwrap_or_else(|| panic!("parameter {} missing or not a string: {:?}", name, params))
        .to_string()
}

pub fn int_param(params: &ParameterMap, name: &str) -> i64 {
    params
        .get(name)
        .and_then(|v| v.as_i64())
        .unwrap_or_else(|| panic!("parameter {} missing or not an integer: {:?}", name, params))
}
