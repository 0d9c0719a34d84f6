//! Normalization of failed API responses.
//!
//! The repository API reports failures in several shapes depending on the
//! server version and on where the call failed:
//!
//! | Shape | Example | Code taken from |
//! |-------|---------|-----------------|
//! | single error | `{"error": {"code": "x", "info": "..."}}` | `error.code` |
//! | single error, HTML messages | `{"error": {"code": "x", "messages": {...}}}` | `error.code` |
//! | error list | `{"errors": [{"code": "x", "*": "..."}]}` | `errors[0].code` |
//! | transport failure | `{"textStatus": "timeout", "exception": "..."}` | `textStatus` |
//!
//! Anything else becomes an error with an empty code rather than a panic.

use crate::messages::{message_key, DefaultMessages, MessageResolver};
use serde_json::Value;
use tracing::debug;

/// A failed API call, normalized.
///
/// `detailed_message` is HTML (escaped where it came from plain text);
/// `display_message` is the short text resolved from the message table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{display_message} (code: {code:?})")]
pub struct RepoApiError {
    code: String,
    detailed_message: String,
    parameters: Vec<String>,
    action: Option<String>,
    display_message: String,
}

impl RepoApiError {
    pub fn new(
        code: impl Into<String>,
        detailed_message: impl Into<String>,
        parameters: Vec<String>,
        action: Option<&str>,
        messages: &dyn MessageResolver,
    ) -> Self {
        let code = code.into();
        let action = action.map(str::to_string);
        let display_message =
            messages.resolve(message_key(&code, action.as_deref()), &parameters);
        Self {
            code,
            detailed_message: detailed_message.into(),
            parameters,
            action,
            display_message,
        }
    }

    /// Build from a raw failure payload using the built-in English messages.
    pub fn from_response(details: &Value, action: Option<&str>) -> Self {
        Self::from_api_response(details, action, &DefaultMessages::new())
    }

    /// Build from a raw failure payload.
    pub fn from_api_response(
        details: &Value,
        action: Option<&str>,
        messages: &dyn MessageResolver,
    ) -> Self {
        let (code, detailed, parameters) = extract(details);
        debug!(code = %code, action = ?action, "classified API failure");
        Self::new(code, detailed, parameters, action, messages)
    }

    /// Same error, display message re-resolved for another action
    /// (e.g. the UI-level `save` or `remove`).
    pub fn with_action(self, action: &str, messages: &dyn MessageResolver) -> Self {
        Self::new(
            self.code,
            self.detailed_message,
            self.parameters,
            Some(action),
            messages,
        )
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn detailed_message(&self) -> &str {
        &self.detailed_message
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn display_message(&self) -> &str {
        &self.display_message
    }

    /// Message key the display message was resolved from.
    pub fn message_key(&self) -> &'static str {
        message_key(&self.code, self.action.as_deref())
    }
}

/// (code, detailed message, message parameters)
fn extract(details: &Value) -> (String, String, Vec<String>) {
    if let Some(error) = details.get("error").filter(|e| e.is_object()) {
        let code = error.get("code").map(stringify).unwrap_or_default();
        if let Some(messages) = error.get("messages").filter(|m| truthy(m)) {
            let parameters = indexed(messages, 0)
                .and_then(|m| m.get("parameters"))
                .and_then(Value::as_array)
                .map(|params| params.iter().map(stringify).collect())
                .unwrap_or_default();
            let detailed = messages_to_html(messages).unwrap_or_default();
            return (code, detailed, parameters);
        }
        let detailed = error
            .get("info")
            .filter(|i| truthy(i))
            .map(|i| escape_html(&stringify(i)))
            .unwrap_or_default();
        return (code, detailed, Vec::new());
    }

    if let Some(first) = details
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        let code = first.get("code").map(stringify).unwrap_or_default();
        let detailed = first
            .get("*")
            .map(|t| escape_html(&stringify(t)))
            .unwrap_or_default();
        return (code, detailed, Vec::new());
    }

    if let Some(exception) = details.get("exception").filter(|e| truthy(e)) {
        let code = details.get("textStatus").map(stringify).unwrap_or_default();
        return (code, escape_html(&stringify(exception)), Vec::new());
    }

    (String::new(), String::new(), Vec::new())
}

/// Render a `messages` structure as HTML.
///
/// Accepts a single message object, an array, or an object keyed by index.
/// Several messages become an unordered list; a single one is returned as is.
fn messages_to_html(messages: &Value) -> Option<String> {
    if indexed(messages, 1).and_then(|m| m.get("html")).is_some() {
        let mut html = String::from("<ul>");
        let mut i = 0;
        while let Some(message) = indexed(messages, i).filter(|m| truthy(m)) {
            html.push_str("<li>");
            html.push_str(&html_text(message).unwrap_or_default());
            html.push_str("</li>");
            i += 1;
        }
        html.push_str("</ul>");
        return Some(html);
    }

    indexed(messages, 0)
        .and_then(html_text)
        .filter(|s| !s.is_empty())
        .or_else(|| html_text(messages))
}

fn indexed(messages: &Value, i: usize) -> Option<&Value> {
    match messages {
        Value::Array(items) => items.get(i),
        Value::Object(map) => map.get(&i.to_string()),
        _ => None,
    }
}

fn html_text(message: &Value) -> Option<String> {
    message.get("html")?.get("*").map(stringify)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}
