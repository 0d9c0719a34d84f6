//! Display messages for remote API errors.
//!
//! A server error code is mapped to a message key, optionally refined by the
//! action that was being performed (`save`, `remove`, or an API module name).
//!
//! | Code | Action | Message key |
//! |------|--------|-------------|
//! | `timeout` | `save` | `wikibase-error-save-timeout` |
//! | `timeout` | `remove` | `wikibase-error-remove-timeout` |
//! | `no-external-page` | any | `wikibase-error-ui-no-external-page` |
//! | `edit-conflict` | any | `wikibase-error-ui-edit-conflict` |
//! | other | `save` | `wikibase-error-save-generic` |
//! | other | `remove` | `wikibase-error-remove-generic` |
//! | other | other | `wikibase-error-unexpected` |
//!
//! ## Example
//!
//! ```rust
//! use wikibase_repo_api::messages::message_key;
//!
//! assert_eq!(message_key("timeout", Some("remove")), "wikibase-error-remove-timeout");
//! assert_eq!(message_key("whatever", Some("save")), "wikibase-error-save-generic");
//! assert_eq!(message_key("whatever", None), "wikibase-error-unexpected");
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Global fallback key.
pub const DEFAULT_MESSAGE_KEY: &str = "wikibase-error-unexpected";

/// Generic per-action keys, used when a code has nothing specific for the action.
const GENERIC_BY_ACTION: &[(&str, &str)] = &[
    ("save", "wikibase-error-save-generic"),
    ("remove", "wikibase-error-remove-generic"),
];

/// Table entry for one error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageEntry {
    /// Same key regardless of action.
    Direct(&'static str),
    /// Key depends on the action; actions not listed fall through to the generic bucket.
    ByAction(&'static [(&'static str, &'static str)]),
}

impl MessageEntry {
    /// Returns the table entry for a server error code, if there is one.
    pub fn for_code(code: &str) -> Option<Self> {
        let entry = match code {
            "timeout" => Self::ByAction(&[
                ("save", "wikibase-error-save-timeout"),
                ("remove", "wikibase-error-remove-timeout"),
            ]),
            "no-external-page" => Self::Direct("wikibase-error-ui-no-external-page"),
            "edit-conflict" => Self::Direct("wikibase-error-ui-edit-conflict"),
            _ => return None,
        };
        Some(entry)
    }
}

fn lookup(pairs: &[(&'static str, &'static str)], action: &str) -> Option<&'static str> {
    pairs.iter().find(|(a, _)| *a == action).map(|(_, key)| *key)
}

/// Resolve the message key for an error code and optional action.
pub fn message_key(code: &str, action: Option<&str>) -> &'static str {
    let entry = MessageEntry::for_code(code);
    if let Some(MessageEntry::Direct(key)) = entry {
        return key;
    }
    if let (Some(MessageEntry::ByAction(pairs)), Some(action)) = (entry, action) {
        if let Some(key) = lookup(pairs, action) {
            return key;
        }
    }
    action
        .and_then(|a| lookup(GENERIC_BY_ACTION, a))
        .unwrap_or(DEFAULT_MESSAGE_KEY)
}

/// Turns a message key plus parameters into display text.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, key: &str, params: &[String]) -> String;
}

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("wikibase-error-unexpected", "An unexpected error occurred."),
        (
            "wikibase-error-save-generic",
            "An error occurred while trying to perform save and because of this, your changes could not be completed.",
        ),
        (
            "wikibase-error-remove-generic",
            "An error occurred while trying to perform the removal and because of this, your changes could not be completed.",
        ),
        (
            "wikibase-error-save-timeout",
            "We are experiencing technical difficulties, and because of this your \"save\" could not be completed.",
        ),
        (
            "wikibase-error-remove-timeout",
            "We are experiencing technical difficulties, and because of this your \"remove\" could not be completed.",
        ),
        (
            "wikibase-error-ui-no-external-page",
            "The specified article could not be found on the corresponding site.",
        ),
        (
            "wikibase-error-ui-edit-conflict",
            "There is an edit conflict. Please reload and save again.",
        ),
    ])
});

/// Built-in English catalogue with optional per-key overrides.
///
/// `$1`, `$2`, ... in a text are replaced by the corresponding parameter.
/// Unknown keys render as `⧼key⧽`.
#[derive(Debug, Clone, Default)]
pub struct DefaultMessages {
    overrides: HashMap<String, String>,
}

impl DefaultMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), text.into());
        self
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.overrides
            .get(key)
            .map(String::as_str)
            .or_else(|| ENGLISH.get(key).copied())
    }
}

impl MessageResolver for DefaultMessages {
    fn resolve(&self, key: &str, params: &[String]) -> String {
        let Some(text) = self.text(key) else {
            return format!("⧼{}⧽", key);
        };
        // highest index first so $1 does not eat the prefix of $10
        params
            .iter()
            .enumerate()
            .rev()
            .fold(text.to_string(), |acc, (i, p)| {
                acc.replace(&format!("${}", i + 1), p)
            })
    }
}
