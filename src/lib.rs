//! # wikibase-repo-api
//!
//! Client-side abstraction over the Wikibase repository web API.
//!
//! ## Overview
//!
//! The crate turns typed arguments (entity ids, claims, references, terms,
//! site links) into the flat request parameters the repository API expects,
//! and turns the API's assorted failure responses into one error type with a
//! display message.
//!
//! Network I/O sits behind the [`RequestExecutor`] trait. [`transport::HttpExecutor`]
//! is the reqwest based implementation; anything else (a test double, a
//! batching layer, an authenticated session) can be plugged in instead.
//!
//! ## Key Features
//!
//! - **Request builder**: [`RepoApi`] provides one method per API module
//! - **Multi-valued parameters**: [`params::MultiValue`] with U+001F-separated encoding
//! - **Error normalization**: [`RepoApiError`] understands every known failure shape
//! - **Display messages**: [`messages`] maps error codes and actions to message keys
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wikibase_repo_api::{RepoApi, SnakType};
//! use wikibase_repo_api::transport::HttpExecutor;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> wikibase_repo_api::Result<()> {
//!     let api = RepoApi::new(HttpExecutor::from_env()?);
//!
//!     let created = api
//!         .create_claim("Q42", 1234, SnakType::Value, "P31", Some(&json!({"entity-type": "item", "numeric-id": 5})))
//!         .await;
//!
//!     if let Err(wikibase_repo_api::Error::Remote(e)) = &created {
//!         eprintln!("{} ({})", e.display_message(), e.code());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Request builder, one method per API module |
//! | [`params`] | Parameter map and multi-valued parameter encoding |
//! | [`executor`] | The executor trait consumed by the builder |
//! | [`classify`] | Normalization of failed responses |
//! | [`messages`] | Error code → display message resolution |
//! | [`transport`] | HTTP executor |

pub mod api;
pub mod classify;
pub mod executor;
pub mod messages;
pub mod params;
pub mod transport;

// Re-export main types for convenience
pub use api::{HashOrIndex, Rank, RepoApi, SnakType, SortDirection};
pub use classify::RepoApiError;
pub use executor::{ExecResult, RequestExecutor, TokenKind};
pub use messages::{DefaultMessages, MessageResolver};
pub use params::{MultiValue, ParamValue, ParameterMap};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
