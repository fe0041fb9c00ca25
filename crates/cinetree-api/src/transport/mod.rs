//! Transport collaborator: fetch a URL and return its body.
//!
//! The session never talks to the network directly; it goes through a
//! [`Transport`] so tests can substitute an in-memory stub.

mod http;
mod rate_limiter;

#[allow(clippy::module_name_repetitions)]
pub use http::{HttpTransport, HttpTransportBuilder};

use url::Url;

use crate::error::TransportError;

/// Blocking "fetch a URL, return its body" primitive.
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Fetches `url` and returns the body as text.
    ///
    /// Returns an empty string when the resource does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the request or the service fails.
    fn fetch(&self, url: &Url) -> Result<String, TransportError>;
}
