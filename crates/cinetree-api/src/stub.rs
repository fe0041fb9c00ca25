//! In-memory transport for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

use crate::error::TransportError;
use crate::transport::Transport;

/// Minimal TMDB configuration body.
pub(crate) const CONFIG_BODY: &str =
    r#"{"images":{"secure_base_url":"https://image.tmdb.org/t/p/","poster_sizes":["w92"]},"change_keys":["adult"]}"#;

/// Minimal timezone list body.
pub(crate) const TIMEZONES_BODY: &str = r#"[{"iso_3166_1":"JP","zones":["Asia/Tokyo"]}]"#;

/// Canned response for one path.
#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status { http: u16, code: i64, message: String },
}

/// Transport answering from a path-keyed table and recording every URL.
///
/// Unknown paths answer with an empty body, like a 404.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    routes: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<Url>>,
}

impl StubTransport {
    /// Stub that answers the two bootstrap endpoints under `/3/`.
    pub(crate) fn bootstrapped() -> Arc<Self> {
        let stub = Self::default();
        stub.route("/3/configuration", CONFIG_BODY);
        stub.route("/3/timezones/list", TIMEZONES_BODY);
        Arc::new(stub)
    }

    /// Answers `path` with `body`.
    pub(crate) fn route(&self, path: &str, body: &str) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(String::from(path), Reply::Body(String::from(body)));
    }

    /// Answers `path` with a TMDB error status.
    pub(crate) fn fail(&self, path: &str, http: u16, code: i64, message: &str) {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner).insert(
            String::from(path),
            Reply::Status {
                http,
                code,
                message: String::from(message),
            },
        );
    }

    /// URLs fetched so far, in order.
    pub(crate) fn calls(&self) -> Vec<Url> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of fetches of `path`.
    pub(crate) fn count(&self, path: &str) -> usize {
        self.calls().iter().filter(|url| url.path() == path).count()
    }
}

impl Transport for StubTransport {
    fn fetch(&self, url: &Url) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());
        let reply = self
            .routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url.path())
            .cloned();
        match reply {
            None => Ok(String::new()),
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Status {
                http,
                code,
                message,
            }) => Err(TransportError::Status {
                http,
                code,
                message,
            }),
        }
    }
}
