//! `Session` - per-key root object for every TMDB request.
//!
//! A session binds one API key to the remote configuration fetched when the
//! session is created. Sessions are obtained from a [`SessionRegistry`],
//! which creates at most one per key.

mod registry;

#[allow(clippy::module_name_repetitions)]
pub use registry::{SessionRegistry, SessionRegistryBuilder};

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::json;
use tracing::instrument;
use url::Url;

use crate::configuration::Configuration;
use crate::endpoints::{ARG_API_KEY, METHOD_CONFIG, METHOD_TIMEZONES, OBJECT_LIST};
use crate::error::{Error, Result, TransportError};
use crate::query::{Get, Search, TvFilter};
use crate::transport::Transport;
use crate::tree::TreeView;
use crate::views::ErrorStatus;

/// API key, configuration and transport bound together.
pub struct Session {
    /// API key sent with every request.
    key: String,
    /// Service root, e.g. `https://api.themoviedb.org/3/`.
    base_url: Url,
    /// Configuration fetched at bootstrap.
    configuration: Configuration,
    /// Network collaborator.
    transport: Arc<dyn Transport>,
    /// Last error status reported by the service.
    status: Mutex<ErrorStatus>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session and fetches its configuration.
    ///
    /// Fails without side effects on the caller; the registry decides what
    /// to cache.
    #[instrument(skip_all)]
    fn bootstrap(key: String, base_url: Url, transport: Arc<dyn Transport>) -> Result<Self> {
        let mut session = Self {
            key,
            base_url,
            configuration: Configuration::default(),
            transport,
            status: Mutex::new(ErrorStatus::none()),
        };

        let general = session.fetch_view(&session.endpoint(&[METHOD_CONFIG])?)?;
        let timezones = session.fetch_view(&session.endpoint(&[METHOD_TIMEZONES, OBJECT_LIST])?)?;
        session.configuration = Configuration::merge(general, timezones)?;

        tracing::info!(
            timezones = session.configuration.timezones()?.len(),
            "TMDB session bootstrapped"
        );
        Ok(session)
    }

    /// Service root with the API key attached as a query parameter.
    #[must_use]
    pub fn url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair(ARG_API_KEY, &self.key);
        url
    }

    /// [`Session::url`] with path segments appended, e.g. `["tv", "popular"]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Url`] if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.url();
        url.path_segments_mut()
            .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Configuration fetched at bootstrap.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// API key of this session.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last error status reported by the service, or a no-error status.
    #[must_use]
    pub fn status(&self) -> ErrorStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetches `url` through the transport.
    ///
    /// Returns an empty string when the service has no data for the resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the transport fails.
    pub fn fetch(&self, url: &Url) -> Result<String> {
        match self.transport.fetch(url) {
            Ok(body) => Ok(body),
            Err(err) => {
                if let TransportError::Status { code, message, .. } = &err {
                    let tree = json!({ "status_code": code, "status_message": message });
                    *self.status.lock().unwrap_or_else(PoisonError::into_inner) =
                        ErrorStatus::from(TreeView::from_tree(tree));
                }
                Err(err.into())
            }
        }
    }

    /// Fetches `url` and parses the body.
    ///
    /// # Errors
    ///
    /// Fails if the fetch fails or the body is not a valid document
    /// (an empty "no data" body is a parse error here).
    pub fn fetch_view(&self, url: &Url) -> Result<TreeView> {
        let body = self.fetch(url)?;
        TreeView::parse(&body)
    }

    /// Fetches `url` and parses the body, mapping "no data" to `None`.
    pub(crate) fn fetch_optional_view(&self, url: &Url) -> Result<Option<TreeView>> {
        let body = self.fetch(url)?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        TreeView::parse(&body).map(Some)
    }

    /// TV list queries (popular, top rated, ...).
    #[must_use]
    pub const fn tv(&self) -> TvFilter<'_> {
        TvFilter::new(self)
    }

    /// Search queries.
    #[must_use]
    pub const fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    /// Single-record lookups.
    #[must_use]
    pub const fn get(&self) -> Get<'_> {
        Get::new(self)
    }
}
